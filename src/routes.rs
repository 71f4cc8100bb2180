use rocket::{Route, get};

use crate::{
    database::guard::Db, errors::AppError, models::animal::list_animal_names,
    utils::strings::render_list,
};

pub const GREETING: &str = "Hello, Flask!";

pub fn routes() -> Vec<Route> {
    routes![index, animals]
}

#[get("/")]
pub fn index() -> &'static str {
    GREETING
}

#[get("/animals")]
pub async fn animals(mut db: Db<'_>) -> Result<String, AppError> {
    let mut connection = db.connection().await?;
    let names = list_animal_names(&mut connection).await?;
    Ok(render_list(&names))
}
