#[macro_use]
extern crate rocket;

pub mod api;
pub mod db;
pub mod utils;

#[cfg(test)]
#[cfg(not(tarpaulin_include))]
#[ctor::ctor]
fn init() {
    crate::utils::logging::setup_console_log();
}

#[cfg(not(tarpaulin_include))]
pub async fn rocket() -> rocket::Rocket<rocket::Build> {
    use rocket::fairing::AdHoc;

    use crate::api::configs::{self, Config};
    use crate::db::postgres::PgStore;
    use crate::db::store::BookmarkStore;

    crate::utils::logging::setup_console_log();
    crate::db::connection::run_migrations().await;

    let store = PgStore::connect(&crate::db::connection::database_url())
        .expect("Error building database pool");

    rocket::custom(configs::config_provider())
        .manage(Box::new(store) as Box<dyn BookmarkStore>)
        .mount("/", routes![api::index])
        .mount("/bookmarks", api::bookmark::routes())
        .register("/", api::errors::catchers())
        .attach(AdHoc::config::<Config>())
}
