pub mod routes;
pub mod store;
pub mod cors;
pub mod error;
pub mod config;
pub mod catchers;
pub use shared::{models::*, error::*, session::*};

use rocket::{Build, Rocket, catchers, routes};
use crate::{
    catchers::not_found,
    config::AppConfig,
    cors::CORS,
    routes::{
        advance_candidate, all_options, finish_voting, get_results, get_status,
        restart_voting, set_current_person, submit_vote, AppState,
    },
};

pub fn build_rocket(config: AppConfig, state: AppState) -> Rocket<Build> {
    rocket::build()
        .attach(CORS::new(config.allowed_origins.clone()))
        .manage(state)
        .mount(
            config.base_path.as_str(),
            routes![
                get_status,
                submit_vote,
                set_current_person,
                get_results,
                advance_candidate,
                finish_voting,
                restart_voting,
                all_options
            ],
        )
        .register(
            "/",
            catchers![not_found],
        )
}

#[cfg(test)]
mod tests;
