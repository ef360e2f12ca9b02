use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::user::show_user_registrations;

pub fn build_user_routers() -> Router<AppRegistry> {
    let user_routers = Router::new().route("/:user_id/registrations", get(show_user_registrations));

    Router::new().nest("/users", user_routers)
}
