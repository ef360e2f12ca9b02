use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::auth::{get_current_user, login, register_user};

pub fn build_auth_routers() -> Router<AppRegistry> {
    let auth_routers = Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login))
        .route("/me", get(get_current_user));

    Router::new().nest("/auth", auth_routers)
}
