use crate::modules::admin::controller::get_info;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn init_admin_router() -> Router<AppState> {
    Router::new().route("/info", get(get_info))
}
