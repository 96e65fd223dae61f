use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::club::show_club_list;

pub fn build_club_routers() -> Router<AppRegistry> {
    let clubs_routers = Router::new().route("/", get(show_club_list));

    Router::new().nest("/clubs", clubs_routers)
}
