use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::venue::{show_venue, show_venue_list};

pub fn build_venue_routers() -> Router<AppRegistry> {
    let venues_routers = Router::new()
        .route("/", get(show_venue_list))
        .route("/:venue_id", get(show_venue));

    Router::new().nest("/venues", venues_routers)
}
