use super::{
    booking::build_booking_routers, club::build_club_routers, venue::build_venue_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_booking_routers())
        .merge(build_venue_routers())
        .merge(build_club_routers());
    Router::new().nest("/api/v1", router)
}
