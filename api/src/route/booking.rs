use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    check_conflict, create_booking, show_booking, show_booking_list, update_booking_status,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", post(create_booking))
        .route("/", get(show_booking_list))
        .route("/conflict-check", post(check_conflict))
        .route("/:booking_id", get(show_booking))
        .route("/:booking_id/status", put(update_booking_status));

    Router::new().nest("/bookings", bookings_routers)
}
