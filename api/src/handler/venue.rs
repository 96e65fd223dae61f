use crate::model::venue::{VenueResponse, VenuesResponse};
use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::VenueId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_venue_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<VenuesResponse>> {
    registry
        .venue_repository()
        .find_all()
        .await
        .map(VenuesResponse::from)
        .map(Json)
}

pub async fn show_venue(
    Path(venue_id): Path<VenueId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<VenueResponse>> {
    registry
        .venue_repository()
        .find_by_id(venue_id)
        .await
        .and_then(|v| match v {
            Some(v) => Ok(Json(v.into())),
            None => Err(AppError::EntityNotFound("Venue not found".into())),
        })
}
