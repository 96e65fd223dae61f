use crate::model::club::ClubsResponse;
use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn show_club_list(State(registry): State<AppRegistry>) -> AppResult<Json<ClubsResponse>> {
    registry
        .club_repository()
        .find_all()
        .await
        .map(ClubsResponse::from)
        .map(Json)
}
