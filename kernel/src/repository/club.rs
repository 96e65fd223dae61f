use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{club::Club, id::ClubId};

#[async_trait]
pub trait ClubRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Club>>;
    async fn find_by_id(&self, club_id: ClubId) -> AppResult<Option<Club>>;
}
