use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{id::VenueId, venue::Venue};

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Venue>>;
    // 申請された会場 ID をまとめて解決する。
    // 見つからなかった ID の検出は呼び出し側で件数を突き合わせて行う
    async fn find_by_ids(&self, venue_ids: &[VenueId]) -> AppResult<Vec<Venue>>;
    async fn find_by_id(&self, venue_id: VenueId) -> AppResult<Option<Venue>>;
}
