use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingStatus},
        Booking,
    },
    id::{BookingId, ClubId, VenueId},
    time_slot::TimeSlot,
};

// 重複予約の問い合わせ結果。メッセージ組み立て用に会場名も持つ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictingVenue {
    pub venue_id: VenueId,
    pub venue_name: String,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 予約行を 1 件作成する。
    // 実装は重複チェックと INSERT をアトミックに行い、
    // 競合していれば SlotConflict を返さなければならない
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    // 指定会場群のうち、時間帯が重複する有効な予約（rejected 以外）を
    // 持つ会場を返す。問い合わせ失敗はエラーとして伝播させる
    async fn find_conflicting_venues(
        &self,
        venue_ids: &[VenueId],
        slot: &TimeSlot,
    ) -> AppResult<Vec<ConflictingVenue>>;
    // すべての予約を取得する
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
    // 団体 ID に紐づく予約を取得する
    async fn find_by_club_id(&self, club_id: ClubId) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // ステータスと管理者メモを更新する
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()>;
}
