use crate::model::booking::{BookingStatus, EventType};
use crate::model::id::{BatchId, BookingId, ClubId, VenueId};
use crate::model::time_slot::TimeSlot;
use derive_new::new;

// 予約 1 行分の作成イベント。複数会場の申請はこのイベントを
// 会場ごとに 1 つずつ展開し、batch_id で束ねる
#[derive(new, Debug, Clone)]
pub struct CreateBooking {
    pub club_id: ClubId,
    pub venue_id: VenueId,
    pub event_type: EventType,
    pub event_name: String,
    pub slot: TimeSlot,
    pub expected_attendees: i32,
    pub status: BookingStatus,
    pub batch_id: BatchId,
}

#[derive(new, Debug)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    pub status: BookingStatus,
    pub admin_note: Option<String>,
}
