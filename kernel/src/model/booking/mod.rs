use crate::model::id::{BatchId, BookingId, ClubId, VenueId};
use crate::model::time_slot::TimeSlot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod event;

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub event_name: String,
    pub event_type: EventType,
    pub slot: TimeSlot,
    pub expected_attendees: i32,
    pub status: BookingStatus,
    pub batch_id: BatchId,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub venue: BookingVenue,
    pub club: BookingClub,
}

// 一覧表示用に予約へ紐付ける会場情報
#[derive(Debug)]
pub struct BookingVenue {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub capacity: i32,
}

// 一覧表示用に予約へ紐付ける団体情報
#[derive(Debug)]
pub struct BookingClub {
    pub club_id: ClubId,
    pub club_name: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum EventType {
    #[strum(serialize = "closed_club")]
    #[serde(rename = "closed_club")]
    ClosedClub,
    #[strum(serialize = "open_all")]
    #[serde(rename = "open_all")]
    OpenForAll,
    #[strum(serialize = "co_curricular")]
    #[serde(rename = "co_curricular")]
    CoCurricular,
}

impl EventType {
    // イベント種別ごとの最低リードタイム（日数）
    pub fn min_advance_days(self) -> i64 {
        match self {
            EventType::CoCurricular => 30,
            EventType::OpenForAll => 20,
            EventType::ClosedClub => 1,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    // 許可される遷移は Pending → Approved と Pending → Rejected のみ。
    // Approved / Rejected は終端状態
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Approved)
                | (BookingStatus::Pending, BookingStatus::Rejected)
        )
    }
}
