use chrono::{DateTime, Local};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    booking::{Booking, BookingClub, BookingStatus, BookingVenue},
    id::{BatchId, BookingId, ClubId, VenueId},
};
use kernel::repository::booking::ConflictingVenue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[garde(skip)]
    pub club_id: ClubId,
    #[garde(length(min = 1))]
    pub venue_ids: Vec<VenueId>,
    // 未知の種別を 400 で返せるよう、ここでは文字列のまま受け取り
    // ハンドラー側でパースする
    #[garde(length(min = 1))]
    pub event_type: String,
    #[garde(length(min = 1))]
    pub event_name: String,
    #[garde(skip)]
    pub start_time: DateTime<Local>,
    #[garde(skip)]
    pub end_time: DateTime<Local>,
    #[garde(range(min = 0))]
    pub expected_attendees: i32,
}

// 事前チェック用のリクエスト。必須項目の欠落を 400 で返すため
// Option で受けてハンドラー側で検証する
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConflictRequest {
    pub club_id: Option<ClubId>,
    #[serde(default)]
    pub venue_ids: Vec<VenueId>,
    pub start_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckConflictResponse {
    pub has_conflict: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    #[garde(length(min = 1))]
    pub status: String,
    #[garde(skip)]
    pub admin_note: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub club_id: Option<ClubId>,
}

// 重複している会場名を並べた通知メッセージを組み立てる
pub fn conflict_message(conflicts: &[ConflictingVenue]) -> String {
    let names = conflicts
        .iter()
        .map(|c| c.venue_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Conflict: The following venues are already booked during this time: {names}")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub event_name: String,
    pub event_type: String,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub expected_attendees: i32,
    pub status: BookingStatus,
    pub batch_id: BatchId,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
    pub venue: BookingVenueResponse,
    pub club: BookingClubResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            event_name,
            event_type,
            slot,
            expected_attendees,
            status,
            batch_id,
            admin_note,
            created_at,
            updated_at,
            venue,
            club,
        } = value;
        Self {
            booking_id,
            event_name,
            event_type: event_type.to_string(),
            start_time: slot.start().with_timezone(&Local),
            end_time: slot.end().with_timezone(&Local),
            expected_attendees,
            status,
            batch_id,
            admin_note,
            created_at: created_at.with_timezone(&Local),
            updated_at: updated_at.with_timezone(&Local),
            venue: venue.into(),
            club: club.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingVenueResponse {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub capacity: i32,
}

impl From<BookingVenue> for BookingVenueResponse {
    fn from(value: BookingVenue) -> Self {
        let BookingVenue {
            venue_id,
            venue_name,
            capacity,
        } = value;
        Self {
            venue_id,
            venue_name,
            capacity,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingClubResponse {
    pub club_id: ClubId,
    pub club_name: String,
}

impl From<BookingClub> for BookingClubResponse {
    fn from(value: BookingClub) -> Self {
        let BookingClub { club_id, club_name } = value;
        Self { club_id, club_name }
    }
}

// 作成直後のレスポンス。会場ごとに作成された行の要点を返す
#[derive(Debug, new, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingResponse {
    pub booking_id: BookingId,
    pub venue_id: VenueId,
    pub venue_name: String,
    pub status: BookingStatus,
    pub batch_id: BatchId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingsResponse {
    pub items: Vec<CreatedBookingResponse>,
}
