use kernel::model::{
    booking::{Booking, BookingClub, BookingStatus, BookingVenue, EventType},
    id::{BatchId, BookingId, ClubId, VenueId},
    time_slot::TimeSlot,
};
use kernel::repository::booking::ConflictingVenue;
use shared::error::{AppError, AppResult};
use sqlx::types::chrono::{DateTime, Utc};
use std::str::FromStr;

// 予約一覧・詳細の取得に使う型。venues / clubs を JOIN して
// 表示用の名称も一緒に抽出する
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub club_id: ClubId,
    pub venue_id: VenueId,
    pub event_name: String,
    pub event_type: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub expected_attendees: i32,
    pub status: String,
    pub batch_id: BatchId,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub venue_name: String,
    pub capacity: i32,
    pub club_name: String,
}

// event_type / status / 時間帯の検証を伴うため、From トレイトの
// 実装の代わりに失敗しうる変換メソッドを定義する
impl BookingRow {
    pub fn try_into_booking(self) -> AppResult<Booking> {
        let BookingRow {
            booking_id,
            club_id,
            venue_id,
            event_name,
            event_type,
            start_time,
            end_time,
            expected_attendees,
            status,
            batch_id,
            admin_note,
            created_at,
            updated_at,
            venue_name,
            capacity,
            club_name,
        } = self;
        let event_type = EventType::from_str(&event_type).map_err(|_| {
            AppError::UnprocessableEntity(format!("Invalid eventType: {event_type}"))
        })?;
        let status = BookingStatus::from_str(&status)
            .map_err(|_| AppError::UnprocessableEntity(format!("Invalid status: {status}")))?;
        Ok(Booking {
            booking_id,
            event_name,
            event_type,
            slot: TimeSlot::new(start_time, end_time)?,
            expected_attendees,
            status,
            batch_id,
            admin_note,
            created_at,
            updated_at,
            venue: BookingVenue {
                venue_id,
                venue_name,
                capacity,
            },
            club: BookingClub { club_id, club_name },
        })
    }
}

// 重複チェックの結果行。会場ごとに 1 行
#[derive(sqlx::FromRow)]
pub struct ConflictingVenueRow {
    pub venue_id: VenueId,
    pub venue_name: String,
}

impl From<ConflictingVenueRow> for ConflictingVenue {
    fn from(value: ConflictingVenueRow) -> Self {
        let ConflictingVenueRow {
            venue_id,
            venue_name,
        } = value;
        Self {
            venue_id,
            venue_name,
        }
    }
}
