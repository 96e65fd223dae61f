use crate::database::{
    model::booking::{BookingRow, ConflictingVenueRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, UpdateBookingStatus},
        Booking,
    },
    id::{BookingId, ClubId, VenueId},
    time_slot::TimeSlot,
};
use kernel::repository::booking::{BookingRepository, ConflictingVenue};
use shared::error::{AppError, AppResult};
use uuid::Uuid;

const SELECT_BOOKING_COLUMNS: &str = r#"
    SELECT
    b.booking_id,
    b.club_id,
    b.venue_id,
    b.event_name,
    b.event_type,
    b.start_time,
    b.end_time,
    b.expected_attendees,
    b.status,
    b.batch_id,
    b.admin_note,
    b.created_at,
    b.updated_at,
    v.venue_name,
    v.capacity,
    c.club_name
    FROM bookings AS b
    INNER JOIN venues AS v ON b.venue_id = v.venue_id
    INNER JOIN clubs AS c ON b.club_id = c.club_id
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前の一括チェックを通過してから他のリクエストが同じ
        // 時間帯を取っている可能性があるため、挿入の直前に
        // 同一会場・同一時間帯の重複を改めて確認する
        {
            let overlap = sqlx::query_scalar::<_, Uuid>(
                r#"
                SELECT booking_id
                FROM bookings
                WHERE venue_id = $1
                  AND status <> 'rejected'
                  AND start_time < $3
                  AND $2 < end_time
                LIMIT 1
                "#,
            )
            .bind(event.venue_id)
            .bind(event.slot.start())
            .bind(event.slot.end())
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if overlap.is_some() {
                return Err(AppError::SlotConflict(format!(
                    "Venue ({}) is already booked during this time",
                    event.venue_id
                )));
            }
        }

        // 予約処理を行う、すなわち bookings テーブルにレコードを追加する
        let booking_id = BookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO bookings
                (booking_id, club_id, venue_id, event_name, event_type,
                start_time, end_time, expected_attendees, status, batch_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(booking_id)
        .bind(event.club_id)
        .bind(event.venue_id)
        .bind(&event.event_name)
        .bind(event.event_type.to_string())
        .bind(event.slot.start())
        .bind(event.slot.end())
        .bind(event.expected_attendees)
        .bind(event.status.to_string())
        .bind(event.batch_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            // 排他制約（bookings_no_active_overlap）に弾かれた場合も
            // 重複として返す
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23P01") => {
                AppError::SlotConflict(format!(
                    "Venue ({}) is already booked during this time",
                    event.venue_id
                ))
            }
            _ => AppError::SpecificOperationError(e),
        })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking_id)
    }

    // 指定会場群のうち、時間帯が重複する有効な予約を持つ会場を取得する。
    // 重複条件：
    //     existing.start < new.end AND new.start < existing.end
    async fn find_conflicting_venues(
        &self,
        venue_ids: &[VenueId],
        slot: &TimeSlot,
    ) -> AppResult<Vec<ConflictingVenue>> {
        let rows = sqlx::query_as::<_, ConflictingVenueRow>(
            r#"
                SELECT DISTINCT b.venue_id, v.venue_name
                FROM bookings AS b
                INNER JOIN venues AS v ON b.venue_id = v.venue_id
                WHERE b.venue_id = ANY($1)
                  AND b.status <> 'rejected'
                  AND b.start_time < $3
                  AND $2 < b.end_time
                ORDER BY v.venue_name ASC
            "#,
        )
        .bind(venue_ids.to_vec())
        .bind(slot.start())
        .bind(slot.end())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(ConflictingVenue::from).collect())
    }

    // すべての予約を開始日時の古い順に取得する
    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING_COLUMNS} ORDER BY b.start_time ASC"
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(BookingRow::try_into_booking).collect()
    }

    // 団体 ID に紐づく予約を取得する
    async fn find_by_club_id(&self, club_id: ClubId) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING_COLUMNS} WHERE b.club_id = $1 ORDER BY b.start_time ASC"
        ))
        .bind(club_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(BookingRow::try_into_booking).collect()
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING_COLUMNS} WHERE b.booking_id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(BookingRow::try_into_booking).transpose()
    }

    // ステータスと管理者メモを更新する
    async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET
                    status = $1,
                    admin_note = $2,
                    updated_at = now()
                WHERE booking_id = $3
            "#,
        )
        .bind(event.status.to_string())
        .bind(event.admin_note)
        .bind(event.booking_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified booking not found".into(),
            ));
        }

        Ok(())
    }
}

impl BookingRepositoryImpl {
    // create メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
