use crate::model::booking::{
    conflict_message, BookingListQuery, BookingResponse, BookingsResponse, CheckConflictRequest,
    CheckConflictResponse, CreateBookingRequest, CreatedBookingResponse, CreatedBookingsResponse,
    UpdateBookingStatusRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, Utc};
use garde::Validate;
use kernel::model::{
    booking::{event::CreateBooking, event::UpdateBookingStatus, EventType},
    id::{BatchId, BookingId, VenueId},
    time_slot::TimeSlot,
    venue::Venue,
};
use kernel::policy;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::collections::HashMap;
use std::str::FromStr;

// 予約作成。
// 検証 → 会場・団体の解決 → 重複チェック → 定員チェックを
// すべて通過した場合のみ、会場ごとに 1 行ずつ INSERT する
pub async fn create_booking(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreatedBookingsResponse>)> {
    req.validate(&())?;

    let event_type = EventType::from_str(&req.event_type)
        .map_err(|_| AppError::UnprocessableEntity("Invalid eventType".into()))?;

    // 時刻まわりのルールはすべて kernel::policy に寄せてあり、
    // 事前チェック用のエンドポイントと同じ実装を使う
    let now = Local::now();
    policy::check_advance_notice(now, req.start_time, event_type)?;
    policy::check_operating_hours(req.start_time, req.end_time)?;

    let slot = TimeSlot::new(
        req.start_time.with_timezone(&Utc),
        req.end_time.with_timezone(&Utc),
    )?;

    // 会場と団体を解決する。見つからない ID が混ざっていれば 404
    let venues = registry
        .venue_repository()
        .find_by_ids(&req.venue_ids)
        .await?;
    if venues.len() != req.venue_ids.len() {
        return Err(AppError::EntityNotFound(
            "One or more venues not found".into(),
        ));
    }
    registry
        .club_repository()
        .find_by_id(req.club_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Club not found".into()))?;

    // 申請された全会場の重複チェックを 1 回の問い合わせで行う。
    // どれか 1 つでも重複していれば申請全体を 409 で棄却する
    let conflicts = registry
        .booking_repository()
        .find_conflicting_venues(&req.venue_ids, &slot)
        .await?;
    if !conflicts.is_empty() {
        return Err(AppError::SlotConflict(conflict_message(&conflicts)));
    }

    for venue in &venues {
        policy::check_capacity(req.expected_attendees, venue)?;
    }

    // ここからが書き込み。バッチ ID で全行を束ねる。
    // 途中で失敗した場合にどこまで書き込まれたかを確定させるため、
    // INSERT は申請順に逐次実行する
    let mut venues_by_id: HashMap<VenueId, Venue> =
        venues.into_iter().map(|v| (v.venue_id, v)).collect();
    let batch_id = BatchId::new();
    let mut created: Vec<CreatedBookingResponse> = Vec::with_capacity(req.venue_ids.len());

    for venue_id in &req.venue_ids {
        let venue = venues_by_id.remove(venue_id).ok_or_else(|| {
            AppError::EntityNotFound("One or more venues not found".into())
        })?;

        // 承認区分ごとの初期ステータスは会場単位で決まる。
        // 同一バッチ内で approved と pending が混在してよい
        let status = policy::initial_status(venue.category);
        let event = CreateBooking::new(
            req.club_id,
            venue.venue_id,
            event_type,
            req.event_name.clone(),
            slot,
            req.expected_attendees,
            status,
            batch_id,
        );

        match registry.booking_repository().create(event).await {
            Ok(booking_id) => created.push(CreatedBookingResponse::new(
                booking_id,
                venue.venue_id,
                venue.venue_name,
                status,
                batch_id,
            )),
            // 1 行も書き込めていなければエラーをそのまま返す。
            // 書き込み済みの行がある場合はロールバックせず、
            // 成功済みの行を添えて呼び出し側のリカバリーに委ねる
            Err(e) if created.is_empty() => return Err(e),
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    venue_name = %venue.venue_name,
                    "Failed to book venue"
                );
                return Err(AppError::PartialBatchFailure {
                    venue_name: venue.venue_name,
                    created_booking_ids: created.iter().map(|c| c.booking_id.raw()).collect(),
                });
            }
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(CreatedBookingsResponse { items: created }),
    ))
}

// 事前チェック。重複判定だけを行い、何も書き込まない
pub async fn check_conflict(
    State(registry): State<AppRegistry>,
    Json(req): Json<CheckConflictRequest>,
) -> AppResult<Json<CheckConflictResponse>> {
    let (Some(_club_id), Some(start_time), Some(end_time)) =
        (req.club_id, req.start_time, req.end_time)
    else {
        return Err(AppError::UnprocessableEntity("Missing required fields".into()));
    };

    if req.venue_ids.is_empty() {
        return Ok(Json(CheckConflictResponse {
            has_conflict: false,
            message: String::new(),
        }));
    }

    let slot = TimeSlot::new(
        start_time.with_timezone(&Utc),
        end_time.with_timezone(&Utc),
    )?;
    let conflicts = registry
        .booking_repository()
        .find_conflicting_venues(&req.venue_ids, &slot)
        .await?;

    if conflicts.is_empty() {
        Ok(Json(CheckConflictResponse {
            has_conflict: false,
            message: String::new(),
        }))
    } else {
        Ok(Json(CheckConflictResponse {
            has_conflict: true,
            message: conflict_message(&conflicts),
        }))
    }
}

pub async fn show_booking_list(
    Query(query): Query<BookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    let bookings = match query.club_id {
        Some(club_id) => {
            registry
                .booking_repository()
                .find_by_club_id(club_id)
                .await?
        }
        None => registry.booking_repository().find_all().await?,
    };
    Ok(Json(bookings.into()))
}

pub async fn show_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await
        .and_then(|b| match b {
            Some(b) => Ok(Json(b.into())),
            None => Err(AppError::EntityNotFound("Booking not found".into())),
        })
}

// 管理者によるステータス変更。
// 遷移ガードを通過した場合のみ更新し、時刻や定員のルールは
// 再検証しない（作成時に満たされている）
pub async fn update_booking_status(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<BookingResponse>> {
    req.validate(&())?;

    let next = kernel::model::booking::BookingStatus::from_str(&req.status)
        .map_err(|_| AppError::UnprocessableEntity(format!("Invalid status: {}", req.status)))?;

    let booking = registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))?;

    if !booking.status.can_transition_to(next) {
        return Err(AppError::InvalidStatusTransition(format!(
            "Cannot change status from {} to {}",
            booking.status, next
        )));
    }

    registry
        .booking_repository()
        .update_status(UpdateBookingStatus::new(booking_id, next, req.admin_note))
        .await?;

    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .map(BookingResponse::from)
        .map(Json)
        .ok_or_else(|| AppError::EntityNotFound("Booking not found".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use kernel::model::booking::{Booking, BookingClub, BookingStatus, BookingVenue};
    use kernel::model::club::Club;
    use kernel::model::id::ClubId;
    use kernel::model::venue::VenueCategory;
    use kernel::repository::booking::{BookingRepository, ConflictingVenue};
    use kernel::repository::club::ClubRepository;
    use kernel::repository::health::HealthCheckRepository;
    use kernel::repository::venue::VenueRepository;
    use std::sync::{Arc, Mutex};

    struct StoredBooking {
        booking_id: BookingId,
        event: CreateBooking,
        status: BookingStatus,
        admin_note: Option<String>,
        created_at: DateTime<Utc>,
    }

    // インメモリのテスト用リポジトリ。
    // create は本実装の SERIALIZABLE トランザクションと同じく、
    // 重複チェックと挿入をロック内でまとめて行う
    struct InMemoryBookingRepository {
        venues: Vec<Venue>,
        rows: Mutex<Vec<StoredBooking>>,
        fail_on_venue: Option<VenueId>,
    }

    impl InMemoryBookingRepository {
        fn new(venues: Vec<Venue>) -> Self {
            Self {
                venues,
                rows: Mutex::new(Vec::new()),
                fail_on_venue: None,
            }
        }

        fn venue_name(&self, venue_id: VenueId) -> String {
            self.venues
                .iter()
                .find(|v| v.venue_id == venue_id)
                .map(|v| v.venue_name.clone())
                .unwrap_or_else(|| "Unknown Venue".into())
        }

        fn to_booking(&self, row: &StoredBooking) -> Booking {
            let venue = self
                .venues
                .iter()
                .find(|v| v.venue_id == row.event.venue_id)
                .expect("venue must exist in fixture");
            Booking {
                booking_id: row.booking_id,
                event_name: row.event.event_name.clone(),
                event_type: row.event.event_type,
                slot: row.event.slot,
                expected_attendees: row.event.expected_attendees,
                status: row.status,
                batch_id: row.event.batch_id,
                admin_note: row.admin_note.clone(),
                created_at: row.created_at,
                updated_at: row.created_at,
                venue: BookingVenue {
                    venue_id: venue.venue_id,
                    venue_name: venue.venue_name.clone(),
                    capacity: venue.capacity,
                },
                club: BookingClub {
                    club_id: row.event.club_id,
                    club_name: "Test Club".into(),
                },
            }
        }

        fn count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BookingRepository for InMemoryBookingRepository {
        async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
            if self.fail_on_venue == Some(event.venue_id) {
                return Err(AppError::NoRowsAffectedError(
                    "No booking record has been created".into(),
                ));
            }

            let mut rows = self.rows.lock().unwrap();
            let conflict = rows.iter().any(|r| {
                r.event.venue_id == event.venue_id
                    && r.status != BookingStatus::Rejected
                    && r.event.slot.overlaps(&event.slot)
            });
            if conflict {
                return Err(AppError::SlotConflict(format!(
                    "Venue ({}) is already booked during this time",
                    event.venue_id
                )));
            }

            let booking_id = BookingId::new();
            rows.push(StoredBooking {
                booking_id,
                status: event.status,
                admin_note: None,
                created_at: Utc::now(),
                event,
            });
            Ok(booking_id)
        }

        async fn find_conflicting_venues(
            &self,
            venue_ids: &[VenueId],
            slot: &TimeSlot,
        ) -> AppResult<Vec<ConflictingVenue>> {
            let rows = self.rows.lock().unwrap();
            let mut conflicts: Vec<ConflictingVenue> = Vec::new();
            for row in rows.iter() {
                if venue_ids.contains(&row.event.venue_id)
                    && row.status != BookingStatus::Rejected
                    && row.event.slot.overlaps(slot)
                    && !conflicts.iter().any(|c| c.venue_id == row.event.venue_id)
                {
                    conflicts.push(ConflictingVenue {
                        venue_id: row.event.venue_id,
                        venue_name: self.venue_name(row.event.venue_id),
                    });
                }
            }
            Ok(conflicts)
        }

        async fn find_all(&self) -> AppResult<Vec<Booking>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().map(|r| self.to_booking(r)).collect())
        }

        async fn find_by_club_id(&self, club_id: ClubId) -> AppResult<Vec<Booking>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|r| r.event.club_id == club_id)
                .map(|r| self.to_booking(r))
                .collect())
        }

        async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|r| r.booking_id == booking_id)
                .map(|r| self.to_booking(r)))
        }

        async fn update_status(&self, event: UpdateBookingStatus) -> AppResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|r| r.booking_id == event.booking_id)
                .ok_or_else(|| AppError::EntityNotFound("specified booking not found".into()))?;
            row.status = event.status;
            row.admin_note = event.admin_note;
            Ok(())
        }
    }

    struct InMemoryVenueRepository {
        venues: Vec<Venue>,
    }

    #[async_trait]
    impl VenueRepository for InMemoryVenueRepository {
        async fn find_all(&self) -> AppResult<Vec<Venue>> {
            Ok(self.venues.clone())
        }

        async fn find_by_ids(&self, venue_ids: &[VenueId]) -> AppResult<Vec<Venue>> {
            Ok(self
                .venues
                .iter()
                .filter(|v| venue_ids.contains(&v.venue_id))
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, venue_id: VenueId) -> AppResult<Option<Venue>> {
            Ok(self
                .venues
                .iter()
                .find(|v| v.venue_id == venue_id)
                .cloned())
        }
    }

    struct InMemoryClubRepository {
        clubs: Vec<Club>,
    }

    #[async_trait]
    impl ClubRepository for InMemoryClubRepository {
        async fn find_all(&self) -> AppResult<Vec<Club>> {
            Ok(self.clubs.clone())
        }

        async fn find_by_id(&self, club_id: ClubId) -> AppResult<Option<Club>> {
            Ok(self.clubs.iter().find(|c| c.club_id == club_id).cloned())
        }
    }

    struct AlwaysHealthy;

    #[async_trait]
    impl HealthCheckRepository for AlwaysHealthy {
        async fn check_db(&self) -> bool {
            true
        }
    }

    struct Fixture {
        registry: AppRegistry,
        booking_repo: Arc<InMemoryBookingRepository>,
        club_id: ClubId,
    }

    fn fixture(venues: Vec<Venue>) -> Fixture {
        fixture_with(venues, None)
    }

    fn fixture_with(venues: Vec<Venue>, fail_on_venue: Option<VenueId>) -> Fixture {
        let club = Club {
            club_id: ClubId::new(),
            club_name: "Test Club".into(),
            group_category: "cultural".into(),
        };
        let club_id = club.club_id;
        let booking_repo = Arc::new(InMemoryBookingRepository {
            fail_on_venue,
            ..InMemoryBookingRepository::new(venues.clone())
        });
        let registry = AppRegistry::from_parts(
            Arc::new(AlwaysHealthy),
            Arc::new(InMemoryVenueRepository { venues }),
            Arc::new(InMemoryClubRepository { clubs: vec![club] }),
            booking_repo.clone(),
        );
        Fixture {
            registry,
            booking_repo,
            club_id,
        }
    }

    fn venue(name: &str, capacity: i32, category: VenueCategory) -> Venue {
        Venue {
            venue_id: VenueId::new(),
            venue_name: name.into(),
            capacity,
            category,
        }
    }

    // リードタイムを確実に満たし、平日・週末どちらの時間帯ルールにも
    // かからない 18:00〜21:00 の時間帯を返す
    fn future_times(days_ahead: i64) -> (DateTime<Local>, DateTime<Local>) {
        let date = (Local::now() + Duration::days(days_ahead)).date_naive();
        let start = date
            .and_hms_opt(18, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        (start, start + Duration::hours(3))
    }

    fn request(
        club_id: ClubId,
        venue_ids: Vec<VenueId>,
        event_type: &str,
        days_ahead: i64,
        expected_attendees: i32,
    ) -> CreateBookingRequest {
        let (start_time, end_time) = future_times(days_ahead);
        CreateBookingRequest {
            club_id,
            venue_ids,
            event_type: event_type.into(),
            event_name: "Annual General Meeting".into(),
            start_time,
            end_time,
            expected_attendees,
        }
    }

    async fn create(
        f: &Fixture,
        req: CreateBookingRequest,
    ) -> AppResult<(StatusCode, Json<CreatedBookingsResponse>)> {
        create_booking(State(f.registry.clone()), Json(req)).await
    }

    #[tokio::test]
    async fn test_auto_approval_venue_is_approved_immediately() {
        let v = venue("Open Court", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        let (code, Json(res)) = create(&f, request(f.club_id, vec![v.venue_id], "open_all", 25, 50))
            .await
            .unwrap();

        assert_eq!(code, StatusCode::CREATED);
        assert_eq!(res.items.len(), 1);
        assert_eq!(res.items[0].status, BookingStatus::Approved);
    }

    #[tokio::test]
    async fn test_needs_approval_venue_starts_pending_then_transitions_once() {
        let v = venue("Main Hall", 200, VenueCategory::NeedsApproval);
        let f = fixture(vec![v.clone()]);

        let (_, Json(res)) = create(&f, request(f.club_id, vec![v.venue_id], "open_all", 25, 50))
            .await
            .unwrap();
        assert_eq!(res.items[0].status, BookingStatus::Pending);

        // Pending → Approved は通る
        let booking_id = res.items[0].booking_id;
        let Json(updated) = update_booking_status(
            Path(booking_id),
            State(f.registry.clone()),
            Json(UpdateBookingStatusRequest {
                status: "approved".into(),
                admin_note: Some("Looks fine".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, BookingStatus::Approved);
        assert_eq!(updated.admin_note.as_deref(), Some("Looks fine"));

        // Approved → Rejected は遷移ガードで弾かれる
        let res = update_booking_status(
            Path(booking_id),
            State(f.registry.clone()),
            Json(UpdateBookingStatusRequest {
                status: "rejected".into(),
                admin_note: None,
            }),
        )
        .await;
        assert!(matches!(res, Err(AppError::InvalidStatusTransition(_))));
    }

    #[tokio::test]
    async fn test_advance_notice_policy() {
        let v = venue("Main Hall", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        // co_curricular は 30 日前まで。10 日後開始の申請は弾かれる
        let res = create(
            &f,
            request(f.club_id, vec![v.venue_id], "co_curricular", 10, 50),
        )
        .await;
        assert!(matches!(res, Err(AppError::AdvanceNoticeViolation(30))));
        assert_eq!(f.booking_repo.count(), 0);

        // 31 日後開始なら通る
        let res = create(
            &f,
            request(f.club_id, vec![v.venue_id], "co_curricular", 31, 50),
        )
        .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_conflicting_batch_writes_nothing() {
        let hall_a = venue("Hall A", 200, VenueCategory::AutoApproval);
        let hall_b = venue("Hall B", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![hall_a.clone(), hall_b.clone()]);

        // Hall B には同じ時間帯の承認済み予約が既に存在する
        create(&f, request(f.club_id, vec![hall_b.venue_id], "open_all", 25, 50))
            .await
            .unwrap();
        assert_eq!(f.booking_repo.count(), 1);

        // Hall A には重複がないが、申請全体が 409 で棄却され 1 行も増えない
        let res = create(
            &f,
            request(
                f.club_id,
                vec![hall_a.venue_id, hall_b.venue_id],
                "open_all",
                25,
                50,
            ),
        )
        .await;
        match res {
            Err(AppError::SlotConflict(message)) => {
                assert!(message.contains("Hall B"));
                assert!(!message.contains("Hall A"));
            }
            other => panic!("expected SlotConflict, got {other:?}"),
        }
        assert_eq!(f.booking_repo.count(), 1);
    }

    #[tokio::test]
    async fn test_capacity_exceeded_rejects_request() {
        let v = venue("Seminar Room", 100, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        let res = create(&f, request(f.club_id, vec![v.venue_id], "open_all", 25, 150)).await;
        match res {
            Err(AppError::CapacityExceeded(message)) => {
                assert!(message.contains("Seminar Room"));
                assert!(message.contains("150"));
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
        assert_eq!(f.booking_repo.count(), 0);
    }

    #[tokio::test]
    async fn test_back_to_back_bookings_do_not_conflict() {
        let v = venue("Main Hall", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        // 18:00〜21:00 と、その終了時刻ちょうどに始まる 21:00〜22:00
        let (start, end) = future_times(25);
        let first = CreateBookingRequest {
            club_id: f.club_id,
            venue_ids: vec![v.venue_id],
            event_type: "open_all".into(),
            event_name: "First".into(),
            start_time: start,
            end_time: end,
            expected_attendees: 10,
        };
        let second = CreateBookingRequest {
            club_id: f.club_id,
            venue_ids: vec![v.venue_id],
            event_type: "open_all".into(),
            event_name: "Second".into(),
            start_time: end,
            end_time: end + Duration::hours(1),
            expected_attendees: 10,
        };

        assert!(create(&f, first).await.is_ok());
        assert!(create(&f, second).await.is_ok());
        assert_eq!(f.booking_repo.count(), 2);
    }

    #[tokio::test]
    async fn test_check_conflict_is_read_only_and_idempotent() {
        let v = venue("Main Hall", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        create(&f, request(f.club_id, vec![v.venue_id], "open_all", 25, 50))
            .await
            .unwrap();

        let (start_time, end_time) = future_times(25);
        let probe = || CheckConflictRequest {
            club_id: Some(f.club_id),
            venue_ids: vec![v.venue_id],
            start_time: Some(start_time),
            end_time: Some(end_time),
        };

        let Json(first) = check_conflict(State(f.registry.clone()), Json(probe()))
            .await
            .unwrap();
        let Json(second) = check_conflict(State(f.registry.clone()), Json(probe()))
            .await
            .unwrap();

        assert!(first.has_conflict);
        assert!(first.message.contains("Main Hall"));
        // 書き込みを挟まなければ同じ引数で同じ結果が返る
        assert_eq!(first, second);
        assert_eq!(f.booking_repo.count(), 1);
    }

    #[tokio::test]
    async fn test_check_conflict_requires_fields() {
        let v = venue("Main Hall", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        let res = check_conflict(
            State(f.registry.clone()),
            Json(CheckConflictRequest {
                club_id: None,
                venue_ids: vec![v.venue_id],
                start_time: None,
                end_time: None,
            }),
        )
        .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
    }

    #[tokio::test]
    async fn test_partial_failure_reports_created_prefix() {
        let hall_a = venue("Hall A", 200, VenueCategory::AutoApproval);
        let hall_b = venue("Hall B", 200, VenueCategory::NeedsApproval);
        let f = fixture_with(vec![hall_a.clone(), hall_b.clone()], Some(hall_b.venue_id));

        let res = create(
            &f,
            request(
                f.club_id,
                vec![hall_a.venue_id, hall_b.venue_id],
                "open_all",
                25,
                50,
            ),
        )
        .await;
        match res {
            Err(AppError::PartialBatchFailure {
                venue_name,
                created_booking_ids,
            }) => {
                assert_eq!(venue_name, "Hall B");
                // Hall A の行は書き込まれており、ロールバックされない
                assert_eq!(created_booking_ids.len(), 1);
            }
            other => panic!("expected PartialBatchFailure, got {other:?}"),
        }
        assert_eq!(f.booking_repo.count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_identical_requests_single_winner() {
        let v = venue("Main Hall", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        let (first, second) = tokio::join!(
            create(&f, request(f.club_id, vec![v.venue_id], "open_all", 25, 50)),
            create(&f, request(f.club_id, vec![v.venue_id], "open_all", 25, 50)),
        );

        // どちらが勝つかは決まらないが、勝者はちょうど 1 つ
        assert_eq!(
            [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
            1
        );
        assert_eq!(f.booking_repo.count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_venue_and_club_are_not_found() {
        let v = venue("Main Hall", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        let res = create(
            &f,
            request(f.club_id, vec![v.venue_id, VenueId::new()], "open_all", 25, 50),
        )
        .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let res = create(&f, request(ClubId::new(), vec![v.venue_id], "open_all", 25, 50)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_requests_are_rejected() {
        let v = venue("Main Hall", 200, VenueCategory::AutoApproval);
        let f = fixture(vec![v.clone()]);

        // 未知のイベント種別
        let res = create(
            &f,
            request(f.club_id, vec![v.venue_id], "birthday_party", 25, 50),
        )
        .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));

        // 会場の指定なし
        let res = create(&f, request(f.club_id, vec![], "open_all", 25, 50)).await;
        assert!(matches!(res, Err(AppError::ValidationError(_))));

        // 終了が開始より前
        let (start_time, end_time) = future_times(25);
        let res = create(
            &f,
            CreateBookingRequest {
                club_id: f.club_id,
                venue_ids: vec![v.venue_id],
                event_type: "open_all".into(),
                event_name: "Backwards".into(),
                start_time: end_time,
                end_time: start_time,
                expected_attendees: 10,
            },
        )
        .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        assert_eq!(f.booking_repo.count(), 0);
    }
}
