use chrono::{DateTime, Datelike, Local, NaiveTime, Timelike, Weekday};
use shared::error::{AppError, AppResult};

use crate::model::booking::{BookingStatus, EventType};
use crate::model::venue::{Venue, VenueCategory};

// 予約ルールの純粋関数群。
// クライアント向けの事前チェックと予約作成時の本チェックの両方が
// このモジュールを呼ぶことで、判定ロジックの二重管理を避ける。
// 現在時刻は引数で受け取り、ここでは取得しない。

// 申請から開始日時までのリードタイム（日数、切り上げ）
pub fn lead_days(now: DateTime<Local>, start: DateTime<Local>) -> i64 {
    // div_ceil over i64 with a positive divisor: round the quotient toward +∞.
    let secs = start.signed_duration_since(now).num_seconds();
    let quotient = secs / 86_400;
    if secs % 86_400 > 0 {
        quotient + 1
    } else {
        quotient
    }
}

// イベント種別ごとの最低リードタイムを満たしているか
pub fn check_advance_notice(
    now: DateTime<Local>,
    start: DateTime<Local>,
    event_type: EventType,
) -> AppResult<()> {
    let min_days = event_type.min_advance_days();
    if lead_days(now, start) < min_days {
        return Err(AppError::AdvanceNoticeViolation(min_days));
    }
    Ok(())
}

// 利用可能時間帯のチェック。
// 週末は 8:00 以降、平日は 16:00 以降に開始できる。
// どちらの場合も開始日の翌日 0:00 までに終了しなければならない
pub fn check_operating_hours(start: DateTime<Local>, end: DateTime<Local>) -> AppResult<()> {
    if end <= start {
        return Err(AppError::UnprocessableEntity(
            "endTime must be after startTime".into(),
        ));
    }

    let is_weekend = matches!(start.weekday(), Weekday::Sat | Weekday::Sun);
    let window_message = if is_weekend {
        "On weekends, bookings are allowed from 8:00 AM to 12:00 AM."
    } else {
        "On weekdays, bookings are only allowed from 4:00 PM to 12:00 AM."
    };

    let opening_hour = if is_weekend { 8 } else { 16 };
    if start.hour() < opening_hour {
        return Err(AppError::OperatingHoursViolation(window_message.into()));
    }

    // 終了は翌日 0:00 ちょうどまで許容する
    let ends_same_day = end.date_naive() == start.date_naive();
    let ends_at_following_midnight = end.time() == NaiveTime::MIN
        && end.date_naive() == start.date_naive() + chrono::Duration::days(1);
    if !ends_same_day && !ends_at_following_midnight {
        return Err(AppError::OperatingHoursViolation(window_message.into()));
    }

    Ok(())
}

// 会場区分から新規予約の初期ステータスを決める
pub fn initial_status(category: VenueCategory) -> BookingStatus {
    match category {
        VenueCategory::AutoApproval => BookingStatus::Approved,
        VenueCategory::NeedsApproval => BookingStatus::Pending,
    }
}

// 想定参加人数が会場の定員に収まっているか
pub fn check_capacity(expected_attendees: i32, venue: &Venue) -> AppResult<()> {
    if expected_attendees > venue.capacity {
        return Err(AppError::CapacityExceeded(format!(
            "Expected attendees ({}) exceed capacity of {} ({})",
            expected_attendees, venue.venue_name, venue.capacity
        )));
    }
    Ok(())
}
