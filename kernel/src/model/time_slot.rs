use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

// 予約時間帯を表す半開区間 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    // end > start でなければ構築できない
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::UnprocessableEntity(
                "endTime must be after startTime".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    // 重複判定
    // 境界が接しているだけ（a.end == b.start）の場合は重複としない
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}
