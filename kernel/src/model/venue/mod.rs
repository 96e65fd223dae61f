use crate::model::id::VenueId;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// 会場はこのコアでは読み取り専用。登録・更新は外部のカタログが持つ
#[derive(Debug, Clone)]
pub struct Venue {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub capacity: i32,
    pub category: VenueCategory,
}

// 会場の承認区分。新規予約の初期ステータスを決める
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VenueCategory {
    AutoApproval,
    NeedsApproval,
}
