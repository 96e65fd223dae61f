use crate::model::id::ClubId;

// 主催団体。このコアでは読み取り専用
#[derive(Debug, Clone)]
pub struct Club {
    pub club_id: ClubId,
    pub club_name: String,
    pub group_category: String,
}
