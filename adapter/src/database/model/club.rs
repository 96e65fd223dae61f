use kernel::model::{club::Club, id::ClubId};

#[derive(sqlx::FromRow)]
pub struct ClubRow {
    pub club_id: ClubId,
    pub club_name: String,
    pub group_category: String,
}

impl From<ClubRow> for Club {
    fn from(value: ClubRow) -> Self {
        let ClubRow {
            club_id,
            club_name,
            group_category,
        } = value;
        Self {
            club_id,
            club_name,
            group_category,
        }
    }
}
