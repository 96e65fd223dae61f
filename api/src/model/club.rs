use kernel::model::{club::Club, id::ClubId};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubsResponse {
    pub items: Vec<ClubResponse>,
}

impl From<Vec<Club>> for ClubsResponse {
    fn from(value: Vec<Club>) -> Self {
        Self {
            items: value.into_iter().map(ClubResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubResponse {
    pub club_id: ClubId,
    pub club_name: String,
    pub group_category: String,
}

impl From<Club> for ClubResponse {
    fn from(value: Club) -> Self {
        let Club {
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
