use kernel::model::{
    id::VenueId,
    venue::{Venue, VenueCategory},
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenuesResponse {
    pub items: Vec<VenueResponse>,
}

impl From<Vec<Venue>> for VenuesResponse {
    fn from(value: Vec<Venue>) -> Self {
        Self {
            items: value.into_iter().map(VenueResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub capacity: i32,
    pub category: VenueCategory,
}

impl From<Venue> for VenueResponse {
    fn from(value: Venue) -> Self {
        let Venue {
            venue_id,
            venue_name,
            capacity,
            category,
        } = value;
        Self {
            venue_id,
            venue_name,
            capacity,
            category,
        }
    }
}
