use kernel::model::{
    id::VenueId,
    venue::{Venue, VenueCategory},
};
use shared::error::{AppError, AppResult};
use std::str::FromStr;

#[derive(sqlx::FromRow)]
pub struct VenueRow {
    pub venue_id: VenueId,
    pub venue_name: String,
    pub capacity: i32,
    pub category: String,
}

impl VenueRow {
    pub fn try_into_venue(self) -> AppResult<Venue> {
        let VenueRow {
            venue_id,
            venue_name,
            capacity,
            category,
        } = self;
        let category = VenueCategory::from_str(&category)
            .map_err(|_| AppError::UnprocessableEntity(format!("Invalid category: {category}")))?;
        Ok(Venue {
            venue_id,
            venue_name,
            capacity,
            category,
        })
    }
}
