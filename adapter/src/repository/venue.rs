use crate::database::{model::venue::VenueRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::VenueId, venue::Venue};
use kernel::repository::venue::VenueRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct VenueRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl VenueRepository for VenueRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Venue>> {
        let rows = sqlx::query_as::<_, VenueRow>(
            r#"
                SELECT
                    venue_id,
                    venue_name,
                    capacity,
                    category
                FROM venues
                ORDER BY venue_name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(VenueRow::try_into_venue).collect()
    }

    async fn find_by_ids(&self, venue_ids: &[VenueId]) -> AppResult<Vec<Venue>> {
        let rows = sqlx::query_as::<_, VenueRow>(
            r#"
                SELECT
                    venue_id,
                    venue_name,
                    capacity,
                    category
                FROM venues
                WHERE venue_id = ANY($1)
            "#,
        )
        .bind(venue_ids.to_vec())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(VenueRow::try_into_venue).collect()
    }

    async fn find_by_id(&self, venue_id: VenueId) -> AppResult<Option<Venue>> {
        let row = sqlx::query_as::<_, VenueRow>(
            r#"
                SELECT
                    venue_id,
                    venue_name,
                    capacity,
                    category
                FROM venues
                WHERE venue_id = $1
            "#,
        )
        .bind(venue_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(VenueRow::try_into_venue).transpose()
    }
}
