use crate::database::{model::club::ClubRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{club::Club, id::ClubId};
use kernel::repository::club::ClubRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ClubRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ClubRepository for ClubRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Club>> {
        let rows = sqlx::query_as::<_, ClubRow>(
            r#"
                SELECT
                    club_id,
                    club_name,
                    group_category
                FROM clubs
                ORDER BY club_name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Club::from).collect())
    }

    async fn find_by_id(&self, club_id: ClubId) -> AppResult<Option<Club>> {
        let row = sqlx::query_as::<_, ClubRow>(
            r#"
                SELECT
                    club_id,
                    club_name,
                    group_category
                FROM clubs
                WHERE club_id = $1
            "#,
        )
        .bind(club_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Club::from))
    }
}
