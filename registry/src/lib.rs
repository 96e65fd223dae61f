use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::booking::BookingRepositoryImpl;
use adapter::repository::club::ClubRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::venue::VenueRepositoryImpl;
use kernel::repository::booking::BookingRepository;
use kernel::repository::club::ClubRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::venue::VenueRepository;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    venue_repository: Arc<dyn VenueRepository>,
    club_repository: Arc<dyn ClubRepository>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let venue_repository = Arc::new(VenueRepositoryImpl::new(pool.clone()));
        let club_repository = Arc::new(ClubRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            venue_repository,
            club_repository,
            booking_repository,
        }
    }

    // テストでインメモリ実装を差し込むためのコンストラクタ
    pub fn from_parts(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        venue_repository: Arc<dyn VenueRepository>,
        club_repository: Arc<dyn ClubRepository>,
        booking_repository: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            health_check_repository,
            venue_repository,
            club_repository,
            booking_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn venue_repository(&self) -> Arc<dyn VenueRepository> {
        self.venue_repository.clone()
    }

    pub fn club_repository(&self) -> Arc<dyn ClubRepository> {
        self.club_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }
}
