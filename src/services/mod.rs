//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod patrons;

use sqlx::{Pool, Postgres};

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub patrons: patrons::PatronsService,
    pool: Pool<Postgres>,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository.clone()),
            patrons: patrons::PatronsService::new(repository.clone()),
            pool: repository.pool,
        }
    }

    /// Raw pool handle, used by the readiness probe
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}
