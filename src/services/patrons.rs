//! Patron lookup service

use crate::{error::AppResult, models::patron::Patron, repository::Repository};

#[derive(Clone)]
pub struct PatronsService {
    repository: Repository,
}

impl PatronsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Name-fragment suggestions for the checkout form, at most 5
    pub async fn search(&self, fragment: &str) -> AppResult<Vec<Patron>> {
        self.repository.patrons.search_by_name(fragment).await
    }
}
