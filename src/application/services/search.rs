//! Substring search across aggregates

use std::sync::Arc;

use crate::application::identity::AuthenticatedUser;
use crate::domain::vehicle::VehicleWithOwner;
use crate::domain::{
    AppointmentView, DomainError, DomainResult, RepositoryProvider, Service, User,
};

pub struct SearchService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SearchService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn users(&self, principal: &AuthenticatedUser, query: &str) -> DomainResult<Vec<User>> {
        principal.ensure_admin()?;
        self.repos.users().search(normalize(query)?).await
    }

    pub async fn vehicles(
        &self,
        principal: &AuthenticatedUser,
        query: &str,
    ) -> DomainResult<Vec<VehicleWithOwner>> {
        principal.ensure_admin()?;
        self.repos.vehicles().search(normalize(query)?).await
    }

    pub async fn appointments(
        &self,
        principal: &AuthenticatedUser,
        query: &str,
    ) -> DomainResult<Vec<AppointmentView>> {
        principal.ensure_admin()?;
        self.repos.appointments().search(normalize(query)?).await
    }

    /// Open to every signed-in user.
    pub async fn services(&self, query: &str) -> DomainResult<Vec<Service>> {
        self.repos.services().search(normalize(query)?).await
    }
}

fn normalize(query: &str) -> DomainResult<&str> {
    let query = query.trim();
    if query.is_empty() {
        return Err(DomainError::Validation("Search query is required".into()));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::testing::fixture;

    #[tokio::test]
    async fn services_are_searchable_by_anyone() {
        let f = fixture().await;
        let search = SearchService::new(f.repos.clone());

        let hits = search.services("oil").await.unwrap();
        assert!(!hits.is_empty());
        assert!(hits
            .iter()
            .all(|s| s.name.to_lowercase().contains("oil")
                || s.category.as_deref().unwrap_or("").to_lowercase().contains("oil")
                || s.description.as_deref().unwrap_or("").to_lowercase().contains("oil")));
    }

    #[tokio::test]
    async fn entity_search_is_admin_only() {
        let f = fixture().await;
        let search = SearchService::new(f.repos.clone());

        assert!(matches!(
            search.users(&f.alice, "mal").await,
            Err(DomainError::Forbidden(_))
        ));
        let hits = search.users(&f.admin, "MAL").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "mallory");
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let f = fixture().await;
        let search = SearchService::new(f.repos.clone());
        assert!(matches!(
            search.services("   ").await,
            Err(DomainError::Validation(_))
        ));
    }
}
