#![forbid(unsafe_code)]

//! Orchestration of colleague operations over a [`Store`]
//!
//! There is no long-lived open list: each method loads a fresh copy, works on
//! it, and (for mutations) writes it back before returning.

use crate::storage::{Store, StoreError, TransactionError};
use crate::types::{Colleague, ColleagueError, ListError};
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by [`ColleagueService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to load colleagues: {0}")]
    Load(#[source] StoreError),

    #[error("invalid colleague data: {0}")]
    Invalid(#[source] ColleagueError),

    #[error("failed to remove colleague: {0}")]
    Remove(#[source] ListError),

    #[error("{name} was not added: failed to save colleagues: {source}")]
    AddNotSaved {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("{name} was not removed: failed to save colleagues: {source}")]
    RemoveNotSaved {
        name: String,
        #[source]
        source: StoreError,
    },
}

/// The single entry point for reading and changing the colleague list
#[derive(Debug, Clone)]
pub struct ColleagueService {
    store: Store,
}

impl ColleagueService {
    pub fn new(store: Store) -> Self {
        ColleagueService { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Validates a new colleague, appends it and saves the list
    ///
    /// Nothing is written if validation fails.
    pub fn add_colleague(
        &self,
        name: &str,
        city: &str,
        timezone: &str,
    ) -> Result<Colleague, ServiceError> {
        let added = self
            .store
            .transaction(|list| -> Result<Colleague, ColleagueError> {
                let colleague = Colleague::new(name, city, timezone)?;
                list.add(colleague.clone());
                Ok(colleague)
            })
            .map_err(|e| match e {
                TransactionError::Load(e) => ServiceError::Load(e),
                TransactionError::Rejected(e) => ServiceError::Invalid(e),
                TransactionError::NotSaved { outcome, source } => ServiceError::AddNotSaved {
                    name: outcome.name().to_string(),
                    source,
                },
            })?;

        info!(name = added.name(), timezone = added.timezone(), "added colleague");
        Ok(added)
    }

    /// Removes the colleague at a 1-based position and saves the list
    pub fn remove_colleague(&self, position: i64) -> Result<Colleague, ServiceError> {
        let removed = self
            .store
            .transaction(|list| list.remove(position))
            .map_err(|e| match e {
                TransactionError::Load(e) => ServiceError::Load(e),
                TransactionError::Rejected(e) => ServiceError::Remove(e),
                TransactionError::NotSaved { outcome, source } => ServiceError::RemoveNotSaved {
                    name: outcome.name().to_string(),
                    source,
                },
            })?;

        info!(name = removed.name(), position, "removed colleague");
        Ok(removed)
    }

    /// Every colleague in display order
    pub fn all_colleagues(&self) -> Result<Vec<Colleague>, ServiceError> {
        let list = self.store.load().map_err(ServiceError::Load)?;
        Ok(list.into_vec())
    }

    /// Colleagues whose name matches, ignoring case
    pub fn find_colleague(&self, name: &str) -> Result<Vec<Colleague>, ServiceError> {
        let list = self.store.load().map_err(ServiceError::Load)?;
        let found: Vec<Colleague> = list.find_by_name(name).into_iter().cloned().collect();

        debug!(query = name, matches = found.len(), "searched colleagues");
        Ok(found)
    }

    /// Matching colleagues paired with their position in the full list
    ///
    /// The positions are the ones `remove_colleague` accepts.
    pub fn find_positioned(&self, name: &str) -> Result<Vec<(usize, Colleague)>, ServiceError> {
        let list = self.store.load().map_err(ServiceError::Load)?;
        Ok(list
            .find_positions_by_name(name)
            .into_iter()
            .map(|(p, c)| (p, c.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColleagueList;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ColleagueService) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path()).unwrap();
        store.ensure_folder().unwrap();
        store.save(&ColleagueList::new()).unwrap();
        (temp_dir, ColleagueService::new(store))
    }

    fn names(colleagues: &[Colleague]) -> Vec<&str> {
        colleagues.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn test_add_and_remove_scenario() {
        let (_temp_dir, service) = setup();

        service
            .add_colleague("Alice", "London", "Europe/London")
            .unwrap();
        service
            .add_colleague("Bob", "NYC", "America/New_York")
            .unwrap();
        assert_eq!(service.all_colleagues().unwrap().len(), 2);

        let removed = service.remove_colleague(1).unwrap();
        assert_eq!(removed.name(), "Alice");

        let remaining = service.all_colleagues().unwrap();
        assert_eq!(names(&remaining), vec!["Bob"]);
        assert_eq!(remaining[0].city(), "NYC");
        assert_eq!(remaining[0].timezone(), "America/New_York");
    }

    #[test]
    fn test_add_returns_trimmed_colleague() {
        let (_temp_dir, service) = setup();
        let added = service
            .add_colleague(" Alice ", " London ", " Europe/London ")
            .unwrap();

        assert_eq!(added.name(), "Alice");
        assert_eq!(service.all_colleagues().unwrap()[0], added);
    }

    #[test]
    fn test_add_invalid_leaves_file_unchanged() {
        let (_temp_dir, service) = setup();
        service
            .add_colleague("Alice", "London", "Europe/London")
            .unwrap();
        let before = fs::read(service.store().path()).unwrap();

        let err = service
            .add_colleague("", "City", "Europe/Rome")
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(ColleagueError::MissingName)
        ));

        let err = service
            .add_colleague("Bob", "City", "Nowhere/Special")
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(ColleagueError::InvalidTimezone(_))
        ));

        assert_eq!(fs::read(service.store().path()).unwrap(), before);
    }

    #[test]
    fn test_add_save_failure_names_colleague() {
        let (_temp_dir, service) = setup();
        fs::create_dir(service.store().path().with_extension("json.tmp")).unwrap();

        let err = service
            .add_colleague("Alice", "London", "Europe/London")
            .unwrap_err();
        assert!(matches!(err, ServiceError::AddNotSaved { ref name, .. } if name == "Alice"));
        assert!(err.to_string().starts_with("Alice was not added"));

        assert!(service.all_colleagues().unwrap().is_empty());
    }

    #[test]
    fn test_remove_errors() {
        let (_temp_dir, service) = setup();

        assert!(matches!(
            service.remove_colleague(1),
            Err(ServiceError::Remove(ListError::EmptyList))
        ));

        service
            .add_colleague("Alice", "London", "Europe/London")
            .unwrap();
        for position in [0, -1, 2] {
            assert!(matches!(
                service.remove_colleague(position),
                Err(ServiceError::Remove(ListError::InvalidIndex { .. }))
            ));
        }
        assert_eq!(service.all_colleagues().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_save_failure_names_colleague() {
        let (_temp_dir, service) = setup();
        service
            .add_colleague("Alice", "London", "Europe/London")
            .unwrap();
        fs::create_dir(service.store().path().with_extension("json.tmp")).unwrap();

        let err = service.remove_colleague(1).unwrap_err();
        assert!(err.to_string().contains("Alice was not removed"));
        assert_eq!(service.all_colleagues().unwrap().len(), 1);
    }

    #[test]
    fn test_find_colleague() {
        let (_temp_dir, service) = setup();
        service
            .add_colleague("Alice", "London", "Europe/London")
            .unwrap();
        service
            .add_colleague("Bob", "NYC", "America/New_York")
            .unwrap();
        service
            .add_colleague("alice", "Paris", "Europe/Paris")
            .unwrap();

        let found = service.find_colleague("ALICE").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].city(), "London");
        assert_eq!(found[1].city(), "Paris");

        assert!(service.find_colleague("Zed").unwrap().is_empty());

        let positioned: Vec<usize> = service
            .find_positioned("alice")
            .unwrap()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(positioned, vec![1, 3]);
    }

    #[test]
    fn test_load_failure_is_reported() {
        let (_temp_dir, service) = setup();
        fs::write(service.store().path(), "[{]").unwrap();

        assert!(matches!(
            service.all_colleagues(),
            Err(ServiceError::Load(StoreError::MalformedJson { .. }))
        ));
        assert!(matches!(
            service.add_colleague("Alice", "London", "Europe/London"),
            Err(ServiceError::Load(_))
        ));
    }
}
