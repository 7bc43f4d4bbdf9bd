//! Fetch orchestrator for listing and detail views.

use crate::cache::{CacheOptions, QueryCache, QuerySnapshot};
use crate::query::DirectoryQuery;
use directory_client::{Result, UserDirectory};
use directory_core::{PaginationParams, User, UserFilters, UsersResponse};
use std::sync::Arc;
use tracing::debug;

/// Resolves filter state to upstream operations and caches their results.
///
/// Listing pages and user details live in separate caches sharing the same
/// options. Cheap to clone.
#[derive(Clone)]
pub struct UserQueries {
    directory: Arc<dyn UserDirectory>,
    lists: QueryCache<DirectoryQuery, UsersResponse>,
    details: QueryCache<u64, User>,
}

impl UserQueries {
    pub fn new(directory: Arc<dyn UserDirectory>, options: CacheOptions) -> Self {
        Self {
            directory,
            lists: QueryCache::new(options.clone()),
            details: QueryCache::new(options),
        }
    }

    /// One page of users for `filters` (expected to be the debounced view)
    pub async fn users(
        &self,
        filters: &UserFilters,
        page: PaginationParams,
    ) -> Result<Arc<UsersResponse>> {
        self.run(DirectoryQuery::resolve(filters, page)).await
    }

    /// Fetch an already resolved listing unit
    pub async fn run(&self, query: DirectoryQuery) -> Result<Arc<UsersResponse>> {
        debug!(query = %query, "Requesting users");
        let directory = Arc::clone(&self.directory);
        let unit = query.clone();
        self.lists
            .fetch(query, move || {
                let directory = Arc::clone(&directory);
                let unit = unit.clone();
                async move { unit.execute(directory.as_ref()).await }
            })
            .await
    }

    /// A single user.
    ///
    /// Id `0` is never requested and yields `None`, like a disabled query.
    pub async fn user(&self, id: u64) -> Result<Option<Arc<User>>> {
        if id == 0 {
            return Ok(None);
        }

        debug!(user_id = id, "Requesting user");
        let directory = Arc::clone(&self.directory);
        self.details
            .fetch(id, move || {
                let directory = Arc::clone(&directory);
                async move { directory.get_user(id).await }
            })
            .await
            .map(Some)
    }

    pub fn users_snapshot(
        &self,
        filters: &UserFilters,
        page: PaginationParams,
    ) -> QuerySnapshot<UsersResponse> {
        self.lists.snapshot(&DirectoryQuery::resolve(filters, page))
    }

    pub fn user_snapshot(&self, id: u64) -> QuerySnapshot<User> {
        self.details.snapshot(&id)
    }

    /// Forget every cached result
    pub fn clear(&self) {
        self.lists.clear();
        self.details.clear();
    }
}
