//! User operations against the directory API.

use crate::error::Result;
use crate::transport::ApiClient;
use crate::types::QueryParams;
use async_trait::async_trait;
use directory_core::{FilterKey, PaginationParams, User, UsersResponse};
use tracing::debug;

const USERS_ENDPOINT: &str = "/users";

/// The four directory operations.
///
/// Implemented over HTTP by [`UserService`]; the query layer only depends on
/// this trait so it can be driven by in-memory fakes.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `GET /users?limit=&skip=`
    async fn list_users(&self, page: PaginationParams) -> Result<UsersResponse>;

    /// `GET /users/{id}`
    async fn get_user(&self, id: u64) -> Result<User>;

    /// `GET /users/search?q=&limit=&skip=`
    async fn search_users(&self, query: &str, page: PaginationParams) -> Result<UsersResponse>;

    /// `GET /users/filter?key=&value=&limit=&skip=`
    async fn filter_users(
        &self,
        key: FilterKey,
        value: &str,
        page: PaginationParams,
    ) -> Result<UsersResponse>;
}

/// HTTP-backed [`UserDirectory`].
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

fn paged(params: QueryParams, page: PaginationParams) -> QueryParams {
    params.with("limit", page.limit).with("skip", page.skip)
}

#[async_trait]
impl UserDirectory for UserService {
    async fn list_users(&self, page: PaginationParams) -> Result<UsersResponse> {
        debug!(limit = page.limit, skip = page.skip, "Listing users");
        let response: UsersResponse = self
            .client
            .get(USERS_ENDPOINT, &paged(QueryParams::new(), page))
            .await?;
        debug!(users = response.users.len(), total = response.total, "Listed users");
        Ok(response)
    }

    async fn get_user(&self, id: u64) -> Result<User> {
        debug!(user_id = id, "Fetching user");
        self.client
            .get(&format!("{}/{}", USERS_ENDPOINT, id), &QueryParams::new())
            .await
    }

    async fn search_users(&self, query: &str, page: PaginationParams) -> Result<UsersResponse> {
        debug!(query = %query, limit = page.limit, skip = page.skip, "Searching users");
        let params = paged(QueryParams::new().with("q", query), page);
        let response: UsersResponse = self
            .client
            .get(&format!("{}/search", USERS_ENDPOINT), &params)
            .await?;
        debug!(results = response.users.len(), total = response.total, "Search complete");
        Ok(response)
    }

    async fn filter_users(
        &self,
        key: FilterKey,
        value: &str,
        page: PaginationParams,
    ) -> Result<UsersResponse> {
        debug!(key = %key, value = %value, limit = page.limit, skip = page.skip, "Filtering users");
        let params = paged(QueryParams::new().with("key", key).with("value", value), page);
        let response: UsersResponse = self
            .client
            .get(&format!("{}/filter", USERS_ENDPOINT), &params)
            .await?;
        debug!(results = response.users.len(), total = response.total, "Filter complete");
        Ok(response)
    }
}
