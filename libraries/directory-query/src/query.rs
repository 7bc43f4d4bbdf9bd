//! Query derivation: which upstream operation serves a filter state.

use directory_client::{Result, UserDirectory};
use directory_core::{FilterKey, PaginationParams, UserFilters, UsersResponse};
use std::fmt;

/// One cacheable listing unit: an upstream operation plus its page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirectoryQuery {
    /// Unfiltered listing
    List { page: PaginationParams },
    /// Free-text search (used for the email filter)
    Search { query: String, page: PaginationParams },
    /// Exact match on a single field
    Filter {
        key: FilterKey,
        value: String,
        page: PaginationParams,
    },
}

impl DirectoryQuery {
    /// Select exactly one operation for `filters`.
    ///
    /// Precedence is email, then gender, then role; a state with several
    /// fields set resolves to the first of them.
    pub fn resolve(filters: &UserFilters, page: PaginationParams) -> Self {
        if !filters.email.is_empty() {
            Self::Search {
                query: filters.email.clone(),
                page,
            }
        } else if let Some(gender) = filters.gender {
            Self::Filter {
                key: FilterKey::Gender,
                value: gender.to_string(),
                page,
            }
        } else if let Some(role) = filters.role {
            Self::Filter {
                key: FilterKey::Role,
                value: role.to_string(),
                page,
            }
        } else {
            Self::List { page }
        }
    }

    pub fn page(&self) -> PaginationParams {
        match self {
            Self::List { page } | Self::Search { page, .. } | Self::Filter { page, .. } => *page,
        }
    }

    /// Run the operation against `directory`
    pub async fn execute(&self, directory: &dyn UserDirectory) -> Result<UsersResponse> {
        match self {
            Self::List { page } => directory.list_users(*page).await,
            Self::Search { query, page } => directory.search_users(query, *page).await,
            Self::Filter { key, value, page } => directory.filter_users(*key, value, *page).await,
        }
    }
}

impl fmt::Display for DirectoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List { page } => write!(f, "list(limit={}, skip={})", page.limit, page.skip),
            Self::Search { query, page } => write!(
                f,
                "search(q={:?}, limit={}, skip={})",
                query, page.limit, page.skip
            ),
            Self::Filter { key, value, page } => write!(
                f,
                "filter({}={}, limit={}, skip={})",
                key, value, page.limit, page.skip
            ),
        }
    }
}
