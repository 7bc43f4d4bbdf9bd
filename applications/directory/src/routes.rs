//! Location routing.
//!
//! | Location | Route |
//! |---|---|
//! | `/` | redirect to `/users` |
//! | `/users?email=&gender=&role=&page=` | user list |
//! | `/users/:id` | user detail |
//! | anything else | not found |

use directory_core::UserFilters;
use directory_query::{filters_from_query, filters_to_query, split_location};
use std::fmt;
use url::form_urlencoded;

pub const USERS_PATH: &str = "/users";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, which always redirects to the list
    Root,
    Users { filters: UserFilters, page: u32 },
    /// `id` is `0` when the path segment is not a number
    User { id: u64 },
    NotFound { path: String },
}

impl Route {
    pub fn parse(location: &str) -> Self {
        let (path, query) = split_location(location.trim());
        let path = path.trim_end_matches('/');

        if path.is_empty() {
            return Self::Root;
        }

        if path == USERS_PATH {
            let query = query.unwrap_or_default();
            return Self::Users {
                filters: filters_from_query(query),
                page: page_from_query(query),
            };
        }

        match path.strip_prefix("/users/") {
            Some(id) if !id.contains('/') => Self::User {
                id: id.parse().unwrap_or(0),
            },
            _ => Self::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// Where a route is sent before rendering, if anywhere
    pub fn redirect(&self) -> Option<Route> {
        match self {
            Self::Root => Some(Self::Users {
                filters: UserFilters::default(),
                page: 1,
            }),
            _ => None,
        }
    }
}

/// `page` query parameter; anything missing or below 1 is page 1
fn page_from_query(query: &str) -> u32 {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "/"),
            Self::Users { filters, page } => {
                let mut query = filters_to_query(filters);
                if *page > 1 {
                    if !query.is_empty() {
                        query.push('&');
                    }
                    query.push_str(&format!("page={}", page));
                }
                if query.is_empty() {
                    write!(f, "{}", USERS_PATH)
                } else {
                    write!(f, "{}?{}", USERS_PATH, query)
                }
            }
            Self::User { id } => write!(f, "{}/{}", USERS_PATH, id),
            Self::NotFound { path } => write!(f, "{}", path),
        }
    }
}
