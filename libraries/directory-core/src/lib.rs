//! User Directory Core
//!
//! Platform-agnostic domain types shared by the directory client, the query
//! layer and the terminal application.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User` and its nested records, `UsersResponse`
//! - **Filters**: `UserFilters` with the email / gender / role fields
//! - **Pagination**: 1-based pages mapped onto `limit` / `skip`
//! - **Formatters**: pure display helpers (phone numbers, masked numbers)
//!
//! # Example
//!
//! ```rust
//! use directory_core::{FilterUpdate, Gender, PaginationParams, UserFilters};
//!
//! let mut filters = UserFilters::default();
//! filters.apply(FilterUpdate::Gender(Some(Gender::Female)));
//! assert_eq!(filters.active_filter_count(), 1);
//!
//! let page = PaginationParams::for_page(4, 12);
//! assert_eq!(page.skip, 36);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod format;
pub mod types;

pub use error::ParseFilterError;
pub use types::{
    page_count, Address, Bank, Company, Coordinates, Crypto, FilterField, FilterKey,
    FilterUpdate, Gender, Hair, PaginationParams, Role, User, UserFilters, UsersResponse,
    USERS_PER_PAGE,
};
