//! User Directory Query Layer
//!
//! Everything between the filter form and the HTTP client:
//!
//! - [`FilterStore`]: user-editable filters with a debounced, observable view
//!   and optional address-bar synchronisation
//! - [`DirectoryQuery`]: picks exactly one upstream operation for a filter
//!   state and page
//! - [`QueryCache`]: per-unit request de-duplication, stale-while-revalidate,
//!   retry and time-based eviction
//! - [`UserQueries`]: the orchestrator tying the above to a [`UserDirectory`]
//!
//! [`UserDirectory`]: directory_client::UserDirectory

pub mod address;
pub mod cache;
pub mod debounce;
pub mod filter_state;
pub mod orchestrator;
pub mod query;

pub use address::{
    filters_from_location, filters_from_query, filters_to_query, location_with_filters,
    split_location, AddressBar, MemoryAddressBar,
};
pub use cache::{CacheOptions, QueryCache, QuerySnapshot, QueryStatus};
pub use debounce::Debouncer;
pub use filter_state::{FilterStore, DEFAULT_DEBOUNCE};
pub use orchestrator::UserQueries;
pub use query::DirectoryQuery;
