//! User Directory Client
//!
//! HTTP client library for the user directory REST API.
//!
//! # Features
//!
//! - **Transport**: GET requests against a fixed base URL, ordered query
//!   parameters, non-2xx responses normalised into a [`TransportError`]
//! - **Users**: list, get-by-id, search and filter-by-field operations behind
//!   the [`UserDirectory`] trait
//!
//! # Example
//!
//! ```ignore
//! use directory_client::{ApiClient, ClientConfig, UserDirectory, UserService};
//! use directory_core::PaginationParams;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default())?;
//!     let users = UserService::new(client);
//!
//!     let page = users.list_users(PaginationParams::for_page(1, 12)).await?;
//!     println!("{} users in total", page.total);
//!
//!     let emily = users.get_user(1).await?;
//!     println!("Hello {}", emily.display_name());
//!
//!     Ok(())
//! }
//! ```

mod error;
mod transport;
mod types;
mod users;

// Re-export main types
pub use error::{ClientError, Result, TransportError};
pub use transport::ApiClient;
pub use types::{ClientConfig, QueryParams, DEFAULT_BASE_URL};
pub use users::{UserDirectory, UserService};
