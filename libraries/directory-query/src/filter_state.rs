//! Filter-state manager.
//!
//! [`FilterStore`] owns the filter form's fields. Edits show up in
//! [`FilterStore::filters`] immediately; the debounced view that drives
//! requests (see [`FilterStore::debounced`]) receives gender and role changes
//! at once and email changes only after the input has been quiet for the
//! debounce window.

use crate::address::{filters_from_location, location_with_filters, AddressBar};
use crate::debounce::Debouncer;
use directory_core::{FilterField, FilterUpdate, UserFilters};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet period before an email edit reaches the debounced view
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Observable filter state with a debounced email field.
///
/// Mutual exclusivity of the fields is not enforced here; see
/// [`UserFilters::disabled`] for what the form disables and
/// [`crate::DirectoryQuery::resolve`] for how conflicting fields resolve.
///
/// Must be created inside a Tokio runtime.
pub struct FilterStore {
    raw: watch::Sender<UserFilters>,
    debounced: Arc<watch::Sender<UserFilters>>,
    email: Debouncer<String>,
    forward: JoinHandle<()>,
    address: Option<Arc<dyn AddressBar>>,
}

impl FilterStore {
    /// Empty filters, not mirrored anywhere
    pub fn new(window: Duration) -> Self {
        Self::build(UserFilters::default(), window, None)
    }

    /// Filters mirrored to `address`.
    ///
    /// The initial state is parsed from the address' current query; unknown
    /// or malformed parameters are ignored.
    pub fn with_address_bar(address: Arc<dyn AddressBar>, window: Duration) -> Self {
        let initial = filters_from_location(&address.location());
        debug!(?initial, "Filters restored from address");
        Self::build(initial, window, Some(address))
    }

    fn build(initial: UserFilters, window: Duration, address: Option<Arc<dyn AddressBar>>) -> Self {
        let (raw, _) = watch::channel(initial.clone());
        let (debounced, _) = watch::channel(initial.clone());
        let debounced = Arc::new(debounced);
        let email = Debouncer::new(initial.email, window);

        let mut email_rx = email.subscribe();
        let view = Arc::clone(&debounced);
        let forward = tokio::spawn(async move {
            while email_rx.changed().await.is_ok() {
                let email = email_rx.borrow_and_update().clone();
                view.send_if_modified(|current| {
                    if current.email == email {
                        false
                    } else {
                        debug!(email = %email, "Debounced email committed");
                        current.email = email;
                        true
                    }
                });
            }
        });

        Self {
            raw,
            debounced,
            email,
            forward,
            address,
        }
    }

    /// Current (non-debounced) filters, as typed
    pub fn filters(&self) -> UserFilters {
        self.raw.borrow().clone()
    }

    /// Filters used for requests
    pub fn debounced(&self) -> UserFilters {
        self.debounced.borrow().clone()
    }

    /// Receiver notified whenever the debounced filters change
    pub fn subscribe(&self) -> watch::Receiver<UserFilters> {
        self.debounced.subscribe()
    }

    /// Set one field; the other fields are left as they are
    pub fn update_filter(&self, update: FilterUpdate) {
        let mut next = self.filters();
        next.apply(update);
        self.commit(next);
    }

    /// Replace every field
    pub fn set_filters(&self, filters: UserFilters) {
        self.commit(filters);
    }

    /// Reset every field to unset
    pub fn clear_filters(&self) {
        self.commit(UserFilters::default());
    }

    /// Computed on the debounced view
    pub fn has_active_filters(&self) -> bool {
        self.debounced.borrow().has_active_filters()
    }

    /// Computed on the debounced view
    pub fn active_filter_count(&self) -> usize {
        self.debounced.borrow().active_filter_count()
    }

    /// Whether the form should disable `field`, judged on the raw filters
    pub fn is_disabled(&self, field: FilterField) -> bool {
        self.raw.borrow().disabled(field)
    }

    /// Wait until the debounced view has caught up with the raw filters.
    pub async fn settle(&self) -> UserFilters {
        let target = self.filters();
        let mut rx = self.debounced.subscribe();
        let settled = match rx.wait_for(|current| *current == target).await {
            Ok(current) => current.clone(),
            Err(_) => self.debounced(),
        };
        settled
    }

    fn commit(&self, next: UserFilters) {
        // Only an email edit restarts the email window
        if next.email != self.raw.borrow().email {
            self.email.push(next.email.clone());
        }
        self.debounced.send_if_modified(|current| {
            let changed = current.gender != next.gender || current.role != next.role;
            current.gender = next.gender;
            current.role = next.role;
            changed
        });

        if let Some(address) = &self.address {
            let location = location_with_filters(&address.location(), &next);
            debug!(location = %location, "Syncing filters to address");
            address.replace(&location);
        }

        self.raw.send_replace(next);
    }
}

impl Drop for FilterStore {
    fn drop(&mut self) {
        self.forward.abort();
    }
}
