//! Address-bar synchronisation for filter state.
//!
//! A location is a path with an optional query string, e.g.
//! `/users?gender=female`. Filter fields travel as the `email`, `gender` and
//! `role` query parameters.

use directory_core::UserFilters;
use std::sync::{Mutex, PoisonError};
use url::form_urlencoded;

/// A navigable location that can be rewritten in place.
pub trait AddressBar: Send + Sync {
    /// Current location (path and optional `?query`)
    fn location(&self) -> String;

    /// Replace the current location without creating a history entry
    fn replace(&self, location: &str);
}

/// Split `location` into its path and query parts.
pub fn split_location(location: &str) -> (&str, Option<&str>) {
    match location.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (location, None),
    }
}

/// Parse filter fields out of a query string.
///
/// Unknown parameters are ignored; malformed gender / role values and empty
/// emails leave the field unset. The first occurrence of a parameter wins.
pub fn filters_from_query(query: &str) -> UserFilters {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = UserFilters::default();
    let mut seen = Vec::with_capacity(3);

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if seen.contains(&key) {
            continue;
        }
        match key.as_ref() {
            "email" => filters.email = value.into_owned(),
            "gender" => filters.gender = value.parse().ok(),
            "role" => filters.role = value.parse().ok(),
            _ => continue,
        }
        seen.push(key);
    }

    filters
}

/// Serialise the non-empty filter fields; empty string when none are set.
pub fn filters_to_query(filters: &UserFilters) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (field, value) in filters.active_pairs() {
        serializer.append_pair(field.as_str(), &value);
    }
    serializer.finish()
}

/// `location` with its query replaced by the serialised `filters`.
///
/// The query is dropped entirely when no filter is set.
pub fn location_with_filters(location: &str, filters: &UserFilters) -> String {
    let (path, _) = split_location(location);
    let query = filters_to_query(filters);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Filters encoded in a full location
pub fn filters_from_location(location: &str) -> UserFilters {
    match split_location(location) {
        (_, Some(query)) => filters_from_query(query),
        (_, None) => UserFilters::default(),
    }
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
}

/// In-memory address bar with a navigation history.
///
/// [`push`](Self::push) adds a history entry, [`AddressBar::replace`]
/// rewrites the current one.
#[derive(Debug)]
pub struct MemoryAddressBar {
    history: Mutex<History>,
}

impl MemoryAddressBar {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![initial.into()],
            }),
        }
    }

    fn with_history<R>(&self, f: impl FnOnce(&mut History) -> R) -> R {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut history)
    }

    /// Navigate to `location`, adding a history entry
    pub fn push(&self, location: impl Into<String>) {
        let location = location.into();
        self.with_history(|h| h.entries.push(location));
    }

    /// Go back one entry; returns the new location, or `None` at the start
    pub fn back(&self) -> Option<String> {
        self.with_history(|h| {
            if h.entries.len() > 1 {
                h.entries.pop();
                h.entries.last().cloned()
            } else {
                None
            }
        })
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.with_history(|h| h.entries.len())
    }
}

impl Default for MemoryAddressBar {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AddressBar for MemoryAddressBar {
    fn location(&self) -> String {
        self.with_history(|h| h.entries.last().cloned().unwrap_or_default())
    }

    fn replace(&self, location: &str) {
        self.with_history(|h| match h.entries.last_mut() {
            Some(current) => *current = location.to_string(),
            None => h.entries.push(location.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_core::{Gender, Role};

    #[test]
    fn test_parse_all_fields() {
        let filters = filters_from_query("email=emily%40x.com&gender=female&role=admin");
        assert_eq!(filters.email, "emily@x.com");
        assert_eq!(filters.gender, Some(Gender::Female));
        assert_eq!(filters.role, Some(Role::Admin));
    }

    #[test]
    fn test_malformed_and_unknown_params_are_unset() {
        let filters = filters_from_query("?gender=robot&role=&page=3&email=");
        assert_eq!(filters, UserFilters::default());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let filters = filters_from_query("role=user&role=admin");
        assert_eq!(filters.role, Some(Role::User));
    }

    #[test]
    fn test_serialise_only_active_fields() {
        assert_eq!(filters_to_query(&UserFilters::default()), "");
        assert_eq!(filters_to_query(&UserFilters::role(Role::Moderator)), "role=moderator");
        assert_eq!(filters_to_query(&UserFilters::email("a b")), "email=a+b");
    }

    #[test]
    fn test_location_with_filters_replaces_query() {
        assert_eq!(
            location_with_filters("/users?email=old&page=2", &UserFilters::gender(Gender::Male)),
            "/users?gender=male"
        );
        assert_eq!(
            location_with_filters("/users?email=old", &UserFilters::default()),
            "/users"
        );
    }

    #[test]
    fn test_memory_address_bar_replace_keeps_history_length() {
        let bar = MemoryAddressBar::new("/users");
        bar.push("/users/3");
        assert_eq!(bar.history_len(), 2);

        bar.replace("/users/3?x=1");
        assert_eq!(bar.history_len(), 2);
        assert_eq!(bar.location(), "/users/3?x=1");

        assert_eq!(bar.back().as_deref(), Some("/users"));
        assert_eq!(bar.back(), None);
        assert_eq!(bar.location(), "/users");
    }
}
