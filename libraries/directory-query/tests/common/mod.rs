//! Shared fixtures: an in-memory user directory with call counters.

#![allow(dead_code)]

use async_trait::async_trait;
use directory_client::{Result, TransportError, UserDirectory};
use directory_core::{FilterKey, Gender, PaginationParams, Role, User, UsersResponse};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn user(id: u64, first: &str, gender: Gender, role: Role) -> User {
    let json = serde_json::json!({
        "id": id,
        "firstName": first,
        "lastName": "Tester",
        "maidenName": "",
        "age": 30,
        "gender": gender.as_str(),
        "email": format!("{}@x.dummyjson.com", first.to_lowercase()),
        "phone": "+1 555-010-0199",
        "username": first.to_lowercase(),
        "password": "secret",
        "birthDate": "1994-1-15",
        "image": "https://dummyjson.com/icon/test/128",
        "bloodGroup": "A+",
        "height": 180.5,
        "weight": 75.2,
        "eyeColor": "Blue",
        "hair": { "color": "Black", "type": "Straight" },
        "ip": "10.0.0.1",
        "address": {
            "address": "1 Test Way",
            "city": "Springfield",
            "state": "Illinois",
            "stateCode": "IL",
            "postalCode": "62701",
            "coordinates": { "lat": 39.78, "lng": -89.65 },
            "country": "United States"
        },
        "macAddress": "00:11:22:33:44:55",
        "university": "Test University",
        "bank": {
            "cardExpire": "01/30",
            "cardNumber": "4111111111111111",
            "cardType": "Visa",
            "currency": "USD",
            "iban": "GB00TEST"
        },
        "company": {
            "department": "QA",
            "name": "Acme",
            "title": "Engineer",
            "address": {
                "address": "2 Work Road",
                "city": "Springfield",
                "state": "Illinois",
                "stateCode": "IL",
                "postalCode": "62702",
                "coordinates": { "lat": 39.79, "lng": -89.64 },
                "country": "United States"
            }
        },
        "ein": "12-3456789",
        "ssn": "123-45-6789",
        "userAgent": "Mozilla/5.0",
        "crypto": { "coin": "Bitcoin", "wallet": "0xabc", "network": "Ethereum (ERC20)" },
        "role": role.as_str()
    });
    serde_json::from_value(json).expect("fixture user should deserialize")
}

/// Directory of `count` users; genders alternate, roles cycle admin / moderator / user
pub fn sample_users(count: u64) -> Vec<User> {
    (1..=count)
        .map(|id| {
            let gender = if id % 2 == 0 { Gender::Female } else { Gender::Male };
            let role = Role::ALL[((id - 1) % 3) as usize];
            user(id, &format!("User{}", id), gender, role)
        })
        .collect()
}

#[derive(Default)]
pub struct Calls {
    pub list: AtomicUsize,
    pub get: AtomicUsize,
    pub search: AtomicUsize,
    pub filter: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        self.list.load(Ordering::SeqCst)
            + self.get.load(Ordering::SeqCst)
            + self.search.load(Ordering::SeqCst)
            + self.filter.load(Ordering::SeqCst)
    }
}

/// In-memory [`UserDirectory`].
///
/// Every call sleeps for `delay` (tokio time, so paused clocks apply) and
/// the first `failures` calls fail with a 500.
pub struct FakeDirectory {
    pub users: Vec<User>,
    pub calls: Calls,
    pub delay: Duration,
    failures: AtomicUsize,
}

impl FakeDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            calls: Calls::default(),
            delay: Duration::ZERO,
            failures: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing(self, failures: usize) -> Self {
        self.failures.store(failures, Ordering::SeqCst);
        self
    }

    async fn respond(&self) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(TransportError::new("HTTP Error 500 Internal Server Error", 500));
        }
        Ok(())
    }

    fn page_of(&self, matches: Vec<&User>, page: PaginationParams) -> UsersResponse {
        let total = matches.len() as u64;
        let users = matches
            .into_iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();
        UsersResponse {
            users,
            total,
            skip: page.skip as u64,
            limit: page.limit as u64,
        }
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn list_users(&self, page: PaginationParams) -> Result<UsersResponse> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        Ok(self.page_of(self.users.iter().collect(), page))
    }

    async fn get_user(&self, id: u64) -> Result<User> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| TransportError::new(format!("User with id '{}' not found", id), 404))
    }

    async fn search_users(&self, query: &str, page: PaginationParams) -> Result<UsersResponse> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        let query = query.to_lowercase();
        let matches = self
            .users
            .iter()
            .filter(|user| {
                user.email.to_lowercase().contains(&query)
                    || user.first_name.to_lowercase().contains(&query)
                    || user.last_name.to_lowercase().contains(&query)
            })
            .collect();
        Ok(self.page_of(matches, page))
    }

    async fn filter_users(
        &self,
        key: FilterKey,
        value: &str,
        page: PaginationParams,
    ) -> Result<UsersResponse> {
        self.calls.filter.fetch_add(1, Ordering::SeqCst);
        self.respond().await?;
        let matches = self
            .users
            .iter()
            .filter(|user| match key {
                FilterKey::Gender => user.gender.as_str() == value,
                FilterKey::Role => user.role.as_str() == value,
            })
            .collect();
        Ok(self.page_of(matches, page))
    }
}
