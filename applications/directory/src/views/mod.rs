//! Plain-text views.
//!
//! Every view renders to a `String`; nothing here performs I/O or touches
//! the query layer. Callers decide which state to show.

pub mod card;
pub mod detail;
pub mod filters;
pub mod layout;
pub mod list;
pub mod not_found;
pub mod pagination;

pub use card::render_card;
pub use detail::{DetailState, DetailView};
pub use filters::FilterForm;
pub use layout::{render_layout, Chrome};
pub use list::{ListState, ListView};
pub use not_found::render_not_found;
pub use pagination::{page_window, render_pagination, PageItem};

/// Width of rules and centred headings
pub const WIDTH: usize = 72;

/// `label:` padded to a column, then `value`
pub(crate) fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<16}{}", format!("{}:", label), value)
}

pub(crate) fn rule(ch: char) -> String {
    std::iter::repeat(ch).take(WIDTH).collect()
}

pub(crate) fn centred(text: &str) -> String {
    format!("{:^width$}", text, width = WIDTH).trim_end().to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use directory_core::User;

    pub(crate) fn sample_user(id: u64) -> User {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "firstName": "Emily",
            "lastName": "Johnson",
            "maidenName": "Smith",
            "age": 28,
            "gender": "female",
            "email": "emily.johnson@x.dummyjson.com",
            "phone": "+1 555-010-0199",
            "username": "emilys",
            "password": "emilyspass",
            "birthDate": "1996-5-30",
            "image": "https://dummyjson.com/icon/emilys/128",
            "bloodGroup": "O-",
            "height": 193.24,
            "weight": 63.16,
            "eyeColor": "Green",
            "hair": { "color": "Brown", "type": "Curly" },
            "ip": "42.48.100.32",
            "address": {
                "address": "626 Main Street",
                "city": "Phoenix",
                "state": "Arizona",
                "stateCode": "AZ",
                "postalCode": "29112",
                "coordinates": { "lat": -77.16213, "lng": -92.084824 },
                "country": "United States"
            },
            "macAddress": "47:fa:41:18:ec:eb",
            "university": "University of Wisconsin--Madison",
            "bank": {
                "cardExpire": "03/26",
                "cardNumber": "9289760655481815",
                "cardType": "Elo",
                "currency": "CNY",
                "iban": "YPUXISOBI7TTHPK2BR3HAIXL"
            },
            "company": {
                "department": "Engineering",
                "name": "Dooley, Kozey and Cronin",
                "title": "Sales Manager",
                "address": {
                    "address": "263 Tenth Street",
                    "city": "San Francisco",
                    "state": "Wisconsin",
                    "stateCode": "WI",
                    "postalCode": "37657",
                    "coordinates": { "lat": 71.814525, "lng": -161.150263 },
                    "country": "United States"
                }
            },
            "ein": "977-175",
            "ssn": "900-590-289",
            "userAgent": "Mozilla/5.0 (Windows NT 10.0; Win64; x64)",
            "crypto": {
                "coin": "Bitcoin",
                "wallet": "0xb9fc2fe63b2a6c003f1c324c3bfa53259162181a",
                "network": "Ethereum (ERC20)"
            },
            "role": "admin"
        }))
        .unwrap()
    }
}
