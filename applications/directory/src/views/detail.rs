//! User detail page.

use super::{centred, field, rule};
use directory_client::TransportError;
use directory_core::format::{capitalize, format_birth_date, masked_card_number, masked_ssn};
use directory_core::User;

#[derive(Debug, Clone, Copy)]
pub enum DetailState<'a> {
    Loading,
    Failed(&'a TransportError),
    /// Nothing to show: the id was not a number
    Missing,
    Loaded(&'a User),
}

#[derive(Debug, Clone, Copy)]
pub struct DetailView<'a> {
    pub state: DetailState<'a>,
}

impl<'a> DetailView<'a> {
    pub fn render(&self) -> String {
        match self.state {
            DetailState::Loading => centred("Loading user details..."),
            DetailState::Failed(error) => {
                let message = if error.message.trim().is_empty() {
                    "An unexpected error occurred while loading user details."
                } else {
                    error.message.as_str()
                };
                format!("! Error Loading User\n  {}", message)
            }
            DetailState::Missing => [
                centred("User Not Found"),
                centred("The requested user could not be found."),
            ]
            .join("\n"),
            DetailState::Loaded(user) => render_user(user),
        }
    }
}

fn section(title: &str, lines: Vec<String>) -> String {
    let mut out = vec![title.to_string(), rule('-')];
    out.extend(lines);
    out.join("\n")
}

fn render_user(user: &User) -> String {
    let summary = [
        format!("{} [{}]", user.display_name(), user.role),
        format!("{} at {}", user.company.title, user.company.name),
        field("Email", &user.email),
        field("Phone", &user.phone),
        field("Avatar", &user.image),
    ]
    .join("\n");

    let personal = section(
        "Personal Information",
        vec![
            field(
                "Full Name",
                format!("{} {} {}", user.first_name, user.maiden_name, user.last_name),
            ),
            field("Username", &user.username),
            field("Birth Date", format_birth_date(&user.birth_date)),
            field("Age", format!("{} years old", user.age)),
            field("Gender", capitalize(user.gender.as_str())),
            field("Blood Group", &user.blood_group),
        ],
    );

    let physical = section(
        "Physical Characteristics",
        vec![
            field("Height", format!("{} cm", user.height)),
            field("Weight", format!("{} kg", user.weight)),
            field("Eye Color", capitalize(&user.eye_color)),
            field(
                "Hair",
                capitalize(&format!("{} {}", user.hair.color, user.hair.kind)),
            ),
        ],
    );

    let address = &user.address;
    let contact = section(
        "Contact & Address",
        vec![
            "  Address".to_string(),
            format!("    {}", address.address),
            format!(
                "    {}, {} {}",
                address.city, address.state, address.postal_code
            ),
            format!("    {}", address.country),
            format!(
                "    Coordinates: {}, {}",
                address.coordinates.lat, address.coordinates.lng
            ),
            "  Network Information".to_string(),
            field("IP Address", &user.ip),
            field("MAC Address", &user.mac_address),
        ],
    );

    let company = &user.company;
    let professional = section(
        "Professional Information",
        vec![
            "  Company".to_string(),
            format!("    {}", company.name),
            format!("    {}", company.title),
            format!("    {}", company.department),
            format!("    Company Address: {}", company.address.address),
            format!("    {}, {}", company.address.city, company.address.state),
            field("Education", &user.university),
        ],
    );

    let financial = section(
        "Financial Information",
        vec![
            "  Banking".to_string(),
            field("Card Type", &user.bank.card_type),
            field("Card Number", masked_card_number(&user.bank.card_number)),
            field("Expires", &user.bank.card_expire),
            field("Currency", &user.bank.currency),
            field("IBAN", &user.bank.iban),
            "  Cryptocurrency".to_string(),
            field("Coin", &user.crypto.coin),
            field("Wallet", &user.crypto.wallet),
            field("Network", &user.crypto.network),
        ],
    );

    let security = section(
        "Security Information",
        vec![
            field("EIN", &user.ein),
            field("SSN", masked_ssn(&user.ssn)),
            field("User Agent", &user.user_agent),
        ],
    );

    [
        summary,
        personal,
        physical,
        contact,
        professional,
        financial,
        security,
    ]
    .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::tests::sample_user;

    #[test]
    fn test_sections_and_masking() {
        let user = sample_user(1);
        let view = DetailView {
            state: DetailState::Loaded(&user),
        }
        .render();

        for heading in [
            "Personal Information",
            "Physical Characteristics",
            "Contact & Address",
            "Professional Information",
            "Financial Information",
            "Security Information",
        ] {
            assert!(view.contains(heading), "missing {}", heading);
        }
        assert!(view.contains("Sales Manager at Dooley, Kozey and Cronin"));
        assert!(view.contains("Emily Smith Johnson"));
        assert!(view.contains("5/30/1996"));
        assert!(view.contains("193.24 cm"));
        assert!(view.contains("Brown Curly"));
        assert!(view.contains("**** **** **** 1815"));
        assert!(!view.contains("9289760655481815"));
        assert!(view.contains("***-**-0289"));
        assert!(!view.contains("900-590-289"));
    }

    #[test]
    fn test_missing_user() {
        let view = DetailView {
            state: DetailState::Missing,
        }
        .render();
        assert!(view.contains("User Not Found"));
    }

    #[test]
    fn test_error_uses_message() {
        let error = TransportError::new("User with id '999' not found", 404);
        let view = DetailView {
            state: DetailState::Failed(&error),
        }
        .render();
        assert!(view.contains("Error Loading User"));
        assert!(view.contains("User with id '999' not found"));
    }
}
