/// Summary card shown in the user list
use super::field;
use crate::routes::Route;
use directory_core::format::{capitalize, format_phone_number};
use directory_core::User;

pub fn render_card(user: &User) -> String {
    let lines = [
        format!("{} [{}]", user.display_name(), user.role),
        field("Email", &user.email),
        field("Phone", format_phone_number(&user.phone)),
        field(
            "Location",
            format!("{}, {}", user.address.city, user.address.state),
        ),
        field("Company", &user.company.name),
        format!("  {}, {} years old", capitalize(user.gender.as_str()), user.age),
        field("View Details", Route::User { id: user.id }),
    ];
    lines.join("\n")
}
