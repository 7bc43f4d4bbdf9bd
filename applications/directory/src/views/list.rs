//! User list page.

use super::{card::render_card, centred, filters::FilterForm, pagination::render_pagination};
use directory_client::TransportError;
use directory_core::{page_count, UsersResponse};

/// What the result area shows
#[derive(Debug, Clone, Copy)]
pub enum ListState<'a> {
    Loading,
    Failed(&'a TransportError),
    Loaded(&'a UsersResponse),
}

#[derive(Debug, Clone, Copy)]
pub struct ListView<'a> {
    pub form: FilterForm<'a>,
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub state: ListState<'a>,
}

impl<'a> ListView<'a> {
    pub fn render(&self) -> String {
        let mut blocks = vec![
            [
                centred("User Directory"),
                centred("Browse and search through our user database. Use the filters below"),
                centred("to find specific users by email, gender, or role."),
            ]
            .join("\n"),
            self.form.render(),
        ];

        match self.state {
            ListState::Loading => blocks.push(centred("Loading users...")),
            ListState::Failed(error) => blocks.push(render_error(error)),
            ListState::Loaded(data) if data.is_empty() => blocks.push(self.render_empty()),
            ListState::Loaded(data) => {
                blocks.push(format!(
                    "{:>width$}",
                    format!("Page {} of {}", self.page, page_count(data.total, self.limit)),
                    width = super::WIDTH
                ));
                blocks.extend(data.users.iter().map(render_card));
                if let Some(control) = render_pagination(self.page, data.total, self.limit) {
                    blocks.push(control);
                }
            }
        }

        blocks.join("\n\n")
    }

    fn render_empty(&self) -> String {
        let mut lines = vec![centred("No Users Found")];
        if self.form.has_active {
            lines.push(centred(
                "No users match your current filters. Try adjusting your search criteria.",
            ));
            lines.push(centred("[Clear Filters]"));
        } else {
            lines.push(centred("No users are available at the moment."));
        }
        lines.join("\n")
    }
}

fn render_error(error: &TransportError) -> String {
    let message = if error.message.trim().is_empty() {
        "An unexpected error occurred while loading users."
    } else {
        error.message.as_str()
    };
    format!("! Error Loading Users\n  {}", message)
}
