/// Filter form: one control per field, active count and chips
use directory_core::{FilterField, UserFilters};

/// Form state as shown to the user.
///
/// `filters` are the values as typed; `has_active` and `active_count` come
/// from the debounced filters so they agree with the results on screen.
#[derive(Debug, Clone, Copy)]
pub struct FilterForm<'a> {
    pub filters: &'a UserFilters,
    pub has_active: bool,
    pub active_count: usize,
}

impl<'a> FilterForm<'a> {
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        let mut heading = String::from("Filters");
        if self.active_count > 0 {
            heading.push_str(&format!(" ({} active)", self.active_count));
        }
        if self.has_active {
            heading.push_str("  [Clear All]");
        }
        lines.push(heading);

        for field in FilterField::ALL {
            lines.push(self.control(field));
        }

        if self.has_active {
            let chips: Vec<String> = self
                .filters
                .active_pairs()
                .into_iter()
                .map(|(field, value)| format!("{}: {} [x]", chip_label(field), value))
                .collect();
            if !chips.is_empty() {
                lines.push(format!("  Active: {}", chips.join("  ")));
            }
        }

        lines.join("\n")
    }

    fn control(&self, field: FilterField) -> String {
        let disabled = self.filters.disabled(field);
        let label = match field {
            FilterField::Email => "Search by Email",
            FilterField::Gender => "Gender",
            FilterField::Role => "Role",
        };
        let label = if disabled {
            format!("{} (disabled)", label)
        } else {
            label.to_string()
        };

        let value = match field {
            FilterField::Email if disabled => "Clear other filters to enable".to_string(),
            FilterField::Email if self.filters.email.is_empty() => "Enter email address".to_string(),
            FilterField::Email => self.filters.email.clone(),
            _ if disabled => "Clear other filters".to_string(),
            FilterField::Gender => self
                .filters
                .gender
                .map_or_else(|| "All Genders".to_string(), |g| g.to_string()),
            FilterField::Role => self
                .filters
                .role
                .map_or_else(|| "All Roles".to_string(), |r| r.to_string()),
        };

        format!("  {:<26}{}", format!("{}:", label), value)
    }
}

fn chip_label(field: FilterField) -> &'static str {
    match field {
        FilterField::Email => "Email",
        FilterField::Gender => "Gender",
        FilterField::Role => "Role",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use directory_core::Gender;

    #[test]
    fn test_empty_form() {
        let filters = UserFilters::default();
        let form = FilterForm {
            filters: &filters,
            has_active: false,
            active_count: 0,
        };
        let view = form.render();
        assert!(view.starts_with("Filters\n"));
        assert!(view.contains("Enter email address"));
        assert!(view.contains("All Genders"));
        assert!(view.contains("All Roles"));
        assert!(!view.contains("disabled"));
        assert!(!view.contains("Clear All"));
    }

    #[test]
    fn test_active_gender_disables_others() {
        let filters = UserFilters::gender(Gender::Female);
        let form = FilterForm {
            filters: &filters,
            has_active: true,
            active_count: 1,
        };
        let view = form.render();
        assert!(view.contains("Filters (1 active)  [Clear All]"));
        assert!(view.contains("Search by Email (disabled):"));
        assert!(view.contains("Role (disabled):"));
        assert!(view.contains("Gender:"));
        assert!(view.contains("Active: Gender: female [x]"));
    }

    #[test]
    fn test_typed_email_before_debounce_shows_no_chips() {
        let filters = UserFilters::email("emi");
        let form = FilterForm {
            filters: &filters,
            has_active: false,
            active_count: 0,
        };
        let view = form.render();
        assert!(view.contains("emi"));
        assert!(!view.contains("Active:"));
        assert!(view.contains("Role (disabled):"));
    }
}
