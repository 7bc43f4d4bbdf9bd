/// Filter fields for narrowing the user listing
use super::user::{Gender, Role};
use crate::error::ParseFilterError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User-editable filters.
///
/// At most one field is meant to be set at a time, but nothing here enforces
/// it: the form disables the other controls (see [`UserFilters::disabled`]) and
/// query resolution picks email, then gender, then role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserFilters {
    /// Email substring; empty means unset
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Names one of the three filter fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Email,
    Gender,
    Role,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [FilterField::Email, FilterField::Gender, FilterField::Role];

    /// Query-string parameter name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Gender => "gender",
            Self::Role => "role",
        }
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single-field change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Email(String),
    Gender(Option<Gender>),
    Role(Option<Role>),
}

impl FilterUpdate {
    /// The field this update touches
    #[must_use]
    pub fn field(&self) -> FilterField {
        match self {
            Self::Email(_) => FilterField::Email,
            Self::Gender(_) => FilterField::Gender,
            Self::Role(_) => FilterField::Role,
        }
    }

    /// Clearing update for `field`
    #[must_use]
    pub fn clear(field: FilterField) -> Self {
        match field {
            FilterField::Email => Self::Email(String::new()),
            FilterField::Gender => Self::Gender(None),
            FilterField::Role => Self::Role(None),
        }
    }
}

/// Field name accepted by the upstream `/users/filter` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    Gender,
    Role,
}

impl FilterKey {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Role => "role",
        }
    }
}

impl FromStr for FilterKey {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gender" => Ok(Self::Gender),
            "role" => Ok(Self::Role),
            other => Err(ParseFilterError::Key(other.to_string())),
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl UserFilters {
    /// Filters with only the email set
    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// Filters with only the gender set
    #[must_use]
    pub fn gender(gender: Gender) -> Self {
        Self {
            gender: Some(gender),
            ..Self::default()
        }
    }

    /// Filters with only the role set
    #[must_use]
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Set one field, leaving the others untouched
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Email(email) => self.email = email,
            FilterUpdate::Gender(gender) => self.gender = gender,
            FilterUpdate::Role(role) => self.role = role,
        }
    }

    /// Reset every field
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `field` holds a non-empty value
    #[must_use]
    pub fn is_set(&self, field: FilterField) -> bool {
        match field {
            FilterField::Email => !self.email.is_empty(),
            FilterField::Gender => self.gender.is_some(),
            FilterField::Role => self.role.is_some(),
        }
    }

    pub fn has_active_filters(&self) -> bool {
        FilterField::ALL.iter().any(|field| self.is_set(*field))
    }

    pub fn active_filter_count(&self) -> usize {
        FilterField::ALL
            .iter()
            .filter(|field| self.is_set(**field))
            .count()
    }

    /// Whether the form disables the control for `field`.
    ///
    /// A control is disabled while any other field is set. Whitespace-only
    /// email does not count as set here.
    #[must_use]
    pub fn disabled(&self, field: FilterField) -> bool {
        let has_email = !self.email.trim().is_empty();
        let has_gender = self.gender.is_some();
        let has_role = self.role.is_some();

        match field {
            FilterField::Email => has_gender || has_role,
            FilterField::Gender => has_email || has_role,
            FilterField::Role => has_email || has_gender,
        }
    }

    /// Active fields as `(name, value)` pairs, in field order
    #[must_use]
    pub fn active_pairs(&self) -> Vec<(FilterField, String)> {
        let mut pairs = Vec::new();
        if !self.email.is_empty() {
            pairs.push((FilterField::Email, self.email.clone()));
        }
        if let Some(gender) = self.gender {
            pairs.push((FilterField::Gender, gender.to_string()));
        }
        if let Some(role) = self.role {
            pairs.push((FilterField::Role, role.to_string()));
        }
        pairs
    }
}
