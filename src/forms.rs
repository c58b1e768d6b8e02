use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex_lite::Regex;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .map_or(false, |regex| regex.is_match(email))
}

/// What a character counter next to a text area displays
pub fn character_count(text: &str) -> usize {
    text.chars().count()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    Missing(Field),
    InvalidEmail,
}

impl FieldError {
    pub const fn field(self) -> Field {
        match self {
            Self::Missing(field) => field,
            Self::InvalidEmail => Field::Email,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Missing(Field::Name) => "Please enter your name",
            Self::Missing(Field::Email) => "Please enter your email address",
            Self::Missing(Field::Message) => "Please enter a message",
            Self::InvalidEmail => "Please enter a valid email address",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The errors currently shown next to the form fields, at most one per field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    shown: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn show(&mut self, error: FieldError) {
        self.shown.insert(error.field(), error);
    }

    pub fn hide(&mut self, field: Field) {
        self.shown.remove(&field);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.shown.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.shown.values().copied()
    }
}

/// How a submission attempt ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// Another submission was still in flight
    Ignored,
    Rejected(FieldErrors),
}

/// Which checks a form runs. Both contact forms use the same validator with different rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormRules {
    pub require_name: bool,
    pub require_message: bool,
    /// Whether the values are trimmed before the checks and before being stored
    pub trim_fields: bool,
}

impl FormRules {
    /// The short form on the home page only checks the email
    pub const HOMEPAGE: Self = Self {
        require_name: false,
        require_message: false,
        trim_fields: false,
    };

    pub const CONTACT_PAGE: Self = Self {
        require_name: true,
        require_message: true,
        trim_fields: true,
    };
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.email.trim(), self.message.trim())
    }
}

#[derive(Clone, Debug)]
pub struct FormValidator {
    rules: FormRules,
    errors: FieldErrors,
}

impl FormValidator {
    pub fn new(rules: FormRules) -> Self {
        Self {
            rules,
            errors: FieldErrors::default(),
        }
    }

    pub const fn rules(&self) -> FormRules {
        self.rules
    }

    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Re-checks one field after it loses focus. An empty email isn't complained about here.
    pub fn on_blur(&mut self, field: Field, value: &str) {
        let error = match field {
            Field::Email if !value.is_empty() && !is_valid_email(value) => {
                Some(FieldError::InvalidEmail)
            }
            Field::Name if self.rules.require_name && value.trim().is_empty() => {
                Some(FieldError::Missing(Field::Name))
            }
            Field::Message if self.rules.require_message && value.trim().is_empty() => {
                Some(FieldError::Missing(Field::Message))
            }
            _ => None,
        };
        match error {
            Some(error) => self.errors.show(error),
            None => self.errors.hide(field),
        }
    }

    /// Checks every field the rules ask for. On success returns the values as they should be
    /// stored.
    pub fn validate(&mut self, fields: &ContactFields) -> Result<ContactFields, FieldErrors> {
        if self.rules.require_name {
            self.check(Field::Name, fields.name.trim().is_empty().then(|| {
                FieldError::Missing(Field::Name)
            }));
        }
        let email_error = if self.rules.trim_fields && fields.email.trim().is_empty() {
            Some(FieldError::Missing(Field::Email))
        } else if !is_valid_email(&fields.email) {
            Some(FieldError::InvalidEmail)
        } else {
            None
        };
        self.check(Field::Email, email_error);
        if self.rules.require_message {
            self.check(Field::Message, fields.message.trim().is_empty().then(|| {
                FieldError::Missing(Field::Message)
            }));
        }

        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        Ok(if self.rules.trim_fields {
            fields.trimmed()
        } else {
            fields.clone()
        })
    }

    fn check(&mut self, field: Field, error: Option<FieldError>) {
        match error {
            Some(error) => self.errors.show(error),
            None => self.errors.hide(field),
        }
    }
}
