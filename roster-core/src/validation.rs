//! Field-level validation errors built from `garde` reports.
//!
//! Forms are validated with `garde`; a failing [`garde::Report`] is turned
//! into [`FieldErrors`], which the views use to print a message next to each
//! offending input.

/// A field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of validation errors, at most one per field.
///
/// The first message recorded for a field wins, so rules declared earlier on
/// a field (e.g. "required") take precedence over later ones (e.g. "email").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field` unless one is already present.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.errors.iter().any(|e| e.field == field) {
            return;
        }
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// The message for `field`, if it failed validation.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has(&self, field: &str) -> bool {
        self.first(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn from_report(report: &garde::Report) -> Self {
        let mut errors = FieldErrors::new();
        for (path, error) in report.iter() {
            let field = {
                let s = path.to_string();
                if s.is_empty() { "value".to_string() } else { s }
            };
            errors.add(field, error.message());
        }
        errors
    }
}

/// Run `garde` validation and convert a failure into [`FieldErrors`].
pub fn validate<T>(value: &T) -> Result<(), FieldErrors>
where
    T: garde::Validate,
    T::Context: Default,
{
    value
        .validate()
        .map_err(|report| FieldErrors::from_report(&report))
}

pub use garde::Validate;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(garde::Validate)]
    struct Signup {
        #[garde(length(min = 1))]
        name: String,
        #[garde(email)]
        email: String,
    }

    #[test]
    fn keeps_first_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("email", "The email field is required.");
        errors.add("email", "The email must be a valid email address.");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first("email"), Some("The email field is required."));
    }

    #[test]
    fn converts_garde_report() {
        let form = Signup {
            name: String::new(),
            email: "not-an-email".into(),
        };
        let errors = validate(&form).unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("email"));
        assert!(!errors.has("phone"));
    }

    #[test]
    fn valid_value_passes() {
        let form = Signup {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        assert!(validate(&form).is_ok());
    }
}
