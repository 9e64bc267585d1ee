//! The student form as submitted by the browser, and its validated shape.

use chrono::NaiveDate;
use garde::Validate;
use roster_core::validation::{self, FieldErrors};
use serde::Deserialize;

use super::{Address, Student};

/// Input names in display order.
pub const FIELDS: [&str; 10] = [
    "name", "dob", "email", "phone", "line_1", "line_2", "city", "state", "country", "pincode",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw form values. Missing inputs deserialize as empty strings so the form
/// can always be redisplayed with whatever was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct StudentForm {
    #[garde(custom(required))]
    pub name: String,
    #[garde(custom(required), custom(calendar_date))]
    pub dob: String,
    #[garde(custom(required), email)]
    pub email: String,
    #[garde(custom(required))]
    pub phone: String,
    #[garde(custom(required))]
    pub line_1: String,
    #[garde(skip)]
    pub line_2: String,
    #[garde(custom(required))]
    pub city: String,
    #[garde(custom(required))]
    pub state: String,
    #[garde(custom(required))]
    pub country: String,
    #[garde(custom(required))]
    pub pincode: String,
}

fn required(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("This field is required."));
    }
    Ok(())
}

fn calendar_date(value: &str, _ctx: &()) -> garde::Result {
    if value.is_empty() || NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok() {
        return Ok(());
    }
    Err(garde::Error::new("Enter a valid date (YYYY-MM-DD)."))
}

/// A student and address that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: AddressInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInput {
    pub line_1: String,
    pub line_2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

impl StudentForm {
    /// Pre-fill from stored rows (edit form).
    pub fn from_record(student: &Student, address: &Address) -> Self {
        Self {
            name: student.name.clone(),
            dob: student.dob.format(DATE_FORMAT).to_string(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            line_1: address.line_1.clone(),
            line_2: address.line_2.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            country: address.country.clone(),
            pincode: address.pincode.clone(),
        }
    }

    /// Same form with surrounding whitespace stripped from every value.
    pub fn trimmed(self) -> Self {
        fn t(s: String) -> String {
            s.trim().to_string()
        }
        Self {
            name: t(self.name),
            dob: t(self.dob),
            email: t(self.email),
            phone: t(self.phone),
            line_1: t(self.line_1),
            line_2: t(self.line_2),
            city: t(self.city),
            state: t(self.state),
            country: t(self.country),
            pincode: t(self.pincode),
        }
    }

    /// Value of the input called `field` (one of [`FIELDS`]).
    pub fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "dob" => &self.dob,
            "email" => &self.email,
            "phone" => &self.phone,
            "line_1" => &self.line_1,
            "line_2" => &self.line_2,
            "city" => &self.city,
            "state" => &self.state,
            "country" => &self.country,
            "pincode" => &self.pincode,
            _ => "",
        }
    }

    /// Validate and convert into a [`StudentInput`].
    pub fn validated(&self) -> Result<StudentInput, FieldErrors> {
        validation::validate(self)?;
        let dob = NaiveDate::parse_from_str(&self.dob, DATE_FORMAT).map_err(|_| {
            let mut errors = FieldErrors::new();
            errors.add("dob", "Enter a valid date (YYYY-MM-DD).");
            errors
        })?;
        Ok(StudentInput {
            name: self.name.clone(),
            dob,
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: AddressInput {
                line_1: self.line_1.clone(),
                line_2: self.line_2.clone(),
                city: self.city.clone(),
                state: self.state.clone(),
                country: self.country.clone(),
                pincode: self.pincode.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> StudentForm {
        StudentForm {
            name: "Ada Lovelace".into(),
            dob: "1815-12-10".into(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            line_1: "1 Main St".into(),
            line_2: String::new(),
            city: "London".into(),
            state: "LDN".into(),
            country: "UK".into(),
            pincode: "SW1A1AA".into(),
        }
    }

    #[test]
    fn valid_form_converts() {
        let input = ada().validated().unwrap();
        assert_eq!(input.dob, NaiveDate::from_ymd_opt(1815, 12, 10).unwrap());
        assert_eq!(input.address.city, "London");
        assert_eq!(input.address.line_2, "");
    }

    #[test]
    fn every_field_but_line_2_is_required() {
        let errors = StudentForm::default().validated().unwrap_err();
        for field in FIELDS.iter().filter(|f| **f != "line_2") {
            assert_eq!(errors.first(field), Some("This field is required."), "{field}");
        }
        assert!(!errors.has("line_2"));
    }

    #[test]
    fn whitespace_only_is_blank() {
        let form = StudentForm {
            city: "   ".into(),
            ..ada()
        };
        assert!(form.clone().validated().unwrap_err().has("city"));
        assert_eq!(form.trimmed().city, "");
    }

    #[test]
    fn rejects_malformed_email() {
        let form = StudentForm {
            email: "not-an-email".into(),
            ..ada()
        };
        let errors = form.validated().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has("email"));
    }

    #[test]
    fn rejects_impossible_dates() {
        for dob in ["1815-13-10", "1815-02-30", "10/12/1815", "yesterday"] {
            let form = StudentForm {
                dob: dob.into(),
                ..ada()
            };
            let errors = form.validated().unwrap_err();
            assert_eq!(errors.first("dob"), Some("Enter a valid date (YYYY-MM-DD)."), "{dob}");
        }
    }

    #[test]
    fn trimming_strips_every_value() {
        let form = StudentForm {
            name: "  Ada Lovelace ".into(),
            pincode: "\tSW1A1AA\n".into(),
            ..ada()
        }
        .trimmed();
        assert_eq!(form.value("name"), "Ada Lovelace");
        assert_eq!(form.value("pincode"), "SW1A1AA");
        assert_eq!(form.value("unknown"), "");
    }
}
