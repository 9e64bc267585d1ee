use chrono::{NaiveDate, NaiveDateTime};
use roster_data::DataError;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub phone: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Mailing address; exactly one per student.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    pub id: i64,
    pub student_id: i64,
    pub line_1: String,
    pub line_2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

/// A student together with its address, as read through the join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    pub student: Student,
    pub address: Option<Address>,
}

impl StudentRecord {
    /// Split into student and address, failing if the address row is gone.
    pub fn require_address(self) -> Result<(Student, Address), DataError> {
        match self.address {
            Some(address) => Ok((self.student, address)),
            None => Err(DataError::Integrity(format!(
                "student {} has no address",
                self.student.id
            ))),
        }
    }
}

/// Flat `students LEFT JOIN addresses` row.
#[derive(Debug, sqlx::FromRow)]
pub struct StudentRow {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub email: String,
    pub phone: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub address_id: Option<i64>,
    pub line_1: Option<String>,
    pub line_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub pincode: Option<String>,
}

impl StudentRow {
    pub const SELECT: &'static str = "SELECT s.id, s.name, s.dob, s.email, s.phone, \
         s.created_at, s.updated_at, a.id AS address_id, a.line_1, a.line_2, \
         a.city, a.state, a.country, a.pincode \
         FROM students s LEFT JOIN addresses a ON a.student_id = s.id";

    pub fn into_record(self) -> StudentRecord {
        let address = self.address_id.map(|address_id| Address {
            id: address_id,
            student_id: self.id,
            line_1: self.line_1.unwrap_or_default(),
            line_2: self.line_2.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            country: self.country.unwrap_or_default(),
            pincode: self.pincode.unwrap_or_default(),
        });
        StudentRecord {
            student: Student {
                id: self.id,
                name: self.name,
                dob: self.dob,
                email: self.email,
                phone: self.phone,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(address_id: Option<i64>) -> StudentRow {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        StudentRow {
            id: 7,
            name: "Ada Lovelace".into(),
            dob: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            created_at: at,
            updated_at: at,
            address_id,
            line_1: address_id.map(|_| "1 Main St".into()),
            line_2: address_id.map(|_| String::new()),
            city: address_id.map(|_| "London".into()),
            state: address_id.map(|_| "LDN".into()),
            country: address_id.map(|_| "UK".into()),
            pincode: address_id.map(|_| "SW1A1AA".into()),
        }
    }

    #[test]
    fn joined_row_carries_address() {
        let record = row(Some(3)).into_record();
        let (student, address) = record.require_address().unwrap();
        assert_eq!(student.id, 7);
        assert_eq!(address.student_id, 7);
        assert_eq!(address.city, "London");
    }

    #[test]
    fn missing_address_is_integrity_error() {
        let record = row(None).into_record();
        assert!(record.address.is_none());
        assert!(matches!(
            record.require_address(),
            Err(DataError::Integrity(msg)) if msg.contains("student 7")
        ));
    }
}
