pub mod form;
pub mod student;

pub use form::{AddressInput, StudentForm, StudentInput, FIELDS};
pub use student::{Address, Student, StudentRecord, StudentRow};
