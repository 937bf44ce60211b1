//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod email;
pub mod student;
pub mod course;
pub mod enrollment;
pub mod pagination;

pub use validation::ValidationError;
pub use email::EmailAddress;
pub use student::{NewStudent, Student};
pub use course::{Course, NewCourse};
pub use enrollment::{Enrollment, NewEnrollment};
pub use pagination::{Pagination, PaginationParams};
