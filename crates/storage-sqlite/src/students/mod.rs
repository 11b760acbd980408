//! SQLite storage implementation for students.

mod model;
mod repository;

pub use model::StudentDB;
pub use repository::StudentRepository;

pub(crate) use repository::student_exists;
