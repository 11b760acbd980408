//! Students module - domain models, services, and traits.

mod students_constants;
mod students_model;
mod students_service;
mod students_traits;


// Re-export the public interface
pub use students_constants::*;
pub use students_model::{
    BloodType, Gender, NewStudent, Student, StudentDeletion, StudentFields, StudentPatch,
    StudentQuery, StudentSortField, StudentUpdate,
};
pub use students_service::StudentService;
pub use students_traits::{StudentRepositoryTrait, StudentServiceTrait};
