//! Business logic services

pub mod courses;
pub mod students;

pub use courses::CourseService;
pub use students::StudentService;
