pub mod id_generator;
pub mod model;

pub use id_generator::{content_seed, IdGenerator};
pub use model::{
    normalized_title, Course, CourseEnrollment, Lesson, LessonContent, Question, Quiz, Section,
};
