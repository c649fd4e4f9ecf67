//! Persistence module split across logical submodules. Every function takes
//! an explicit `&Connection` owned by the caller; there is no global handle.

mod connection;
mod courses;
mod enrollments;
mod error;
mod people;
mod reports;

pub use connection::{initialize, open_store};
pub use courses::{assign_teacher, create_course, delete_course, fetch_courses, update_course};
pub use enrollments::{enroll, fetch_roster, unenroll, RosterEntry};
pub use error::StoreError;
pub use people::{create_person, delete_person, fetch_people, update_person};
pub use reports::{
    course_student_rows, student_course_rows, summary, teacher_course_rows, CourseStudentRow,
    StudentCourseRow, Summary, TeacherCourseRow,
};
