pub mod course;
pub mod course_student;
pub mod review;
pub mod user;

pub use course::Entity as Course;
pub use course_student::Entity as CourseStudent;
pub use review::Entity as Review;
pub use user::Entity as User;
