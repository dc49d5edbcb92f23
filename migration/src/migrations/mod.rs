pub mod m202608250001_create_users;
pub mod m202608250002_create_courses;
pub mod m202608250003_create_course_students;
pub mod m202608250004_create_reviews;
