mod components;

mod home;
pub use home::Home;

mod student_dashboard;
pub use student_dashboard::StudentDashboard;

mod enrollment;
pub use enrollment::StudentEnrollment;

mod attendance;
pub use attendance::AttendanceMarking;

mod marks;
pub use marks::InternalMarks;

mod notifications;
pub use notifications::TeacherNotifications;

mod classrooms;
pub use classrooms::{ClassroomAllocation, ClassroomRequests};

mod courses;
pub use courses::CourseApprovals;
