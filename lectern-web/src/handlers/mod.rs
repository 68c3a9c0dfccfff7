//! HTTP request handlers organized by functionality

pub mod api;
pub mod pages;

// Re-export handler functions
pub use api::{
    CoursesQuery, CreateModuleRequest, api_course, api_course_modules, api_courses,
    api_create_module, api_delete_module, api_module_contents, api_subjects,
};
pub use pages::{PageQuery, course_page};
