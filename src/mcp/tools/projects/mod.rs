// Projects module
pub mod list_projects;

// Re-export the public items
pub use list_projects::{ListProjectsArgs, list_projects};
