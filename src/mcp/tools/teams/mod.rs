// Teams module
pub mod list_teams;

// Re-export the public items
pub use list_teams::{ListTeamsArgs, list_teams};
