pub mod api;
pub mod client;
pub mod models;
pub mod projects;
pub mod teams;
pub mod work_items;
