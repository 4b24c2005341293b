pub mod projects;
pub mod support;
pub mod teams;
pub mod work_items;
