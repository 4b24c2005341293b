// Work Items module
pub mod get_work_item_details;
pub mod list_tickets;
pub mod list_work_items;
mod pipeline;

// Re-export the public items
pub use get_work_item_details::{GetWorkItemDetailsArgs, WorkItemIds, get_work_item_details};
pub use list_tickets::{ListTicketsArgs, list_tickets};
pub use list_work_items::{ListWorkItemsArgs, list_work_items};
