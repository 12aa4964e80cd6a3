// Work Items module
pub mod get_work_item;

pub use get_work_item::{GetWorkItemArgs, describe_work_item, get_work_item};
