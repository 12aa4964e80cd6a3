pub mod planning;
pub mod pull_requests;
pub mod support;
pub mod work_items;
