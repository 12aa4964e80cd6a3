pub mod client;
pub mod models;
pub mod pull_requests;
pub mod sources;
pub mod work_items;
