pub mod azure;
pub mod config;
pub mod mcp;
pub mod planner;
pub mod server;
