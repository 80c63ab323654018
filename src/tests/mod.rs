pub mod config;
pub mod github;
