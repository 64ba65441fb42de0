pub mod args;
pub mod cli;
pub mod config;
pub mod import;
pub mod ir;
pub mod jira_api;
pub mod operations;
pub mod pipeline;
pub mod upload;

mod terminal;
