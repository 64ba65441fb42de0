mod auth;
mod client;
mod issues;
mod test_connection;
mod worklogs;

pub use auth::JiraAuth;
pub use client::Jira;
pub use issues::{get_issue, Issue};
pub use test_connection::test_connection;
pub use worklogs::{add_worklog, format_started};

#[cfg(test)]
pub(crate) use client::testutils;
