//! API module for Microsoft Graph and AAD Graph interactions

mod client;
pub mod organization;
pub mod reports;
pub mod users;

pub use client::{GraphClient, HttpConfig};
pub use users::DEFAULT_CONCURRENCY;
