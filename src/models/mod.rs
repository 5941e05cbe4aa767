//! Data models for the directory report endpoints

mod odata;
mod organization;
mod registration;
mod report;
mod user;

pub use odata::ODataResponse;
pub use organization::Organization;
pub use registration::AuthMethodRecord;
pub use report::ReportRow;
pub use user::{SignInActivity, UserDetailRecord};
