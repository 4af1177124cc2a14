//! Data model shared by discovery, classification, rules and reports.

mod authorization;
mod endpoint;
mod enums;
mod finding;
mod scan_result;

pub use authorization::AuthorizationInfo;
pub use endpoint::Endpoint;
pub use enums::{AuthSource, Framework, HttpMethod, SecurityClassification, Severity};
pub use finding::Finding;
pub use scan_result::ScanResult;
