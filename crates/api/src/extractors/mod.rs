//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data.

pub mod id_path;
pub mod user_auth;
pub mod validated_json;

pub use id_path::IdPath;
pub use user_auth::CurrentUser;
pub use validated_json::{JsonBody, ValidatedJson};
