mod short_url;

pub use short_url::{validate_short_code, validate_url, validate_validity_minutes};
