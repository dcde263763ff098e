use url::Url;

use validator::ValidationError;

/// Validates that a URL string is properly formatted and uses http/https
pub fn validate_url(url_str: &str) -> Result<(), ValidationError> {
    match Url::parse(url_str) {
        Ok(url) => {
            // Ensure URL has a scheme and host
            if url.scheme().is_empty() || url.host().is_none() {
                return Err(ValidationError::new("URL must have a scheme and host"));
            }

            // Only accept HTTP and HTTPS URLs
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ValidationError::new("URL scheme must be http or https"));
            }

            Ok(())
        }
        Err(_) => Err(ValidationError::new("Invalid URL format")),
    }
}

/// Validates that a custom shortcode (if provided) meets requirements:
/// - Between 4-10 characters
/// - Only contains alphanumeric characters
pub fn validate_short_code(code: &str) -> Result<(), ValidationError> {
    // Check length
    if code.len() < 4 || code.len() > 10 {
        let mut err = ValidationError::new("short_code_length");
        err.message = Some("Shortcode must be between 4 and 10 characters".into());
        return Err(err);
    }

    // Ensure it only contains alphanumeric characters
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut err = ValidationError::new("short_code_charset");
        err.message = Some("Shortcode can only contain alphanumeric characters".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a validity window entered as raw form text is a positive
/// whole number of minutes
pub fn validate_validity_minutes(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(()),
        _ => {
            let mut err = ValidationError::new("validity_minutes");
            err.message = Some("Validity must be a positive integer of minutes".into());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        // Valid URLs
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?query=value").is_ok());

        // Invalid URLs
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("ftp://example.com").is_err()); // Not http/https
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_validate_short_code() {
        // Valid shortcodes
        assert!(validate_short_code("abcd").is_ok());
        assert!(validate_short_code("Code123456").is_ok());

        // Invalid shortcodes
        assert!(validate_short_code("abc").is_err()); // Too short
        assert!(validate_short_code("abcdefghijk").is_err()); // Too long
        assert!(validate_short_code("abc-def").is_err()); // Non-alphanumeric
    }

    #[test]
    fn test_validate_validity_minutes() {
        // Valid windows
        assert!(validate_validity_minutes("30").is_ok());
        assert!(validate_validity_minutes(" 1 ").is_ok());

        // Invalid windows
        assert!(validate_validity_minutes("0").is_err());
        assert!(validate_validity_minutes("-5").is_err());
        assert!(validate_validity_minutes("abc").is_err());
        assert!(validate_validity_minutes("2.5").is_err());
    }
}
