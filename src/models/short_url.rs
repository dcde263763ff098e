// src/models/short_url.rs - Pure data structures
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::validations::{validate_short_code, validate_url, validate_validity_minutes};

// DTO for a single row of the shortener form, holding raw (trimmed) input
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UrlFormRow {
    #[validate(custom(function = "validate_url"))]
    pub original_url: String,

    // Raw text so a non-numeric entry surfaces as a field error, not a parse panic
    #[validate(custom(function = "validate_validity_minutes"))]
    pub validity: Option<String>,

    #[validate(custom(function = "validate_short_code"))]
    pub short_code: Option<String>,
}

impl UrlFormRow {
    /// Builds a row from raw form input, trimming every field and mapping
    /// blank optional fields to `None`
    pub fn from_input(original_url: &str, validity: &str, short_code: &str) -> Self {
        let non_blank = |s: &str| {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        Self {
            original_url: original_url.trim().to_string(),
            validity: non_blank(validity),
            short_code: non_blank(short_code),
        }
    }

    /// The validity window in minutes, or `default` when the field was left blank.
    /// Only meaningful after validation has passed.
    pub fn validity_minutes(&self, default: i64) -> i64 {
        self.validity
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(default)
    }

    /// The custom shortcode, if one was supplied
    pub fn custom_code(&self) -> Option<&str> {
        self.short_code.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Per-field validation errors for a single form row. A `None` field is clean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowErrors {
    pub original_url: Option<String>,
    pub validity: Option<String>,
    pub short_code: Option<String>,
}

impl RowErrors {
    pub fn is_clean(&self) -> bool {
        self.original_url.is_none() && self.validity.is_none() && self.short_code.is_none()
    }

    /// Maps validator output onto the per-field error set, falling back to the
    /// form's display messages when a validator carried no message of its own
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut row = RowErrors::default();

        for (field, errs) in errors.field_errors() {
            let message = errs
                .iter()
                .filter_map(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .next();

            let name: &str = field.as_ref();
            match name {
                "original_url" => {
                    row.original_url = Some(message.unwrap_or_else(|| "Enter a valid URL".to_string()))
                }
                "validity" => {
                    row.validity =
                        Some(message.unwrap_or_else(|| "Enter a positive integer".to_string()))
                }
                "short_code" => {
                    row.short_code =
                        Some(message.unwrap_or_else(|| "Alphanumeric, 4-10 chars".to_string()))
                }
                _ => {}
            }
        }

        row
    }
}

/// Outcome of the per-row validation pass over a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchValidation {
    pub rows: Vec<RowErrors>,
}

impl BatchValidation {
    pub fn is_valid(&self) -> bool {
        self.rows.iter().all(RowErrors::is_clean)
    }

    /// Flattens every field error into a single message, row-numbered for display
    pub fn summary(&self) -> String {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, errors)| !errors.is_clean())
            .map(|(idx, errors)| {
                let fields = [
                    ("original_url", &errors.original_url),
                    ("validity", &errors.validity),
                    ("short_code", &errors.short_code),
                ]
                .iter()
                .filter_map(|(field, msg)| msg.as_ref().map(|m| format!("{}: {}", field, m)))
                .collect::<Vec<_>>()
                .join(", ");
                format!("row {}: {}", idx + 1, fields)
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Represents a shortened URL held in the current in-memory session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortUrl {
    /// The unique ID of the shortened URL
    pub id: Uuid,

    /// The original, long URL that was shortened
    pub original_url: String,

    /// The short code that identifies this URL within the session
    pub short_code: String,

    /// The validity window this entry was created with, in minutes
    pub validity_minutes: i64,

    /// When this shortened URL was created
    pub created_at: DateTime<Utc>,

    /// When this shortened URL expires
    pub expires_at: DateTime<Utc>,

    /// Number of times this shortened URL has been followed. There is no
    /// resolution service, so this stays at zero for the session's lifetime.
    pub click_count: i64,

    /// Recorded clicks; stays empty for the same reason
    pub clicks: Vec<ClickEvent>,

    /// Indicates whether the short code was custom or auto-generated
    pub is_custom_code: bool,
}

impl ShortUrl {
    pub fn new(
        original_url: String,
        short_code: String,
        validity_minutes: i64,
        is_custom_code: bool,
    ) -> Self {
        let created_at = Utc::now();

        Self {
            id: Uuid::new_v4(),
            original_url,
            short_code,
            validity_minutes,
            created_at,
            expires_at: created_at + Duration::minutes(validity_minutes),
            click_count: 0,
            clicks: Vec::new(),
            is_custom_code,
        }
    }

    /// Checks if the shortened URL has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Convenience method to check if the URL is still valid (not expired)
    pub fn is_valid(&self) -> bool {
        !self.is_expired()
    }
}

/// A recorded click on a short link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickEvent {
    pub clicked_at: DateTime<Utc>,
    pub referrer: Option<String>,
}

// Display projection with the full short link joined onto the base URL
#[derive(Debug, Clone, Serialize)]
pub struct ShortUrlView {
    pub short_url: String,
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: i64,
}

impl ShortUrlView {
    pub fn from_record(base_url: &str, record: &ShortUrl) -> Self {
        ShortUrlView {
            short_url: format!("{}/{}", base_url.trim_end_matches('/'), record.short_code),
            short_code: record.short_code.clone(),
            original_url: record.original_url.clone(),
            created_at: record.created_at,
            expires_at: record.expires_at,
            click_count: record.click_count,
        }
    }
}
