// src/services/shortener.rs - Business logic
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use validator::Validate;

use crate::errors::AppError;
use crate::models::{BatchValidation, RowErrors, ShortUrl, UrlFormRow};
use crate::services::CodeGenerator;
use crate::session::SessionStoreTrait;

type Result<T> = std::result::Result<T, AppError>;

#[async_trait]
pub trait ShortenerServiceTrait {
    /// Runs the per-row validation pass; the batch may only be submitted when
    /// every row comes back clean
    fn validate_rows(&self, rows: &[UrlFormRow]) -> BatchValidation;

    /// Shortens a validated batch and stores every entry in the session
    async fn shorten_batch(&self, rows: &[UrlFormRow]) -> Result<Vec<ShortUrl>>;

    /// Returns every entry shortened during this session, oldest first
    async fn session_urls(&self) -> Result<Vec<ShortUrl>>;
    // async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>>;
}

pub struct ShortenerService<S: SessionStoreTrait> {
    store: Arc<S>,
    generator: CodeGenerator,
    default_validity_minutes: i64,
}

impl<S: SessionStoreTrait> ShortenerService<S> {
    pub fn new(store: Arc<S>, generator: CodeGenerator, default_validity_minutes: i64) -> Self {
        Self {
            store,
            generator,
            default_validity_minutes,
        }
    }
}

#[async_trait]
impl<S: SessionStoreTrait + Send + Sync> ShortenerServiceTrait for ShortenerService<S> {
    fn validate_rows(&self, rows: &[UrlFormRow]) -> BatchValidation {
        let row_errors = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                let mut errors = match row.validate() {
                    Ok(()) => RowErrors::default(),
                    Err(e) => RowErrors::from_validation(&e),
                };

                // A code equal to one supplied on an earlier row of the same
                // batch is a duplicate; the duplicate message wins over a
                // pattern error, matching what the form displays
                if let Some(code) = row.custom_code() {
                    let duplicate = rows[..idx]
                        .iter()
                        .filter_map(UrlFormRow::custom_code)
                        .any(|earlier| earlier == code);

                    if duplicate {
                        errors.short_code = Some("Duplicate shortcode".to_string());
                    }
                }

                errors
            })
            .collect();

        BatchValidation { rows: row_errors }
    }

    async fn shorten_batch(&self, rows: &[UrlFormRow]) -> Result<Vec<ShortUrl>> {
        // Field-level gate; callers that skipped validate_rows still get the
        // flattened validation errors back
        for row in rows {
            row.validate()?;
        }

        let validation = self.validate_rows(rows);
        if !validation.is_valid() {
            return Err(AppError::Validation(validation.summary()));
        }

        // Resolve every code before storing anything, so a conflict rejects
        // the whole batch and leaves the session untouched
        let mut taken: HashSet<String> = self.store.codes().await?.into_iter().collect();
        let mut resolved: Vec<(String, bool)> = Vec::with_capacity(rows.len());

        for row in rows {
            let (code, is_custom_code) = match row.custom_code() {
                Some(code) => {
                    // Check if the custom code is already in use
                    if taken.contains(code) {
                        return Err(AppError::Conflict(format!(
                            "Custom short code '{}' is already in use",
                            code
                        )));
                    }
                    (code.to_string(), true)
                }
                None => (self.generator.generate(&taken)?, false),
            };

            taken.insert(code.clone());
            resolved.push((code, is_custom_code));
        }

        let mut created = Vec::with_capacity(rows.len());
        for (row, (code, is_custom_code)) in rows.iter().zip(resolved) {
            let url = ShortUrl::new(
                row.original_url.trim().to_string(),
                code,
                row.validity_minutes(self.default_validity_minutes),
                is_custom_code,
            );

            created.push(self.store.save(&url).await?);
        }

        Ok(created)
    }

    async fn session_urls(&self) -> Result<Vec<ShortUrl>> {
        Ok(self.store.find_all().await?)
    }
}
