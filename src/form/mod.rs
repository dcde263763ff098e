// src/form/mod.rs - Terminal form driver
use std::io::{BufRead, Write};

use crate::config::ShortenerConfig;
use crate::errors::AppError;
use crate::logging::{LogClient, LogLevel, LogPackage, LogStack};
use crate::models::{BatchValidation, ShortUrlView, UrlFormRow};
use crate::services::{ShortenerService, ShortenerServiceTrait};
use crate::session::InMemorySessionStore;
use crate::types::Result;

pub type ShortenerServiceType = ShortenerService<InMemorySessionStore>;

/// Interactive form session over the shortener service. Reads batches of up
/// to `max_batch_rows` rows, surfaces per-field errors, and displays every
/// entry shortened so far after each successful submit.
pub struct Form<'a> {
    service: &'a ShortenerServiceType,
    logger: &'a LogClient,
    max_batch_rows: usize,
    base_url: String,
}

impl<'a> Form<'a> {
    pub fn new(
        service: &'a ShortenerServiceType,
        logger: &'a LogClient,
        config: &ShortenerConfig,
    ) -> Self {
        Self {
            service,
            logger,
            max_batch_rows: config.max_batch_rows,
            base_url: config.base_url.clone(),
        }
    }

    /// Runs form batches until the user quits (blank first row) or declines
    /// another batch
    pub async fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        writeln!(out, "URL Shortener")?;
        writeln!(out)?;

        loop {
            let rows = self.read_batch(input, out)?;
            if rows.is_empty() {
                break;
            }

            let validation = self.service.validate_rows(&rows);
            if !validation.is_valid() {
                self.logger
                    .log(
                        LogStack::Frontend,
                        LogLevel::Warn,
                        LogPackage::Component,
                        "Validation failed on URL Shortener form submit.",
                    )
                    .await;

                self.render_errors(out, &validation)?;
                writeln!(out, "Re-enter the batch.")?;
                continue;
            }

            self.logger
                .log(
                    LogStack::Frontend,
                    LogLevel::Info,
                    LogPackage::Component,
                    "URL Shortener form validation succeeded.",
                )
                .await;

            match self.service.shorten_batch(&rows).await {
                Ok(created) => {
                    self.logger
                        .log(
                            LogStack::Frontend,
                            LogLevel::Info,
                            LogPackage::Component,
                            &format!("Shortened {} URLs successfully.", created.len()),
                        )
                        .await;

                    writeln!(out, "URLs shortened successfully!")?;
                    self.render_session(out).await?;
                }
                // A custom code clashing with an earlier session entry rejects
                // the batch; let the user re-enter it
                Err(AppError::Conflict(msg)) => {
                    writeln!(out, "{}", msg)?;
                    writeln!(out, "Re-enter the batch.")?;
                    continue;
                }
                Err(e) => return Err(e),
            }

            if !self.prompt_yes_no(input, out, "Shorten another batch? [y/N]: ")? {
                break;
            }
        }

        Ok(())
    }

    // Reads up to max_batch_rows rows; a blank URL ends the batch early
    fn read_batch<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<Vec<UrlFormRow>> {
        let mut rows = Vec::new();

        while rows.len() < self.max_batch_rows {
            writeln!(out, "Row {}", rows.len() + 1)?;

            let url = self.prompt(input, out, "  Original URL (blank to finish): ")?;
            if url.trim().is_empty() {
                break;
            }

            let validity = self.prompt(input, out, "  Validity in minutes (blank for default): ")?;
            let code = self.prompt(input, out, "  Custom shortcode (blank to generate): ")?;

            rows.push(UrlFormRow::from_input(&url, &validity, &code));

            if rows.len() < self.max_batch_rows
                && !self.prompt_yes_no(input, out, "Add another URL? [y/N]: ")?
            {
                break;
            }
        }

        Ok(rows)
    }

    fn render_errors<W: Write>(&self, out: &mut W, validation: &BatchValidation) -> Result<()> {
        for (idx, errors) in validation.rows.iter().enumerate() {
            if errors.is_clean() {
                continue;
            }

            writeln!(out, "Row {}:", idx + 1)?;
            if let Some(msg) = &errors.original_url {
                writeln!(out, "  Original URL: {}", msg)?;
            }
            if let Some(msg) = &errors.validity {
                writeln!(out, "  Validity: {}", msg)?;
            }
            if let Some(msg) = &errors.short_code {
                writeln!(out, "  Shortcode: {}", msg)?;
            }
        }

        Ok(())
    }

    async fn render_session<W: Write>(&self, out: &mut W) -> Result<()> {
        let urls = self.service.session_urls().await?;

        writeln!(out)?;
        writeln!(out, "Shortened URLs")?;
        for record in &urls {
            let view = ShortUrlView::from_record(&self.base_url, record);
            let status = if record.is_valid() { "" } else { " [expired]" };
            writeln!(
                out,
                "{} (expires: {}){} -> {}",
                view.short_url,
                view.expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
                status,
                view.original_url
            )?;
        }
        writeln!(out)?;

        Ok(())
    }

    fn prompt<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        label: &str,
    ) -> Result<String> {
        write!(out, "{}", label)?;
        out.flush()?;

        let mut buf = String::new();
        input.read_line(&mut buf)?;

        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_yes_no<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        label: &str,
    ) -> Result<bool> {
        let answer = self.prompt(input, out, label)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogApiConfig;
    use crate::services;
    use std::io::Cursor;

    fn config() -> ShortenerConfig {
        ShortenerConfig {
            max_batch_rows: 5,
            code_length: 6,
            default_validity_minutes: 30,
            base_url: "http://localhost:3000".to_string(),
        }
    }

    fn disabled_logger() -> LogClient {
        LogClient::new(&LogApiConfig {
            url: None,
            token: None,
        })
    }

    async fn run_form(lines: &[&str]) -> String {
        let shortener_config = config();
        let service = services::build(&shortener_config);
        let logger = disabled_logger();
        let form = Form::new(&service, &logger, &shortener_config);

        let mut input = Cursor::new(format!("{}\n", lines.join("\n")));
        let mut out = Vec::new();
        form.run(&mut input, &mut out).await.unwrap();

        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_single_row_batch_displays_short_link() {
        let output = run_form(&["https://example.com", "", "", "n", "n"]).await;

        assert!(output.contains("URLs shortened successfully!"));
        assert!(output.contains("http://localhost:3000/"));
        assert!(output.contains("expires:"));
        assert!(output.contains("-> https://example.com"));
    }

    #[tokio::test]
    async fn test_invalid_row_shows_field_errors_and_blocks_submit() {
        let output = run_form(&["not-a-url", "0", "a!", "n", ""]).await;

        assert!(output.contains("Enter a valid URL"));
        assert!(output.contains("Re-enter the batch."));
        assert!(!output.contains("URLs shortened successfully!"));
    }

    #[tokio::test]
    async fn test_duplicate_shortcodes_block_submit() {
        let output = run_form(&[
            "https://example.com",
            "",
            "abcd",
            "y",
            "https://example.org",
            "",
            "abcd",
            "n",
            "",
        ])
        .await;

        assert!(output.contains("Duplicate shortcode"));
        assert!(!output.contains("URLs shortened successfully!"));
    }

    #[tokio::test]
    async fn test_session_accumulates_across_batches() {
        let output = run_form(&[
            "https://example.com",
            "",
            "",
            "n",
            "y",
            "https://example.org",
            "",
            "",
            "n",
            "n",
        ])
        .await;

        // First render shows one link, second shows both session entries
        assert_eq!(output.matches("http://localhost:3000/").count(), 3);
        assert!(output.contains("-> https://example.org"));
    }

    #[tokio::test]
    async fn test_batch_caps_at_configured_max_rows() {
        let output = run_form(&[
            "https://one.example.com", "", "", "y",
            "https://two.example.com", "", "", "y",
            "https://three.example.com", "", "", "y",
            "https://four.example.com", "", "", "y",
            "https://five.example.com", "", "",
            // no add-another prompt after the fifth row
            "n",
        ])
        .await;

        assert_eq!(output.matches("http://localhost:3000/").count(), 5);
    }
}
