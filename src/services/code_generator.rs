use std::collections::HashSet;

use crate::errors::AppError;
use crate::utils::id_generator;

const MAX_RETRIES: usize = 5;
const DEFAULT_CODE_LENGTH: usize = 6;

// Rejection-sampling shortcode generator: draws candidates until one is
// absent from the supplied exclusion set
pub struct CodeGenerator {
    code_length: usize,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    pub fn with_code_length(code_length: usize) -> Self {
        Self { code_length }
    }

    /// Generates a shortcode that is not present in `exclusions`
    ///
    /// ### Errors
    /// * `AppError::Internal` - If no free code was found after bounded retries
    pub fn generate(&self, exclusions: &HashSet<String>) -> Result<String, AppError> {
        for _ in 0..MAX_RETRIES {
            let code = id_generator::generate_short_code(self.code_length);

            if !exclusions.contains(&code) {
                return Ok(code);
            }
        }

        // If we still have collisions after the retries, try a longer code
        // once before giving up
        let longer_code = id_generator::generate_short_code(self.code_length + 2);
        if !exclusions.contains(&longer_code) {
            return Ok(longer_code);
        }

        Err(AppError::Internal(
            "Failed to generate a unique short code after multiple attempts".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_code_of_configured_length() {
        let generator = CodeGenerator::with_code_length(8);
        let code = generator.generate(&HashSet::new()).unwrap();

        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_code_avoids_exclusions() {
        let generator = CodeGenerator::new();
        let mut exclusions = HashSet::new();

        // Grow the exclusion set with each generated code; every draw must
        // still come back fresh
        for _ in 0..50 {
            let code = generator.generate(&exclusions).unwrap();
            assert!(!exclusions.contains(&code));
            exclusions.insert(code);
        }
    }

    #[test]
    fn test_exhausted_single_char_space_falls_back_to_longer_code() {
        // A 1-char code space can be fully excluded, forcing the fallback path
        let generator = CodeGenerator::with_code_length(1);
        let exclusions: HashSet<String> = ('0'..='9')
            .chain('A'..='Z')
            .chain('a'..='z')
            .map(|c| c.to_string())
            .collect();

        let code = generator.generate(&exclusions).unwrap();
        assert_eq!(code.len(), 3);
    }
}
