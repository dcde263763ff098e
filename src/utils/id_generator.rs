use rand::{rng, Rng};

// Alphanumeric charset used for generated shortcodes (0-9, A-Z, a-z)
const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Generates a random alphanumeric short code of the requested length
pub fn generate_short_code(length: usize) -> String {
    let mut rng = rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_has_requested_length() {
        assert_eq!(generate_short_code(6).len(), 6);
        assert_eq!(generate_short_code(8).len(), 8);
        assert_eq!(generate_short_code(0).len(), 0);
    }

    #[test]
    fn test_generated_code_is_alphanumeric() {
        let code = generate_short_code(64);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
