// src/session/mod.rs - In-memory session storage
use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;

use crate::errors::SessionError;
use crate::models::ShortUrl;

type Result<T> = std::result::Result<T, SessionError>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStoreTrait {
    /// Saves a shortened URL into the session
    ///
    /// ### Arguments
    /// * `url` - The shortened URL to save
    ///
    /// ### Returns
    /// * `Result<ShortUrl>` - The stored record on success
    ///
    /// ### Errors
    /// * `SessionError::Conflict` - If the shortcode is already taken in the session
    /// * `SessionError::Internal` - If the session state is unusable
    async fn save(&self, url: &ShortUrl) -> Result<ShortUrl>;

    /// Finds a shortened URL by its unique short code
    ///
    /// ### Arguments
    /// * `code` - The short code of the shortened URL to find
    ///
    /// ### Returns
    /// * `Result<Option<ShortUrl>>` - The shortened URL if found, or `None` if not found
    ///
    /// ### Errors
    /// * `SessionError::Internal` - If the session state is unusable
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>>;

    /// Checks whether a short code is already taken in the session
    async fn exists(&self, code: &str) -> Result<bool>;

    /// Returns every session entry, oldest first
    async fn find_all(&self) -> Result<Vec<ShortUrl>>;

    /// Returns every short code currently taken in the session
    async fn codes(&self) -> Result<Vec<String>>;
}

// Implementation holding the session in process memory; everything is
// discarded when the process exits
pub struct InMemorySessionStore {
    urls: RwLock<Vec<ShortUrl>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            urls: RwLock::new(Vec::new()),
        }
    }

    fn read_urls(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<ShortUrl>>> {
        self.urls
            .read()
            .map_err(|_| SessionError::Internal("Session lock poisoned".to_string()))
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStoreTrait for InMemorySessionStore {
    async fn save(&self, url: &ShortUrl) -> Result<ShortUrl> {
        if url.short_code.is_empty() {
            return Err(SessionError::InvalidData(
                "Short code must not be empty".to_string(),
            ));
        }

        let mut urls = self
            .urls
            .write()
            .map_err(|_| SessionError::Internal("Session lock poisoned".to_string()))?;

        // Unique-shortcode invariant for the whole session
        if urls.iter().any(|u| u.short_code == url.short_code) {
            return Err(SessionError::Conflict(format!(
                "Short code '{}' already exists",
                url.short_code
            )));
        }

        urls.push(url.clone());
        debug!("Stored '{}' in session ({} total)", url.short_code, urls.len());

        Ok(url.clone())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>> {
        let urls = self.read_urls()?;
        Ok(urls.iter().find(|u| u.short_code == code).cloned())
    }

    async fn exists(&self, code: &str) -> Result<bool> {
        let urls = self.read_urls()?;
        Ok(urls.iter().any(|u| u.short_code == code))
    }

    async fn find_all(&self) -> Result<Vec<ShortUrl>> {
        let urls = self.read_urls()?;
        Ok(urls.clone())
    }

    async fn codes(&self) -> Result<Vec<String>> {
        let urls = self.read_urls()?;
        Ok(urls.iter().map(|u| u.short_code.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str) -> ShortUrl {
        ShortUrl::new(
            format!("https://example.com/{}", code),
            code.to_string(),
            30,
            false,
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_code() {
        let store = InMemorySessionStore::new();
        let stored = store.save(&record("abc123")).await.unwrap();

        assert_eq!(stored.short_code, "abc123");

        let found = store.find_by_code("abc123").await.unwrap();
        assert_eq!(found.unwrap().original_url, "https://example.com/abc123");
        assert!(store.find_by_code("nope42").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_rejects_empty_code() {
        let store = InMemorySessionStore::new();

        let err = store.save(&record("")).await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidData(_)));
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_code() {
        let store = InMemorySessionStore::new();
        store.save(&record("abc123")).await.unwrap();

        let err = store.save(&record("abc123")).await.unwrap_err();
        assert!(matches!(err, SessionError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = InMemorySessionStore::new();
        store.save(&record("first1")).await.unwrap();
        store.save(&record("second")).await.unwrap();

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].short_code, "first1");
        assert_eq!(all[1].short_code, "second");

        assert_eq!(store.codes().await.unwrap(), vec!["first1", "second"]);
        assert!(store.exists("second").await.unwrap());
        assert!(!store.exists("third3").await.unwrap());
    }
}
