use std::sync::Arc;

mod code_generator;
mod shortener;

pub use code_generator::CodeGenerator;
pub use shortener::{ShortenerService, ShortenerServiceTrait};

use crate::config::ShortenerConfig;
use crate::session::InMemorySessionStore;

/// Service wiring for a fresh in-memory session
pub fn build(config: &ShortenerConfig) -> ShortenerService<InMemorySessionStore> {
    let store = Arc::new(InMemorySessionStore::new());
    let generator = CodeGenerator::with_code_length(config.code_length);

    ShortenerService::new(store, generator, config.default_validity_minutes)
}
