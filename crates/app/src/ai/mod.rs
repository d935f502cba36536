//! AI enrichment adapter.
//!
//! Text generation is an external collaborator with a strict degradation
//! contract: any failure — missing credential, transport error, unexpected
//! response shape — falls back to a fixed string. Enrichment can never
//! fail a caller.

mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};

use async_trait::async_trait;
use mockall::automock;

/// Fallback description when the generation request fails.
pub const DESCRIBE_FALLBACK: &str = "Check out this amazing product!";

/// Description used when no API key is configured at all.
pub const DESCRIBE_UNAVAILABLE: &str = "AI description unavailable (no API key)";

/// Fallback category when categorization fails or no key is configured.
pub const CATEGORIZE_FALLBACK: &str = "General";

/// Text generation for product copy and content categorization.
#[automock]
#[async_trait]
pub trait Enrichment: Send + Sync {
    /// A short sales description for a product with the given name and
    /// price in minor units.
    async fn describe(&self, product_name: &str, price: u64) -> String;

    /// A single category word for the given content blurb.
    async fn categorize(&self, text: &str) -> String;
}

/// Offline enrichment: always answers with the fixed fallback strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEnrichment;

#[async_trait]
impl Enrichment for StaticEnrichment {
    async fn describe(&self, _product_name: &str, _price: u64) -> String {
        DESCRIBE_FALLBACK.to_string()
    }

    async fn categorize(&self, _text: &str) -> String {
        CATEGORIZE_FALLBACK.to_string()
    }
}
