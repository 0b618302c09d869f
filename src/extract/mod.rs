//! Model-backed extraction of article records from chunks

pub mod openai;
pub mod prompt;

pub use openai::OpenAiClient;

use crate::error::Result;
use async_trait::async_trait;

/// Sends one chunk of reduced markup to a language model
///
/// The response is returned untouched. Callers are expected to feed it to the
/// [`Aggregator`](crate::aggregate::Aggregator).
#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Ask the model for the articles in `chunk`
    async fn extract(&self, chunk: &str) -> Result<String>;

    /// Model identifier used for requests
    fn model(&self) -> &str;
}
