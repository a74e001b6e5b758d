use async_trait::async_trait;

use crate::error::AdvisorError;

/// A hosted text-completion model.
///
/// Implementations are stateless per call: no conversation history is kept
/// between invocations.
#[async_trait]
pub trait CompletionModel: Send + Sync + 'static {
    /// Model name, for logs and availability reporting.
    fn name(&self) -> &str;

    /// Send one prompt, return the model's prose answer.
    async fn generate(&self, prompt: &str) -> Result<String, AdvisorError>;
}
