//! Serial batch generation.

use crate::error::PipelineError;
use crate::outcome::GeneratedVariant;
use crate::strategy::GeneratorStrategy;
use std::time::Duration;
use variantgen_core::{SourceDocument, Topic};

/// The result of one topic in a batch.
pub struct BatchOutcome {
    /// The topic this outcome belongs to.
    pub topic: Topic,
    /// The generated variant, or why it failed.
    pub result: Result<GeneratedVariant, PipelineError>,
}

/// Generate variants for `topics` one at a time, sleeping `delay`
/// between requests.
///
/// Requests are serialized on purpose: the upstream APIs rate-limit
/// aggressively and one slot of courtesy delay keeps a long batch from
/// tripping them. A failed topic never aborts the batch.
pub async fn run_batch(
    topics: &[Topic],
    tool_type: &str,
    strategy: &dyn GeneratorStrategy,
    source: &SourceDocument,
    delay: Duration,
) -> Vec<BatchOutcome> {
    let mut outcomes = Vec::with_capacity(topics.len());

    for (index, topic) in topics.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        tracing::info!(topic = %topic, index, total = topics.len(), "batch item");
        let result = strategy.generate(topic, tool_type, source).await;
        if let Err(ref err) = result {
            tracing::warn!(topic = %topic, error = %err, "batch item failed");
        }
        outcomes.push(BatchOutcome {
            topic: topic.clone(),
            result,
        });
    }

    outcomes
}
