//! Trait abstraction for batched controller input to enable testing

use async_trait::async_trait;

use super::mapper::InputSample;
use crate::error::Result;

/// Source of ordered input batches.
///
/// A call waits until at least one sample is available and returns the
/// samples delivered together, in device order.
#[async_trait]
pub trait SampleSource: Send {
    /// Wait for and return the next non-empty batch.
    async fn next_batch(&mut self) -> Result<Vec<InputSample>>;
}
