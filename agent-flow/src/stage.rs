use async_trait::async_trait;

use crate::error::Result;

/// One step of a linear pipeline.
///
/// A stage reads a typed view of the accumulated state and returns only the
/// update it owns; merging the update is left to the pipeline, which fixes
/// the order of stages.
#[async_trait]
pub trait Stage: Send + Sync {
    /// The state this stage reads
    type State: Send + Sync;
    /// The partial state this stage produces
    type Update: Send;

    /// Unique identifier for this stage
    fn id(&self) -> &str;

    async fn run(&self, state: &Self::State) -> Result<Self::Update>;
}
