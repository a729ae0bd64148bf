//! Outline storage trait and implementations.

mod memory;

pub use memory::InMemoryOutlineStore;

use crate::error::QuillResult;
use crate::types::{GeneratedOutline, NewGeneratedOutline, NewSampleOutline, SampleOutline};

/// Storage for samples and generated outlines.
///
/// Implementations assign ids from a per-kind counter starting at 1, and
/// list records in creation order.
#[cfg_attr(test, mockall::automock)]
pub trait OutlineStore: Send + Sync {
    /// Store a sample and return it with its id and timestamp.
    fn create_sample(&self, sample: NewSampleOutline) -> QuillResult<SampleOutline>;

    /// Store a generated outline.
    fn create_generated(&self, outline: NewGeneratedOutline) -> QuillResult<GeneratedOutline>;

    /// All samples, oldest first.
    fn list_samples(&self) -> QuillResult<Vec<SampleOutline>>;

    /// Get a sample by id.
    fn get_sample(&self, id: u64) -> QuillResult<SampleOutline>;

    /// Most recently created sample, if any.
    fn latest_sample(&self) -> QuillResult<Option<SampleOutline>>;

    /// Get a generated outline by id.
    fn get_generated(&self, id: u64) -> QuillResult<GeneratedOutline>;

    /// All generated outlines, oldest first.
    fn list_generated(&self) -> QuillResult<Vec<GeneratedOutline>>;

    /// Number of stored samples.
    fn sample_count(&self) -> QuillResult<usize>;
}
