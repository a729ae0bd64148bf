//! Core types for quill.

mod outline;
mod record;

pub use outline::{OutlineContent, Section, SkeletonError, StructuralSkeleton};
pub use record::{GeneratedOutline, NewGeneratedOutline, NewSampleOutline, SampleOutline};
