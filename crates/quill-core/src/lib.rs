//! quill-core - Core library for quill.
//!
//! This crate recovers the section skeleton of uploaded sample outlines and
//! generates new outlines with exactly the same shape for a given topic.
//!
//! # Example
//!
//! ```ignore
//! use quill_core::{OutlineService, QuillConfig};
//!
//! let service = OutlineService::in_memory(QuillConfig::default())?;
//!
//! // Upload a sample
//! let sample = service.ingest(b"I. Start\none\ntwo\nII. End\nthree", "text/plain", "sample.txt", None).await?;
//!
//! // Generate an outline shaped like it
//! let outline = service.generate_for_topic("Time Management", None).await?;
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod synthesizer;
pub mod types;

// Re-export commonly used types
pub use analyzer::{analyze, analyze_content, Analysis, HeadingSignal};
pub use config::{QuillConfig, SynthesisConfig};
pub use error::{ErrorCode, QuillError, QuillResult};
pub use service::OutlineService;
pub use store::{InMemoryOutlineStore, OutlineStore};
pub use synthesizer::synthesize;
pub use types::{
    GeneratedOutline, NewGeneratedOutline, NewSampleOutline, OutlineContent, SampleOutline,
    Section, SkeletonError, StructuralSkeleton,
};
