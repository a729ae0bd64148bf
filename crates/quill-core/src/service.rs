//! Outline service: ingestion and generation entry points.

use std::sync::Arc;

use quill_extractors::ExtractionPipeline;

use crate::analyzer;
use crate::config::QuillConfig;
use crate::error::{QuillError, QuillResult};
use crate::store::{InMemoryOutlineStore, OutlineStore};
use crate::synthesizer;
use crate::types::{GeneratedOutline, NewGeneratedOutline, NewSampleOutline, SampleOutline};

/// Main entry point: turns uploads into samples and topics into outlines.
pub struct OutlineService {
    config: QuillConfig,
    pipeline: ExtractionPipeline,
    store: Arc<dyn OutlineStore>,
}

impl OutlineService {
    /// Create a service over the given store, with every compiled-in extractor.
    pub fn new(config: QuillConfig, store: Arc<dyn OutlineStore>) -> QuillResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pipeline: ExtractionPipeline::with_defaults(),
            store,
        })
    }

    /// Create a service backed by a fresh in-memory store.
    pub fn in_memory(config: QuillConfig) -> QuillResult<Self> {
        Self::new(config, Arc::new(InMemoryOutlineStore::new()))
    }

    /// Replace the extraction pipeline.
    pub fn with_pipeline(mut self, pipeline: ExtractionPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &QuillConfig {
        &self.config
    }

    /// Ingest an uploaded sample: extract text, recover its skeleton, store it.
    ///
    /// Oversized payloads are rejected before any parsing. Nothing is stored
    /// unless every step succeeds.
    pub async fn ingest(
        &self,
        bytes: &[u8],
        media_type: &str,
        filename: &str,
        owner_id: Option<u64>,
    ) -> QuillResult<SampleOutline> {
        if bytes.len() > self.config.max_upload_bytes {
            tracing::warn!(
                filename,
                size = bytes.len(),
                limit = self.config.max_upload_bytes,
                "Rejecting oversized upload"
            );
            return Err(QuillError::payload_too_large(
                bytes.len(),
                self.config.max_upload_bytes,
            ));
        }

        let content = self.pipeline.extract(bytes, media_type).await.map_err(|e| {
            tracing::warn!(filename, media_type, error = %e, "Extraction failed");
            QuillError::from(e)
        })?;

        let analysis = analyzer::analyze_content(&content).map_err(|e| {
            tracing::warn!(filename, error = %e, "Sample has no recognizable structure");
            e
        })?;

        let sample = self.store.create_sample(NewSampleOutline {
            owner_id: owner_id.unwrap_or(self.config.default_owner_id),
            name: filename.to_string(),
            media_type: content.modality.mime_type().to_string(),
            raw_text: content.text,
            sections: analysis.sections,
            structural_skeleton: analysis.skeleton,
        })?;

        tracing::info!(
            sample_id = sample.id,
            filename,
            modality = %content.modality,
            sections = sample.structural_skeleton.section_count(),
            items = sample.structural_skeleton.total_items(),
            "Ingested sample outline"
        );

        Ok(sample)
    }

    /// Generate an outline for `topic` shaped like the most recent sample.
    pub async fn generate_for_topic(
        &self,
        topic: &str,
        owner_id: Option<u64>,
    ) -> QuillResult<GeneratedOutline> {
        let sample = self.store.latest_sample()?.ok_or_else(|| {
            tracing::warn!("Generation requested with no samples stored");
            QuillError::no_sample()
        })?;
        self.generate(&sample, topic, owner_id)
    }

    /// Generate an outline for `topic` shaped like a specific sample.
    pub async fn generate_from_sample(
        &self,
        sample_id: u64,
        topic: &str,
        owner_id: Option<u64>,
    ) -> QuillResult<GeneratedOutline> {
        let sample = self.store.get_sample(sample_id)?;
        self.generate(&sample, topic, owner_id)
    }

    fn generate(
        &self,
        sample: &SampleOutline,
        topic: &str,
        owner_id: Option<u64>,
    ) -> QuillResult<GeneratedOutline> {
        let content =
            synthesizer::synthesize(topic, &sample.structural_skeleton, &self.config.synthesis)?;

        let outline = self.store.create_generated(NewGeneratedOutline {
            owner_id: owner_id.unwrap_or(self.config.default_owner_id),
            sample_id: sample.id,
            topic: content.title.clone(),
            content,
        })?;

        tracing::info!(
            outline_id = outline.id,
            sample_id = sample.id,
            topic = %outline.topic,
            "Generated outline"
        );

        Ok(outline)
    }

    /// All samples, oldest first.
    pub fn list_samples(&self) -> QuillResult<Vec<SampleOutline>> {
        self.store.list_samples()
    }

    /// Get a sample by id.
    pub fn get_sample(&self, id: u64) -> QuillResult<SampleOutline> {
        self.store.get_sample(id)
    }

    /// Get a generated outline by id.
    pub fn get_generated(&self, id: u64) -> QuillResult<GeneratedOutline> {
        self.store.get_generated(id)
    }

    /// All generated outlines, oldest first.
    pub fn list_generated(&self) -> QuillResult<Vec<GeneratedOutline>> {
        self.store.list_generated()
    }

    /// Number of stored samples.
    pub fn sample_count(&self) -> QuillResult<usize> {
        self.store.sample_count()
    }
}
