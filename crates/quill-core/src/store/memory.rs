//! In-memory outline store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::OutlineStore;
use crate::error::{QuillError, QuillResult};
use crate::types::{GeneratedOutline, NewGeneratedOutline, NewSampleOutline, SampleOutline};

#[derive(Debug, Default)]
struct Inner {
    next_sample_id: u64,
    next_generated_id: u64,
    samples: Vec<SampleOutline>,
    generated: Vec<GeneratedOutline>,
}

/// Process-local store. Records live as long as the store.
///
/// Id assignment and insertion share one write lock, so ids are unique
/// and vectors stay sorted by id.
#[derive(Debug, Default)]
pub struct InMemoryOutlineStore {
    inner: RwLock<Inner>,
}

impl InMemoryOutlineStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> QuillResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|e| QuillError::Internal(format!("outline store lock poisoned: {}", e)))
    }

    fn write(&self) -> QuillResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|e| QuillError::Internal(format!("outline store lock poisoned: {}", e)))
    }
}

impl OutlineStore for InMemoryOutlineStore {
    fn create_sample(&self, sample: NewSampleOutline) -> QuillResult<SampleOutline> {
        let mut inner = self.write()?;
        inner.next_sample_id += 1;

        let record = SampleOutline {
            id: inner.next_sample_id,
            owner_id: sample.owner_id,
            name: sample.name,
            media_type: sample.media_type,
            raw_text: sample.raw_text,
            sections: sample.sections,
            structural_skeleton: sample.structural_skeleton,
            created_at: Utc::now(),
        };
        inner.samples.push(record.clone());
        Ok(record)
    }

    fn create_generated(&self, outline: NewGeneratedOutline) -> QuillResult<GeneratedOutline> {
        let mut inner = self.write()?;
        inner.next_generated_id += 1;

        let record = GeneratedOutline {
            id: inner.next_generated_id,
            owner_id: outline.owner_id,
            sample_id: outline.sample_id,
            topic: outline.topic,
            content: outline.content,
            created_at: Utc::now(),
        };
        inner.generated.push(record.clone());
        Ok(record)
    }

    fn list_samples(&self) -> QuillResult<Vec<SampleOutline>> {
        Ok(self.read()?.samples.clone())
    }

    fn get_sample(&self, id: u64) -> QuillResult<SampleOutline> {
        self.read()?
            .samples
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| QuillError::sample_not_found(id))
    }

    fn latest_sample(&self) -> QuillResult<Option<SampleOutline>> {
        Ok(self.read()?.samples.last().cloned())
    }

    fn get_generated(&self, id: u64) -> QuillResult<GeneratedOutline> {
        self.read()?
            .generated
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| QuillError::outline_not_found(id))
    }

    fn list_generated(&self) -> QuillResult<Vec<GeneratedOutline>> {
        Ok(self.read()?.generated.clone())
    }

    fn sample_count(&self) -> QuillResult<usize> {
        Ok(self.read()?.samples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutlineContent, Section, StructuralSkeleton};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn new_sample(name: &str) -> NewSampleOutline {
        NewSampleOutline {
            owner_id: 1,
            name: name.to_string(),
            media_type: "text/plain".to_string(),
            raw_text: "I. Start\none".to_string(),
            sections: vec![Section::new("I. Start", vec!["one".to_string()])],
            structural_skeleton: StructuralSkeleton::new(vec![1]).unwrap(),
        }
    }

    #[test]
    fn test_ids_start_at_one_and_listing_is_ordered() {
        let store = InMemoryOutlineStore::new();
        assert!(store.latest_sample().unwrap().is_none());

        let a = store.create_sample(new_sample("a.txt")).unwrap();
        let b = store.create_sample(new_sample("b.txt")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let names: Vec<_> = store.list_samples().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert_eq!(store.latest_sample().unwrap().unwrap().id, 2);
        assert_eq!(store.sample_count().unwrap(), 2);
    }

    #[test]
    fn test_missing_records_are_not_found() {
        let store = InMemoryOutlineStore::new();
        let err = store.get_sample(7).unwrap_err();
        assert!(matches!(err, QuillError::NotFound { id: Some(7), .. }));
        assert!(store.get_generated(1).is_err());
    }

    #[test]
    fn test_generated_ids_are_independent() {
        let store = InMemoryOutlineStore::new();
        store.create_sample(new_sample("a.txt")).unwrap();
        store.create_sample(new_sample("b.txt")).unwrap();

        let outline = store
            .create_generated(NewGeneratedOutline {
                owner_id: 1,
                sample_id: 2,
                topic: "Rust".to_string(),
                content: OutlineContent {
                    title: "Rust".to_string(),
                    sections: vec![Section::new("I. Introduction to Rust", vec!["x".to_string()])],
                },
            })
            .unwrap();

        assert_eq!(outline.id, 1);
        assert_eq!(store.get_generated(1).unwrap().sample_id, 2);
        assert_eq!(store.list_generated().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_get_unique_ids() {
        let store = Arc::new(InMemoryOutlineStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|i| store.create_sample(new_sample(&format!("{}-{}", t, i))).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 200);

        let listed: Vec<u64> = store.list_samples().unwrap().iter().map(|s| s.id).collect();
        assert_eq!(listed, (1..=200).collect::<Vec<_>>());
    }
}
