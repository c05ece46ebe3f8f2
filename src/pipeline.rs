// src/pipeline.rs
// Cache-and-fallback request pipeline

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{derive_key, CacheStore};
use crate::error::InferenceError;
use crate::models::{BatchItem, BatchResultItem};
use crate::simplify::{FallbackSimplifier, InferenceSimplifier};

/// Outcome of resolving one `(text, grade)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplificationResult {
    pub text: String,
    pub from_cache: bool,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub results: Vec<BatchResultItem>,
    pub latency_ms: u64,
}

/// Orchestrates cache lookup, simplifier selection and cache population.
///
/// Without an inference simplifier the pipeline runs in fallback-only mode
/// and the rule-based output is cached like any other result.
pub struct RequestPipeline {
    cache: Arc<dyn CacheStore>,
    inference: Option<InferenceSimplifier>,
    fallback: FallbackSimplifier,
}

impl RequestPipeline {
    pub fn new(cache: Arc<dyn CacheStore>, inference: Option<InferenceSimplifier>) -> Self {
        Self {
            cache,
            inference,
            fallback: FallbackSimplifier::new(),
        }
    }

    pub fn inference_enabled(&self) -> bool {
        self.inference.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.inference.as_ref().map(InferenceSimplifier::model_name)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Single-item flow. An inference failure is returned to the caller,
    /// never replaced by fallback output.
    pub async fn resolve(
        &self,
        text: &str,
        grade: u8,
    ) -> Result<SimplificationResult, InferenceError> {
        let start = Instant::now();
        let key = derive_key(text, grade);

        if let Some(cached) = self.cache.get(&key) {
            info!(grade, key = %key, "Cache HIT");
            return Ok(SimplificationResult {
                text: cached,
                from_cache: true,
                latency_ms: elapsed_ms(start),
            });
        }

        let path = if self.inference.is_some() { "inference" } else { "fallback" };
        info!(grade, key = %key, path, "Cache MISS");
        let simplified = match &self.inference {
            Some(inference) => inference.simplify(text, grade).await?,
            None => self.fallback.simplify(text, grade),
        };

        self.cache.put(key, simplified.clone());

        Ok(SimplificationResult {
            text: simplified,
            from_cache: false,
            latency_ms: elapsed_ms(start),
        })
    }

    /// Batch flow. Items run sequentially and keep input order; an item whose
    /// inference fails gets uncached fallback output and the batch goes on.
    pub async fn resolve_batch(&self, items: &[BatchItem], grade: u8) -> BatchOutcome {
        let start = Instant::now();
        info!(items = items.len(), grade, "Batch request");

        let mut results = Vec::with_capacity(items.len());
        for item in items {
            let text = self.resolve_batch_item(item, grade).await;
            results.push(BatchResultItem {
                id: item.id.clone(),
                text,
            });
        }

        let latency_ms = elapsed_ms(start);
        info!(results = results.len(), latency_ms, "Batch complete");
        BatchOutcome {
            results,
            latency_ms,
        }
    }

    async fn resolve_batch_item(&self, item: &BatchItem, grade: u8) -> String {
        let key = derive_key(&item.text, grade);

        if let Some(cached) = self.cache.get(&key) {
            debug!(id = %item.id, "Batch cache HIT");
            return cached;
        }

        debug!(id = %item.id, "Batch cache MISS");
        let Some(inference) = &self.inference else {
            let simplified = self.fallback.simplify(&item.text, grade);
            self.cache.put(key, simplified.clone());
            return simplified;
        };

        match inference.simplify(&item.text, grade).await {
            Ok(simplified) => {
                self.cache.put(key, simplified.clone());
                simplified
            }
            Err(e) => {
                warn!(id = %item.id, kind = e.kind(), error = %e, "Batch item failed, using fallback");
                self.fallback.simplify(&item.text, grade)
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
