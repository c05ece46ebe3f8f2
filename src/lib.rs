pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod llm_provider;
pub mod middleware;
pub mod models;
pub mod monitoring;
pub mod pipeline;
pub mod simplify;

pub use pipeline::RequestPipeline;

use std::sync::Arc;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::simplify::InferenceSimplifier;

/// Wires the cache store and the optional inference provider into app state.
pub fn build_state(config: &AppConfig) -> AppState {
    let cache = cache::build_store(config.cache_capacity);
    let inference = llm_provider::build_provider(config)
        .map(|provider| InferenceSimplifier::new(Arc::from(provider)));
    AppState::new(RequestPipeline::new(cache, inference))
}
