//! Simplification strategies
//!
//! - `inference`: primary, high-fidelity rewrite through an external
//!   generative-text provider
//! - `fallback`: local rule-based shortener, always available but lossy
//! - `prompt`: instruction and prompt text sent to the provider
//! - `fidelity`: best-effort diagnostics comparing input and rewrite

pub mod fallback;
pub mod fidelity;
pub mod inference;
pub mod prompt;

pub use fallback::FallbackSimplifier;
pub use fidelity::FidelityReport;
pub use inference::InferenceSimplifier;

/// Lowest accepted reading grade.
pub const MIN_GRADE: u8 = 2;
/// Highest accepted reading grade.
pub const MAX_GRADE: u8 = 12;
