// src/matcher/mod.rs
// =============================================================================
// Whole-word counting.
//
// Submodules:
// - word: the compiled matcher and the incremental scanner fed by workers
//
// A WordMatcher holds no mutable state, so one instance is shared read-only
// by every worker. Each worker creates its own scanner per response.
// =============================================================================

mod word;

pub use word::WordMatcher;
