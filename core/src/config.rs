//! Engine tuning constants.

/// Maximum number of documents returned by a single ranking call.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevance values closer than this are treated as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Number of independently locked shards in the score accumulator.
pub const ACCUMULATOR_SHARD_COUNT: usize = 10;

/// Number of recent requests tracked by [`crate::RequestQueue`] (one per minute of a day).
pub const REQUEST_WINDOW: usize = 1440;
