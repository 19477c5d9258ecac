//! Structured span field names shared by every search.
//!
//! Spans declare these fields as `Empty` and record them on completion with
//! `Span::record`.

/// Exact search: partitions scored.
pub const PARTITIONS_EVALUATED: &str = "partitions_evaluated";

/// Distribution memo hits and misses.
pub const MEMO_HITS: &str = "memo_hits";
pub const MEMO_MISSES: &str = "memo_misses";

/// Edge-cut search: edges scored and edges permanently removed.
pub const EDGES_EVALUATED: &str = "edges_evaluated";
pub const EDGES_REMOVED: &str = "edges_removed";

/// Ant colony: iterations run.
pub const COLONY_ITERATIONS: &str = "colony_iterations";

/// Wall-clock duration of a search in milliseconds.
pub const ELAPSED_MS: &str = "elapsed_ms";
