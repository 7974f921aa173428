// Single source of truth for all default values.

// --- Search ---
/// Depth value meaning "no explicit bound".
pub const UNBOUNDED_DEPTH: i64 = -1;
/// Cap substituted for an unbounded depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;
pub const DEFAULT_DEPTH: i64 = UNBOUNDED_DEPTH;
pub const DEFAULT_VERBOSE: bool = false;
pub const DEFAULT_PARALLEL: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;
pub const LOG_ENV_VAR: &str = "FAS_LOG";
pub const DEFAULT_LOG_FILTER: &str = "fas=info";

// --- Environment overrides ---
pub const ENV_DEPTH: &str = "FAS_DEPTH";
pub const ENV_VERBOSE: &str = "FAS_VERBOSE";
pub const ENV_PARALLEL: &str = "FAS_PARALLEL";
pub const ENV_LOG_LEVEL: &str = "FAS_LOG_LEVEL";
