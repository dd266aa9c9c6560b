//! Constants shared across the memo crates

// Environment variable names
pub const MEMO_CACHE_CONFIG_VAR: &str = "MEMO_CACHE_CONFIG";
pub const MEMO_CACHE_NAME_VAR: &str = "MEMO_CACHE_NAME";
pub const MEMO_CACHE_INITIAL_CAPACITY_VAR: &str = "MEMO_CACHE_INITIAL_CAPACITY";
pub const MEMO_CACHE_BACKING_VAR: &str = "MEMO_CACHE_BACKING";
pub const MEMO_CACHE_KEY_POLICY_VAR: &str = "MEMO_CACHE_KEY_POLICY";
pub const MEMO_CACHE_STATISTICS_VAR: &str = "MEMO_CACHE_STATISTICS";

// Defaults
pub const DEFAULT_CACHE_NAME: &str = "memo";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Top-level key of the cache section in a settings file
pub const SETTINGS_SECTION: &str = "cache";
