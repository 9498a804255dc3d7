// Constants module - centralized default values for configuration
//
// This module defines the default values and well-known identifiers used
// throughout the codebase. Retry parameters deliberately have no defaults
// here: callers must state max_retries and pause_time_multiplier explicitly.

// =============================================================================
// Remote API
// =============================================================================

/// Error code the CloudFormation API returns when a request is rate limited
pub const THROTTLING_ERROR_CODE: &str = "Throttling";

// =============================================================================
// Server time defaults
// =============================================================================

/// Endpoint queried for the `Date` header when no endpoint is configured
pub const DEFAULT_SERVER_TIME_ENDPOINT: &str = "https://cloudformation.us-east-1.amazonaws.com";

/// Default server time request timeout in seconds
pub const DEFAULT_SERVER_TIME_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Retry limits
// =============================================================================

/// Upper bound for a single retry pause in seconds
pub const MAX_PAUSE_SECS: f64 = 300.0;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level directive (overridden by RUST_LOG)
pub const DEFAULT_LOG_LEVEL: &str = "info";
