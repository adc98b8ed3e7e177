//! Shared constants for end-to-end tests

// ============================================================================
// Test Users
// ============================================================================

/// First test user
pub const USER_A: &str = "user-a";

/// Second test user
pub const USER_B: &str = "user-b";

/// A user nobody ever sends notifications to
pub const UNKNOWN_USER: &str = "nonexistent";

// ============================================================================
// Timeouts
// ============================================================================

/// Per-request timeout for the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

/// Maximum time to wait for a spawned server to answer
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Interval between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Pause between creations when a test needs distinct `created_at` values
pub const CREATION_SPACING_MS: u64 = 5;
