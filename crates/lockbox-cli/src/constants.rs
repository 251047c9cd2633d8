//! Constants used throughout the CLI.

/// Exit codes for different error conditions.
///
/// Standard shell conventions reserve 0 for success, 1 for general
/// errors, and 2 for usage errors (clap handles those). Application
/// codes start at 4 so scripts can tell error classes apart.
pub mod exit_codes {
    /// Input was malformed or refers to something that already exists
    pub const INVALID_INPUT: i32 = 4;

    /// Authentication failed or the account is locked out
    pub const AUTH_FAILED: i32 = 5;
}
