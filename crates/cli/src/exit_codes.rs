//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Description                                        |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | CLI usage error (bad args, unknown column)         |
//! | 3    | At least one input had no preview                  |
//! | 4    | I/O error (unreadable file, broken pipe)           |
//! | 5    | Settings or input parse error, invalid settings    |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Some input resolved to no preview. Like `grep`, "nothing found" is not a crash.
pub const EXIT_NO_PREVIEW: u8 = 3;

/// Reading input or writing output failed.
pub const EXIT_IO: u8 = 4;

/// Settings file or CSV could not be parsed, or settings are incomplete.
pub const EXIT_PARSE: u8 = 5;
