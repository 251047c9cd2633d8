//! Command handlers for the Lockbox CLI.

pub mod misc;
pub mod register;
pub mod shell;
pub mod status;
