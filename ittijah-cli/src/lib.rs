//! ittijah CLI library
//!
//! This library provides the command-line interface for the ittijah
//! text-direction detection engine.

pub mod commands;
pub mod input;
