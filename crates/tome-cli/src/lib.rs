//! CLI library components for the tome catalog tools.

#![allow(missing_docs)]

pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
