//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the scene core:
//! - Math types and transforms
//! - Clocks and frame timing
//! - Logging setup

pub mod math;
pub mod time;
pub mod logging;
