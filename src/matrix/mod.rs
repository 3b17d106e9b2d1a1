//! Travel Matrix Module
//!
//! Bidirectional, traffic-aware distance/duration between one target and a
//! set of landmarks.

mod calculator;

pub use calculator::{Direction, TravelMatrixCalculator, ERROR_DELIMITER};
