//! Error types for the right-of-way engine
//!
//! Every variant is a broken input contract from the code that sets up an
//! intersection. None of them are retried; the caller has to fix its input.

use thiserror::Error;

use super::types::{ControlType, Direction};

/// Errors raised when the engine is handed malformed facts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("Relative position '{value}' is not a valid direction")]
    InvalidDirection { value: String },

    #[error("Turn signal '{value}' is not a valid turn")]
    InvalidTurn { value: String },

    #[error("U-turns are not allowed (source and target are both '{road}')")]
    InvalidManeuver { road: Direction },

    #[error("Intersection type '{value}' is not a valid control type")]
    InvalidControlType { value: String },

    #[error("Invalid road set: {reason}")]
    InvalidRoadSet { reason: String },

    #[error("Invalid priority map for a {control} intersection: {reason}")]
    InvalidPriorityMap { control: ControlType, reason: String },

    #[error("Road '{road}' is not part of this intersection")]
    RoadNotPresent { road: Direction },
}
