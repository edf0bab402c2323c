//! Right-of-way simulation
//!
//! This module contains the rules engine that decides which car has to yield
//! at a four-way intersection, plus the game built around it. It has no I/O
//! of its own apart from the text rendering in [`SimWorld`].

mod car;
mod error;
mod game_state;
mod geometry;
mod intersection;
mod priority;
mod types;
mod world;

pub use car::{signal_for, SimCar};
pub use error::RuleError;
pub use game_state::{GameState, PlayerMove, RoundOutcome, SoundCue};
pub use geometry::{needed_corners, paths_intersect, relative_position, resulting_position};
pub use intersection::{PriorityMap, Sign, SignKind, SimIntersection};
pub use priority::{first_conflict, must_yield, PairwiseFacts};
pub use types::{
    CarId, ControlType, Corner, Direction, SimId, TurnSignal, Verdict, VehicleRole,
    CONTROL_TYPE_WEIGHTS, REASON_CAR_ON_RIGHT, REASON_CLEAR, ROAD_COUNT_CHOICES,
};
pub use world::SimWorld;
