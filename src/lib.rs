//! Yield or Die
//!
//! A right-of-way trainer: decides which car has to yield at a four-way
//! intersection, and scores a player who has to make the same call.

pub mod simulation;
