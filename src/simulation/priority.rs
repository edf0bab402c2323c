//! Right-of-way resolution between two cars
//!
//! A check only ever looks at one pair of cars. A car has to stop if any
//! single pair check says so; see [`first_conflict`].
//!
//! Cases covered, per pair: my priority (2) x my turn (3) x other priority (2)
//! x other turn (3) x other position (right, ahead, left) = 108.

use log::debug;

use super::error::RuleError;
use super::geometry::paths_intersect;
use super::types::{Direction, TurnSignal, Verdict, REASON_CAR_ON_RIGHT};

/// Facts about one ordered pair of cars, seen from "my" car
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseFacts {
    pub my_priority: bool,
    pub my_turn: TurnSignal,
    pub other_priority: bool,
    pub other_turn: TurnSignal,
    pub other_relative_position: Direction,
}

impl PairwiseFacts {
    /// Build facts from textual labels such as `"turn-left"` or `"ahead"`
    pub fn from_labels(
        my_priority: bool,
        my_turn: &str,
        other_priority: bool,
        other_turn: &str,
        other_relative_position: &str,
    ) -> Result<Self, RuleError> {
        Ok(Self {
            my_priority,
            my_turn: my_turn.parse()?,
            other_priority,
            other_turn: other_turn.parse()?,
            other_relative_position: other_relative_position.parse()?,
        })
    }

    pub fn resolve(&self) -> Verdict {
        must_yield(
            self.my_priority,
            self.my_turn,
            self.other_priority,
            self.other_turn,
            self.other_relative_position,
        )
    }
}

/// Decide whether I must yield to one specific other car.
///
/// Equal status falls back to the right-hand rule. Head-on with equal status,
/// a car turning left gives way to one going straight or right. Two head-on
/// cars that both turn left stay equal and both end up yielding; drivers sort
/// that out themselves once stopped.
pub fn must_yield(
    my_priority: bool,
    my_turn: TurnSignal,
    other_priority: bool,
    other_turn: TurnSignal,
    other_relative_position: Direction,
) -> Verdict {
    let mut mine = my_priority;
    let mut theirs = other_priority;
    let mut reason = None;

    if mine == theirs {
        match other_relative_position {
            Direction::Right => {
                mine = false;
                theirs = true;
                reason = Some(REASON_CAR_ON_RIGHT.to_string());
            }
            Direction::Left => {
                mine = true;
                theirs = false;
            }
            Direction::Ahead | Direction::Behind => {}
        }
    }

    if mine == theirs
        && other_turn == TurnSignal::TurnLeft
        && matches!(my_turn, TurnSignal::NoTurn | TurnSignal::TurnRight)
    {
        mine = true;
        theirs = false;
    }

    if mine && !theirs {
        debug!(
            "{} vs {} from {}: I have right-of-way",
            my_turn, other_turn, other_relative_position
        );
        return Verdict::proceed();
    }

    if paths_intersect(my_turn, other_relative_position, other_turn) {
        debug!(
            "{} vs {} from {}: paths intersect, yielding",
            my_turn, other_turn, other_relative_position
        );
        let reason = reason.unwrap_or_else(|| {
            format!(
                "Your path would intersect with the car from {}.",
                other_relative_position
            )
        });
        Verdict::yield_because(reason)
    } else {
        Verdict::proceed()
    }
}

/// Combine pairwise verdicts into one decision for a car.
///
/// Stops at the first verdict that requires yielding and returns it as is.
/// When several cars conflict, the order of `verdicts` only picks which
/// reason is shown, never whether the car has to yield.
pub fn first_conflict<I>(verdicts: I) -> Verdict
where
    I: IntoIterator<Item = Verdict>,
{
    verdicts
        .into_iter()
        .find(|verdict| verdict.must_yield)
        .unwrap_or_else(Verdict::clear)
}
