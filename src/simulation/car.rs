//! Cars approaching an intersection
//!
//! AI cars and the player's car share one type; the role tag only matters
//! to whoever draws them.

use log::warn;

use super::error::RuleError;
use super::geometry::relative_position;
use super::intersection::PriorityMap;
use super::priority::{first_conflict, PairwiseFacts};
use super::types::{CarId, Direction, TurnSignal, Verdict, VehicleRole};

/// The signal a driver shows when going from `source_road` to `target_road`.
///
/// Turning is measured against the direction cycle: one step back is a left
/// turn, two steps is straight on, three steps back is a right turn.
pub fn signal_for(source_road: Direction, target_road: Direction) -> Result<TurnSignal, RuleError> {
    match (source_road.index() + 4 - target_road.index()) % 4 {
        1 => Ok(TurnSignal::TurnLeft),
        2 => Ok(TurnSignal::NoTurn),
        3 => Ok(TurnSignal::TurnRight),
        _ => Err(RuleError::InvalidManeuver { road: source_road }),
    }
}

/// A car waiting at the intersection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimCar {
    pub id: CarId,
    pub role: VehicleRole,
    /// Road the car arrives from
    pub source_road: Direction,
    /// Road the car wants to leave by
    pub target_road: Direction,
    pub signal: TurnSignal,
}

impl SimCar {
    pub fn new(
        id: CarId,
        role: VehicleRole,
        source_road: Direction,
        target_road: Direction,
    ) -> Result<Self, RuleError> {
        let signal = signal_for(source_road, target_road).inspect_err(|e| {
            warn!("Rejected car {:?}: {}", id, e);
        })?;

        Ok(Self {
            id,
            role,
            source_road,
            target_road,
            signal,
        })
    }

    pub fn is_player(&self) -> bool {
        self.role == VehicleRole::Player
    }

    /// The facts for checking this car against `other`, in this car's frame
    pub fn facts_against(
        &self,
        other: &SimCar,
        prios: &PriorityMap,
    ) -> Result<PairwiseFacts, RuleError> {
        Ok(PairwiseFacts {
            my_priority: prios.get(self.source_road)?,
            my_turn: self.signal,
            other_priority: prios.get(other.source_road)?,
            other_turn: other.signal,
            other_relative_position: relative_position(self.source_road, other.source_road),
        })
    }

    /// Whether this car has to yield to any of `others`.
    ///
    /// The car itself is skipped if it appears in `others`. All pairs are
    /// validated before any of them is resolved, so a bad priority map fails
    /// even when an earlier pair would already have forced a stop.
    pub fn must_yield<'a, I>(&self, others: I, prios: &PriorityMap) -> Result<Verdict, RuleError>
    where
        I: IntoIterator<Item = &'a SimCar>,
    {
        let facts = others
            .into_iter()
            .filter(|other| other.id != self.id)
            .map(|other| self.facts_against(other, prios))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(first_conflict(facts.iter().map(PairwiseFacts::resolve)))
    }
}
