//! Intersection setup for the right-of-way simulation
//!
//! An intersection bundles the roads that exist, how they are signed, which
//! roads have priority and the cars waiting on them. It is either generated
//! at random or built from externally supplied facts, and is validated in
//! both cases before any verdict is computed.

use anyhow::{Context, Result};
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

use super::car::SimCar;
use super::error::RuleError;
use super::types::{
    CarId, ControlType, Direction, SimId, Verdict, VehicleRole, CONTROL_TYPE_WEIGHTS,
    ROAD_COUNT_CHOICES,
};

/// Road pairs that face each other across the intersection
const OPPOSITE_PAIRS: [[Direction; 2]; 2] = [
    [Direction::Behind, Direction::Ahead],
    [Direction::Left, Direction::Right],
];

/// Which roads have right-of-way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityMap(BTreeMap<Direction, bool>);

impl PriorityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every road in `roads` without priority, except those in `prioritized`
    pub fn from_roads<I>(roads: I, prioritized: &[Direction]) -> Self
    where
        I: IntoIterator<Item = Direction>,
    {
        roads
            .into_iter()
            .map(|road| (road, prioritized.contains(&road)))
            .collect()
    }

    pub fn set(&mut self, road: Direction, has_priority: bool) {
        self.0.insert(road, has_priority);
    }

    pub fn get(&self, road: Direction) -> Result<bool, RuleError> {
        self.0
            .get(&road)
            .copied()
            .ok_or(RuleError::RoadNotPresent { road })
    }

    pub fn roads(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.keys().copied()
    }

    pub fn prioritized(&self) -> Vec<Direction> {
        self.iter()
            .filter_map(|(road, has_priority)| has_priority.then_some(road))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, bool)> + '_ {
        self.0.iter().map(|(road, has_priority)| (*road, *has_priority))
    }
}

impl FromIterator<(Direction, bool)> for PriorityMap {
    fn from_iter<T: IntoIterator<Item = (Direction, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Kind of sign posted on a road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignKind {
    Priority,
    Yield,
}

/// A sign facing the cars on one road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sign {
    pub kind: SignKind,
    pub facing: Direction,
    /// Whether an extra panel shows the shape of the priority road
    pub with_panel: bool,
}

/// A single intersection with the cars waiting at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimIntersection {
    control: ControlType,
    roads: BTreeSet<Direction>,
    prios: PriorityMap,
    player: SimCar,
    other_cars: Vec<SimCar>,
}

impl SimIntersection {
    /// Build an intersection from facts supplied by the caller.
    ///
    /// The player always arrives from `Behind` and heads to `player_target`.
    /// Each entry of `ai_routes` is a `(source, target)` pair for one AI car;
    /// at most one AI car may wait on each road other than `Behind`. AI cars
    /// are kept in road order whatever order the routes come in.
    pub fn new(
        control: ControlType,
        roads: BTreeSet<Direction>,
        prios: PriorityMap,
        player_target: Direction,
        ai_routes: &[(Direction, Direction)],
    ) -> Result<Self, RuleError> {
        validate_roads(&roads)?;
        validate_priorities(control, &roads, &prios)?;

        let car = |index: usize, role: VehicleRole, source: Direction, target: Direction| {
            for road in [source, target] {
                if !roads.contains(&road) {
                    return Err(RuleError::RoadNotPresent { road });
                }
            }
            SimCar::new(CarId(SimId(index)), role, source, target)
        };

        let player = car(0, VehicleRole::Player, Direction::Behind, player_target)?;
        let mut other_cars = ai_routes
            .iter()
            .enumerate()
            .map(|(i, (source, target))| car(i + 1, VehicleRole::Ai, *source, *target))
            .collect::<Result<Vec<_>, _>>()?;
        validate_ai_sources(&other_cars)?;
        other_cars.sort_by_key(|car| car.source_road);

        Ok(Self {
            control,
            roads,
            prios,
            player,
            other_cars,
        })
    }

    /// Generate a random intersection
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        Self::generate_with_control(rng, None)
    }

    /// Generate a random intersection, optionally forcing its control type
    pub fn generate_with_control<R: Rng + ?Sized>(
        rng: &mut R,
        control: Option<ControlType>,
    ) -> Result<Self> {
        let road_count = *ROAD_COUNT_CHOICES
            .choose(rng)
            .context("No road counts to choose from")?;

        let mut side_roads = vec![Direction::Left, Direction::Ahead, Direction::Right];
        if road_count != 4 {
            let dropped = rng.random_range(0..side_roads.len());
            side_roads.remove(dropped);
        }
        let roads: BTreeSet<Direction> = std::iter::once(Direction::Behind)
            .chain(side_roads)
            .collect();

        let control = match control {
            Some(control) => control,
            None => {
                CONTROL_TYPE_WEIGHTS
                    .choose_weighted(rng, |(_, weight)| *weight)
                    .context("Failed to pick an intersection type")?
                    .0
            }
        };

        let prios = generate_priorities(rng, control, &roads)?;

        let player_target = *others(&roads, Direction::Behind)
            .choose(rng)
            .context("No road for the player to leave by")?;

        let mut ai_routes = Vec::new();
        for source in roads.iter().copied().filter(|road| *road != Direction::Behind) {
            let target = *others(&roads, source)
                .choose(rng)
                .with_context(|| format!("No exit road for a car from {}", source))?;
            ai_routes.push((source, target));
        }

        debug!(
            "Generated {} intersection with roads {:?}, priority on {:?}",
            control,
            roads,
            prios.prioritized()
        );

        Ok(Self::new(control, roads, prios, player_target, &ai_routes)?)
    }

    pub fn control(&self) -> ControlType {
        self.control
    }

    pub fn roads(&self) -> &BTreeSet<Direction> {
        &self.roads
    }

    pub fn prios(&self) -> &PriorityMap {
        &self.prios
    }

    pub fn player(&self) -> &SimCar {
        &self.player
    }

    pub fn other_cars(&self) -> &[SimCar] {
        &self.other_cars
    }

    /// All cars, player first
    pub fn cars(&self) -> impl Iterator<Item = &SimCar> {
        std::iter::once(&self.player).chain(self.other_cars.iter())
    }

    /// Whether `car` has to yield to any other car here
    pub fn verdict_for(&self, car: &SimCar) -> Result<Verdict, RuleError> {
        car.must_yield(self.cars(), &self.prios)
    }

    pub fn player_verdict(&self) -> Result<Verdict, RuleError> {
        self.verdict_for(&self.player)
    }

    /// Verdicts for every car, player first
    pub fn verdicts(&self) -> Result<Vec<(CarId, Verdict)>, RuleError> {
        self.cars()
            .map(|car| self.verdict_for(car).map(|verdict| (car.id, verdict)))
            .collect()
    }

    /// Signs to put up, one per signed road
    pub fn signs(&self) -> Vec<Sign> {
        let mut signs = Vec::new();
        for (road, has_priority) in self.prios.iter() {
            match self.control {
                ControlType::Uncontrolled => {}
                ControlType::Controlled => signs.push(Sign {
                    kind: if has_priority {
                        SignKind::Priority
                    } else {
                        SignKind::Yield
                    },
                    facing: road,
                    with_panel: true,
                }),
                ControlType::YieldSignOnly if !has_priority => signs.push(Sign {
                    kind: SignKind::Yield,
                    facing: road,
                    with_panel: false,
                }),
                ControlType::YieldSignOnly => {}
            }
        }
        signs
    }
}

fn others(roads: &BTreeSet<Direction>, excluded: Direction) -> Vec<Direction> {
    roads.iter().copied().filter(|road| *road != excluded).collect()
}

fn generate_priorities<R: Rng + ?Sized>(
    rng: &mut R,
    control: ControlType,
    roads: &BTreeSet<Direction>,
) -> Result<PriorityMap> {
    let prioritized: Vec<Direction> = match control {
        ControlType::Uncontrolled => Vec::new(),
        ControlType::YieldSignOnly => {
            // Only an opposite pair with both roads present can be the main road
            let candidates: Vec<[Direction; 2]> = OPPOSITE_PAIRS
                .iter()
                .copied()
                .filter(|pair| pair.iter().all(|road| roads.contains(road)))
                .collect();
            candidates
                .choose(rng)
                .context("No opposite pair of roads to give priority to")?
                .to_vec()
        }
        ControlType::Controlled => {
            let present: Vec<Direction> = roads.iter().copied().collect();
            present.choose_multiple(rng, 2).copied().collect()
        }
    };

    Ok(PriorityMap::from_roads(roads.iter().copied(), &prioritized))
}

fn validate_roads(roads: &BTreeSet<Direction>) -> Result<(), RuleError> {
    if !roads.contains(&Direction::Behind) {
        return Err(RuleError::InvalidRoadSet {
            reason: "the 'behind' road is missing".to_string(),
        });
    }
    if roads.len() < 2 {
        return Err(RuleError::InvalidRoadSet {
            reason: "at least two roads are needed".to_string(),
        });
    }
    Ok(())
}

fn validate_ai_sources(cars: &[SimCar]) -> Result<(), RuleError> {
    let mut occupied = BTreeSet::new();
    for car in cars {
        if car.source_road == Direction::Behind {
            return Err(RuleError::InvalidRoadSet {
                reason: "an AI car cannot enter from the player's road".to_string(),
            });
        }
        if !occupied.insert(car.source_road) {
            return Err(RuleError::InvalidRoadSet {
                reason: format!("more than one AI car enters from '{}'", car.source_road),
            });
        }
    }
    Ok(())
}

fn validate_priorities(
    control: ControlType,
    roads: &BTreeSet<Direction>,
    prios: &PriorityMap,
) -> Result<(), RuleError> {
    let invalid = |reason: String| RuleError::InvalidPriorityMap { control, reason };

    if let Some(road) = prios.roads().find(|road| !roads.contains(road)) {
        return Err(invalid(format!("road '{}' does not exist", road)));
    }
    if let Some(road) = roads.iter().find(|road| prios.get(**road).is_err()) {
        return Err(invalid(format!("road '{}' has no entry", road)));
    }

    let prioritized = prios.prioritized();
    match control {
        ControlType::Uncontrolled if !prioritized.is_empty() => {
            Err(invalid("no road may have priority".to_string()))
        }
        ControlType::YieldSignOnly if !is_opposite_pair(&prioritized) => Err(invalid(
            "exactly one opposite pair of roads must have priority".to_string(),
        )),
        ControlType::Controlled if prioritized.len() != 2 => {
            Err(invalid("exactly two roads must have priority".to_string()))
        }
        _ => Ok(()),
    }
}

fn is_opposite_pair(roads: &[Direction]) -> bool {
    matches!(roads, [first, second] if first.opposite() == *second)
}
