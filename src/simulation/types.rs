//! Core types for the right-of-way simulation
//!
//! These are plain value types. Nothing here holds state between calls.

use std::fmt;
use std::str::FromStr;

use super::error::RuleError;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SimId(pub usize);

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CarId(pub SimId);

/// A road seen from a reference vehicle, whose own entry is `Behind`.
///
/// The discriminants form a 4-cycle. Rotations and reframing are done with
/// index arithmetic modulo 4, so the order of the variants matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Behind = 0,
    Right = 1,
    Ahead = 2,
    Left = 3,
}

impl Direction {
    /// All directions in cycle order
    pub const ALL: [Direction; 4] = [
        Direction::Behind,
        Direction::Right,
        Direction::Ahead,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps any index onto the cycle
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// The road across the intersection from this one
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Behind => "behind",
            Direction::Right => "right",
            Direction::Ahead => "ahead",
            Direction::Left => "left",
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = RuleError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| RuleError::InvalidDirection {
                value: index.to_string(),
            })
    }
}

impl FromStr for Direction {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|direction| direction.name() == s)
            .ok_or_else(|| RuleError::InvalidDirection {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One quadrant of the intersection
///
/// ```text
/// ###########
/// # FL # FR #
/// ###########
/// # NL # NR #
/// ###########
/// ```
///
/// Corner `i` is the one a vehicle entering from `Direction::from_index(i)`
/// drives over first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    NearRight = 0,
    FarRight = 1,
    FarLeft = 2,
    NearLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NearRight,
        Corner::FarRight,
        Corner::FarLeft,
        Corner::NearLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Corner::NearRight => "near-right",
            Corner::FarRight => "far-right",
            Corner::FarLeft => "far-left",
            Corner::NearLeft => "near-left",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The maneuver a vehicle signals before entering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnSignal {
    /// Going straight across
    NoTurn,
    TurnLeft,
    TurnRight,
}

impl TurnSignal {
    pub const ALL: [TurnSignal; 3] = [
        TurnSignal::NoTurn,
        TurnSignal::TurnLeft,
        TurnSignal::TurnRight,
    ];

    /// How many consecutive corners the maneuver sweeps through
    pub fn corner_count(self) -> usize {
        match self {
            TurnSignal::TurnRight => 1,
            TurnSignal::NoTurn => 2,
            TurnSignal::TurnLeft => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TurnSignal::NoTurn => "no-turn",
            TurnSignal::TurnLeft => "turn-left",
            TurnSignal::TurnRight => "turn-right",
        }
    }
}

impl FromStr for TurnSignal {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-turn" | "straight" => Ok(TurnSignal::NoTurn),
            "turn-left" | "left" => Ok(TurnSignal::TurnLeft),
            "turn-right" | "right" => Ok(TurnSignal::TurnRight),
            other => Err(RuleError::InvalidTurn {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TurnSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// How right-of-way is regulated at an intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// No signs at all; the right-hand rule applies everywhere
    Uncontrolled,
    /// Yield signs on one opposite pair of roads
    YieldSignOnly,
    /// Priority and yield signs with a panel showing the priority road
    Controlled,
}

impl ControlType {
    pub const ALL: [ControlType; 3] = [
        ControlType::Uncontrolled,
        ControlType::YieldSignOnly,
        ControlType::Controlled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ControlType::Uncontrolled => "uncontrolled",
            ControlType::YieldSignOnly => "yield-sign-only",
            ControlType::Controlled => "controlled",
        }
    }
}

impl FromStr for ControlType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|control| control.name() == s)
            .ok_or_else(|| RuleError::InvalidControlType {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Who is driving a vehicle. Only presentation cares about this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleRole {
    Ai,
    Player,
}

/// Outcome of a right-of-way check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub must_yield: bool,
    pub reason: Option<String>,
}

impl Verdict {
    /// Free to go, nothing to explain
    pub fn proceed() -> Self {
        Self {
            must_yield: false,
            reason: None,
        }
    }

    pub fn yield_because(reason: impl Into<String>) -> Self {
        Self {
            must_yield: true,
            reason: Some(reason.into()),
        }
    }

    /// Aggregate result when no other car forces a stop
    pub fn clear() -> Self {
        Self {
            must_yield: false,
            reason: Some(REASON_CLEAR.to_string()),
        }
    }
}

/// Reason given when an equal-status car on the right wins the right-hand rule
pub const REASON_CAR_ON_RIGHT: &str =
    "The car on your right has right-of-way, and your paths would intersect.";

/// Reason given when no other car makes you stop
pub const REASON_CLEAR: &str =
    "Other cars either won't cross your path, nor need to yield to you.";

/// Number of roads a generated intersection may have (always including `Behind`)
pub const ROAD_COUNT_CHOICES: [usize; 2] = [3, 4];

/// Relative weights used when picking a control type.
/// Controlled and yield-only intersections come up more often.
pub const CONTROL_TYPE_WEIGHTS: [(ControlType, u32); 3] = [
    (ControlType::Uncontrolled, 1),
    (ControlType::YieldSignOnly, 2),
    (ControlType::Controlled, 3),
];
