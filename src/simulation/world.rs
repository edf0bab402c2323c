//! Main simulation world that ties everything together
//!
//! The world owns the intersection currently in play and the game state,
//! and builds a fresh intersection after every round.

use anyhow::{Context, Result};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::car::SimCar;
use super::game_state::{GameState, PlayerMove, RoundOutcome};
use super::intersection::{SignKind, SimIntersection};
use super::types::{ControlType, Direction, TurnSignal};

/// The running game
pub struct SimWorld {
    /// Intersection the player is currently facing
    pub intersection: SimIntersection,

    pub game_state: GameState,

    /// Rounds judged so far
    pub round: u32,

    /// Forces every generated intersection to one control type
    control: Option<ControlType>,

    /// Optional seeded RNG for reproducible games
    rng: Option<StdRng>,
}

impl SimWorld {
    fn new_internal(mut rng: Option<StdRng>, control: Option<ControlType>) -> Result<Self> {
        let intersection = generate(&mut rng, control)?;
        Ok(Self {
            intersection,
            game_state: GameState::new(),
            round: 0,
            control,
            rng,
        })
    }

    pub fn new() -> Result<Self> {
        Self::new_internal(None, None)
    }

    /// Create a new SimWorld with a seeded RNG for reproducible games
    pub fn new_with_seed(seed: u64) -> Result<Self> {
        Self::new_internal(Some(StdRng::seed_from_u64(seed)), None)
    }

    pub fn new_with_options(seed: Option<u64>, control: Option<ControlType>) -> Result<Self> {
        Self::new_internal(seed.map(StdRng::seed_from_u64), control)
    }

    /// Replace the current intersection with a freshly generated one
    pub fn next_intersection(&mut self) -> Result<()> {
        self.intersection = generate(&mut self.rng, self.control)?;
        Ok(())
    }

    /// Judge the player's move at the current intersection, then move on.
    ///
    /// The next intersection is generated before the score changes, so on
    /// error the world is left exactly as it was.
    pub fn play(&mut self, player_move: PlayerMove) -> Result<RoundOutcome> {
        let verdict = self
            .intersection
            .player_verdict()
            .inspect_err(|e| warn!("Intersection cannot be judged: {}", e))
            .context("Failed to resolve the player's right-of-way")?;
        let next = generate(&mut self.rng, self.control)?;

        let outcome = self.game_state.judge(player_move, verdict);
        self.round += 1;
        self.intersection = next;

        info!(
            "Round {}: player chose {}, {} ({:?})",
            self.round,
            player_move,
            if outcome.correct { "correct" } else { "wrong" },
            outcome.cue
        );

        Ok(outcome)
    }

    /// A move picked at random, standing in for a human player
    pub fn random_move(&mut self) -> PlayerMove {
        let stop = match &mut self.rng {
            Some(rng) => rng.random_bool(0.5),
            None => rand::rng().random_bool(0.5),
        };
        if stop {
            PlayerMove::Stop
        } else {
            PlayerMove::Go
        }
    }

    /// Print the roads, signs and cars without giving away any verdict
    pub fn print_scene(&self) {
        let intersection = &self.intersection;

        println!("=== Intersection ({}) ===", intersection.control());
        let roads: Vec<String> = intersection
            .prios()
            .iter()
            .map(|(road, has_priority)| {
                if has_priority {
                    format!("{}*", road)
                } else {
                    road.to_string()
                }
            })
            .collect();
        println!("Roads: {}", roads.join(", "));

        for sign in intersection.signs() {
            let kind = match sign.kind {
                SignKind::Priority => "priority",
                SignKind::Yield => "yield",
            };
            println!(
                "  Sign on {}: {}{}",
                sign.facing,
                kind,
                if sign.with_panel { " (with panel)" } else { "" }
            );
        }

        println!("--- Cars ---");
        for car in intersection.cars() {
            println!(
                "  {:<6} from {:<6} to {:<6} ({})",
                car_name(car),
                car.source_road,
                car.target_road,
                car.signal
            );
        }
    }

    /// Print every car's verdict at the current intersection
    pub fn print_verdicts(&self) -> Result<()> {
        let intersection = &self.intersection;

        println!("--- Verdicts ---");
        for (car_id, verdict) in intersection.verdicts()? {
            let car = intersection
                .cars()
                .find(|car| car.id == car_id)
                .context("Verdict for an unknown car")?;
            let decision = if verdict.must_yield {
                format!("must yield: {}", verdict.reason.unwrap_or_default())
            } else {
                "may go".to_string()
            };
            println!("  {:<6} {}", car_name(car), decision);
        }
        Ok(())
    }

    pub fn print_summary(&self) -> Result<()> {
        self.print_scene();
        self.print_verdicts()?;
        println!("{}", self.game_state.summary());
        Ok(())
    }

    /// Print an ASCII sketch of the intersection.
    ///
    /// Cars are shown by their signal (S straight, L left, R right) and
    /// priority roads are marked with `*`. The player comes from the bottom.
    pub fn draw_map(&self) {
        const WIDTH: usize = 15;
        const HEIGHT: usize = 7;
        let mut grid = [[' '; WIDTH]; HEIGHT];

        let roads = self.intersection.roads();
        let has = |road: Direction| roads.contains(&road);

        // Vertical arms
        for (road, rows) in [(Direction::Ahead, 0..2), (Direction::Behind, 5..7)] {
            if has(road) {
                for row in rows {
                    grid[row][5] = '|';
                    grid[row][9] = '|';
                }
            }
        }
        if !has(Direction::Ahead) {
            grid[2][5..=9].copy_from_slice(&['+', '-', '-', '-', '+']);
        }

        // Horizontal arms
        for (road, cols, edge) in [(Direction::Left, 0..5, 5), (Direction::Right, 10..15, 9)] {
            if has(road) {
                for col in cols {
                    grid[2][col] = '-';
                    grid[4][col] = '-';
                }
                grid[2][edge] = '+';
                grid[4][edge] = '+';
            } else {
                for row in grid.iter_mut().take(5).skip(2) {
                    if row[edge] == ' ' {
                        row[edge] = '|';
                    }
                }
            }
        }

        for (road, has_priority) in self.intersection.prios().iter() {
            if has_priority {
                let (row, col) = priority_cell(road);
                grid[row][col] = '*';
            }
        }

        for car in self.intersection.cars() {
            let (row, col) = car_cell(car.source_road);
            grid[row][col] = match car.signal {
                TurnSignal::NoTurn => 'S',
                TurnSignal::TurnLeft => 'L',
                TurnSignal::TurnRight => 'R',
            };
        }

        for row in grid.iter() {
            let line: String = row.iter().collect();
            println!("{}", line.trim_end());
        }
    }
}

fn generate(rng: &mut Option<StdRng>, control: Option<ControlType>) -> Result<SimIntersection> {
    let intersection = match rng {
        Some(rng) => SimIntersection::generate_with_control(rng, control),
        None => SimIntersection::generate_with_control(&mut rand::rng(), control),
    };
    intersection.context("Failed to generate an intersection")
}

fn car_cell(road: Direction) -> (usize, usize) {
    match road {
        Direction::Behind => (5, 7),
        Direction::Ahead => (1, 7),
        Direction::Left => (3, 2),
        Direction::Right => (3, 12),
    }
}

fn priority_cell(road: Direction) -> (usize, usize) {
    match road {
        Direction::Behind => (6, 7),
        Direction::Ahead => (0, 7),
        Direction::Left => (3, 0),
        Direction::Right => (3, 14),
    }
}

fn car_name(car: &SimCar) -> String {
    if car.is_player() {
        "You".to_string()
    } else {
        format!("Car {}", car.id.0 .0)
    }
}
