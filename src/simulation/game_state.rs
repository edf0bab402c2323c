//! Game state tracking for the right-of-way trainer
//!
//! Each round the player either stops or goes. This module judges that
//! choice against the engine's verdict and keeps the score.

use std::fmt;
use std::str::FromStr;

use super::types::Verdict;

/// What the player decided to do at the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    Stop,
    Go,
}

impl PlayerMove {
    /// A stop is right exactly when the car has to yield
    pub fn is_correct(self, verdict: &Verdict) -> bool {
        (self == PlayerMove::Stop) == verdict.must_yield
    }

    pub fn moved(self) -> bool {
        self == PlayerMove::Go
    }
}

impl FromStr for PlayerMove {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stop" | "s" => Ok(PlayerMove::Stop),
            "go" | "g" => Ok(PlayerMove::Go),
            other => anyhow::bail!("Unknown move '{}', expected 'stop' or 'go'", other),
        }
    }
}

impl fmt::Display for PlayerMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerMove::Stop => f.write_str("stop"),
            PlayerMove::Go => f.write_str("go"),
        }
    }
}

/// Sound to play after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Drive,
    Crash,
    Stop,
    Honk,
}

impl SoundCue {
    pub fn for_move(moved: bool, correct: bool) -> Self {
        match (moved, correct) {
            (true, true) => SoundCue::Drive,
            (true, false) => SoundCue::Crash,
            (false, true) => SoundCue::Stop,
            (false, false) => SoundCue::Honk,
        }
    }
}

/// Everything the presentation layer needs after a round is judged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub player_move: PlayerMove,
    pub verdict: Verdict,
    pub correct: bool,
    pub cue: SoundCue,
    /// Text shown to the player
    pub feedback: String,
}

/// Score kept across rounds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    /// Correct answers in a row
    pub score: u32,

    /// Longest streak so far
    pub best_score: u32,

    pub rounds_played: u32,

    pub rounds_won: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judge a move against the player's verdict and update the score
    pub fn judge(&mut self, player_move: PlayerMove, verdict: Verdict) -> RoundOutcome {
        let correct = player_move.is_correct(&verdict);

        let feedback = if correct {
            let action = match player_move {
                PlayerMove::Stop => "stopped",
                PlayerMove::Go => "went",
            };
            format!("Correct!\nYou {}.\nScore so far: {}", action, self.score + 1)
        } else {
            format!(
                "You lost!\n{}\nScore: {}",
                verdict.reason.as_deref().unwrap_or_default(),
                self.score
            )
        };

        self.next_turn(correct);

        RoundOutcome {
            player_move,
            cue: SoundCue::for_move(player_move.moved(), correct),
            verdict,
            correct,
            feedback,
        }
    }

    /// Move on to the next round; a wrong answer resets the streak
    pub fn next_turn(&mut self, won: bool) {
        self.rounds_played += 1;
        if won {
            self.rounds_won += 1;
            self.score += 1;
            self.best_score = self.best_score.max(self.score);
        } else {
            self.score = 0;
        }
    }

    /// Share of rounds answered correctly, in percent
    pub fn success_rate(&self) -> f32 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.rounds_won as f32 / self.rounds_played as f32 * 100.0
        }
    }

    /// Get a summary string for display
    pub fn summary(&self) -> String {
        format!(
            "Score: {} | Best: {} | Rounds: {} | Success rate: {:.1}%",
            self.score,
            self.best_score,
            self.rounds_played,
            self.success_rate()
        )
    }
}
