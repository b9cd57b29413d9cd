use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First score to reach this ends the match.
pub const WINNING_SCORE: u32 = 10;

const WIN_POINTS: u32 = 2;
const DRAW_POINTS: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }

    fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Scissors, Self::Paper) | (Self::Paper, Self::Rock)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown move: {0:?}")]
pub struct UnknownMove(pub String);

impl FromStr for Move {
    type Err = UnknownMove;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Self::Rock),
            "paper" => Ok(Self::Paper),
            "scissors" => Ok(Self::Scissors),
            other => Err(UnknownMove(other.to_owned())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round result from the local player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Win,
    Lose,
    Draw,
}

pub fn judge(local: Move, remote: Move) -> RoundOutcome {
    if local == remote {
        RoundOutcome::Draw
    } else if local.beats(remote) {
        RoundOutcome::Win
    } else {
        RoundOutcome::Lose
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub local: Move,
    pub remote: Move,
    pub outcome: RoundOutcome,
}

/// Running score of one game between the two peers.
#[derive(Debug, Default, Clone)]
pub struct Match {
    local_score: u32,
    remote_score: u32,
    local_move: Option<Move>,
    remote_move: Option<Move>,
}

impl Match {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.local_score, self.remote_score)
    }

    /// Local move sent, opponent's still outstanding.
    pub fn awaiting_remote(&self) -> bool {
        self.local_move.is_some() && self.remote_move.is_none()
    }

    pub fn play_local(&mut self, mv: Move) -> Option<RoundResult> {
        self.local_move = Some(mv);
        self.settle()
    }

    pub fn play_remote(&mut self, mv: Move) -> Option<RoundResult> {
        self.remote_move = Some(mv);
        self.settle()
    }

    pub fn is_over(&self) -> bool {
        self.local_score >= WINNING_SCORE || self.remote_score >= WINNING_SCORE
    }

    /// Final result once the match is over.
    pub fn verdict(&self) -> Option<RoundOutcome> {
        if !self.is_over() {
            return None;
        }
        Some(match self.local_score.cmp(&self.remote_score) {
            std::cmp::Ordering::Greater => RoundOutcome::Win,
            std::cmp::Ordering::Less => RoundOutcome::Lose,
            std::cmp::Ordering::Equal => RoundOutcome::Draw,
        })
    }

    fn settle(&mut self) -> Option<RoundResult> {
        let (local, remote) = (self.local_move?, self.remote_move?);
        let outcome = judge(local, remote);
        match outcome {
            RoundOutcome::Win => self.local_score += WIN_POINTS,
            RoundOutcome::Lose => self.remote_score += WIN_POINTS,
            RoundOutcome::Draw => {
                self.local_score += DRAW_POINTS;
                self.remote_score += DRAW_POINTS;
            }
        }
        self.local_move = None;
        self.remote_move = None;
        Some(RoundResult {
            local,
            remote,
            outcome,
        })
    }
}
