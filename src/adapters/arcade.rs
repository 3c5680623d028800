//! Arcade display adapter
//!
//! Drives one machine as an arcade cabinet. The machine emits outputs in
//! triples: `(x, y, tile_id)` draws a tile into the screen buffer, and the
//! reserved triple `(-1, 0, score)` updates the score counter instead. When
//! the machine pauses for input, the host answers with a joystick value in
//! {-1, 0, 1}.
//!
//! The screen buffer, tile glyphs, and joystick policy are adapter-local;
//! the machine only ever sees integers.

use crate::vm::{Machine, PauseReason, Status, VMError};

use colored::Colorize;
use log::{debug, info};
use std::collections::HashMap;

/// Sentinel x-coordinate marking a score triple
const SCORE_SENTINEL: i64 = -1;

/// What occupies one screen cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Block,
    Paddle,
    Ball,
}

impl Tile {
    fn from_id(id: i64) -> Result<Self, VMError> {
        match id {
            0 => Ok(Tile::Empty),
            1 => Ok(Tile::Wall),
            2 => Ok(Tile::Block),
            3 => Ok(Tile::Paddle),
            4 => Ok(Tile::Ball),
            other => Err(VMError::ProtocolError {
                details: format!("invalid tile id {}", other),
            }),
        }
    }

    fn glyph(self) -> String {
        match self {
            Tile::Empty => " ".to_string(),
            Tile::Wall => "#".white().to_string(),
            Tile::Block => "B".cyan().to_string(),
            Tile::Paddle => "=".yellow().to_string(),
            Tile::Ball => "o".red().to_string(),
        }
    }
}

/// An arcade cabinet wired to one machine
pub struct Arcade {
    machine: Machine,
    screen: HashMap<(i64, i64), Tile>,
    score: i64,
    ball_x: Option<i64>,
    paddle_x: Option<i64>,
}

impl Arcade {
    pub fn new(program: &[i64]) -> Self {
        Self {
            machine: Machine::with_label(program, "arcade"),
            screen: HashMap::new(),
            score: 0,
            ball_x: None,
            paddle_x: None,
        }
    }

    /// Set the cabinet to free play by writing 2 into address 0.
    pub fn insert_quarters(&mut self) -> Result<(), VMError> {
        self.machine.poke(0, 2)
    }

    /// Run the machine with no joystick until it halts, drawing the screen.
    ///
    /// Demo mode never feeds input; a joystick request here is a protocol
    /// violation.
    pub fn run_demo(&mut self) -> Result<(), VMError> {
        self.play(|_, _| None)
    }

    /// Run the machine until it halts, answering every input request with
    /// the joystick callback. The callback receives the current ball and
    /// paddle x-coordinates (if drawn yet) and must return -1, 0, or 1;
    /// returning `None` declares the cabinet has no joystick.
    pub fn play<F>(&mut self, mut joystick: F) -> Result<(), VMError>
    where
        F: FnMut(Option<i64>, Option<i64>) -> Option<i64>,
    {
        let mut pending: Vec<i64> = Vec::new();

        loop {
            match self.machine.run() {
                Status::Paused(PauseReason::OutputReady) => {
                    pending.extend(self.machine.drain_outputs());
                    while pending.len() >= 3 {
                        let triple: Vec<i64> = pending.drain(..3).collect();
                        self.apply_triple(triple[0], triple[1], triple[2])?;
                    }
                }
                Status::Paused(PauseReason::AwaitingInput) => {
                    let position = joystick(self.ball_x, self.paddle_x);
                    let value = position.ok_or_else(|| VMError::ProtocolError {
                        details: "machine requested joystick input in demo mode".to_string(),
                    })?;
                    if !(-1..=1).contains(&value) {
                        return Err(VMError::ProtocolError {
                            details: format!("joystick value {} outside -1..=1", value),
                        });
                    }
                    debug!("joystick: {}", value);
                    self.machine.feed_input(value);
                }
                Status::Halted => break,
                Status::Faulted => {
                    return Err(self.machine.fault().cloned().unwrap_or(
                        VMError::MachineFaulted {
                            label: self.machine.label().to_string(),
                        },
                    ))
                }
                Status::Ready => unreachable!("run() never returns Ready"),
            }
        }

        if !pending.is_empty() {
            return Err(VMError::ProtocolError {
                details: format!("machine halted mid-triple with {} values", pending.len()),
            });
        }

        info!("arcade halted with score {}", self.score);
        Ok(())
    }

    /// Run in free play with the built-in auto-player, which keeps the
    /// paddle under the ball. Returns the final score.
    pub fn autoplay(&mut self) -> Result<i64, VMError> {
        self.insert_quarters()?;
        self.play(|ball_x, paddle_x| {
            let (ball, paddle) = (ball_x.unwrap_or(0), paddle_x.unwrap_or(0));
            Some((ball - paddle).signum())
        })?;
        Ok(self.score)
    }

    fn apply_triple(&mut self, x: i64, y: i64, value: i64) -> Result<(), VMError> {
        if x == SCORE_SENTINEL && y == 0 {
            self.score = value;
            debug!("score: {}", value);
            return Ok(());
        }

        let tile = Tile::from_id(value)?;
        match tile {
            Tile::Ball => self.ball_x = Some(x),
            Tile::Paddle => self.paddle_x = Some(x),
            _ => {}
        }
        self.screen.insert((x, y), tile);
        Ok(())
    }

    /// Current score
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Number of block tiles currently on screen.
    pub fn block_count(&self) -> usize {
        self.screen
            .values()
            .filter(|&&tile| tile == Tile::Block)
            .count()
    }

    /// Render the screen with one glyph per tile, plus the score line.
    pub fn render(&self) -> String {
        let mut out = format!("Score: {}\n", self.score);
        if self.screen.is_empty() {
            return out;
        }

        let max_x = self.screen.keys().map(|p| p.0).max().unwrap_or(0);
        let max_y = self.screen.keys().map(|p| p.1).max().unwrap_or(0);

        for y in 0..=max_y {
            for x in 0..=max_x {
                let tile = self.screen.get(&(x, y)).copied().unwrap_or(Tile::Empty);
                out.push_str(&tile.glyph());
            }
            out.push('\n');
        }
        out
    }
}
