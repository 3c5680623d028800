//! Hull-painting robot adapter
//!
//! Drives one machine as the brain of a robot on an unbounded 2-D surface.
//! Each cycle the robot reports the color of the panel it stands on, then
//! drains exactly two outputs: the color to paint and the direction to turn.
//! It advances one panel after every turn and repeats until the machine
//! halts.
//!
//! The surface, heading deltas, and rendering stay entirely in this adapter;
//! the machine knows nothing about geometry.

use crate::vm::{Machine, VMError};

use log::info;
use std::collections::{HashMap, HashSet};

const BLACK: i64 = 0;
const WHITE: i64 = 1;

const TURN_LEFT: i64 = 0;
const TURN_RIGHT: i64 = 1;

/// Which way the robot is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    fn turned_left(self) -> Self {
        match self {
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
            Heading::Right => Heading::Up,
        }
    }

    fn turned_right(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// One-panel displacement, screen coordinates (y grows downward)
    fn delta(self) -> (i64, i64) {
        match self {
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
        }
    }
}

/// A painting robot wired to one machine
pub struct Robot {
    machine: Machine,
    position: (i64, i64),
    heading: Heading,
    /// Current color per panel; panels never painted read as black
    panels: HashMap<(i64, i64), i64>,
    /// Panels painted at least once, regardless of color
    painted: HashSet<(i64, i64)>,
}

impl Robot {
    pub fn new(program: &[i64]) -> Self {
        Self {
            machine: Machine::with_label(program, "robot"),
            position: (0, 0),
            heading: Heading::Up,
            panels: HashMap::new(),
            painted: HashSet::new(),
        }
    }

    /// Color of the starting panel before the robot moves (0 black, 1 white).
    pub fn start_on(&mut self, color: i64) {
        self.panels.insert((0, 0), color);
    }

    /// Run the robot until its machine halts.
    pub fn run(&mut self) -> Result<(), VMError> {
        loop {
            let camera = self.panels.get(&self.position).copied().unwrap_or(BLACK);
            self.machine.feed_input(camera);

            let paint = match self.machine.run_until_output()? {
                Some(value) => value,
                None => break,
            };
            let turn = self
                .machine
                .run_until_output()?
                .ok_or_else(|| VMError::ProtocolError {
                    details: "robot halted between paint and turn outputs".to_string(),
                })?;

            self.paint(paint)?;
            self.turn_and_advance(turn)?;
        }

        info!("robot halted after painting {} panels", self.painted.len());
        Ok(())
    }

    fn paint(&mut self, color: i64) -> Result<(), VMError> {
        if color != BLACK && color != WHITE {
            return Err(VMError::ProtocolError {
                details: format!("robot emitted invalid paint color {}", color),
            });
        }
        self.panels.insert(self.position, color);
        self.painted.insert(self.position);
        Ok(())
    }

    fn turn_and_advance(&mut self, turn: i64) -> Result<(), VMError> {
        self.heading = match turn {
            TURN_LEFT => self.heading.turned_left(),
            TURN_RIGHT => self.heading.turned_right(),
            other => {
                return Err(VMError::ProtocolError {
                    details: format!("robot emitted invalid turn direction {}", other),
                })
            }
        };
        let (dx, dy) = self.heading.delta();
        self.position = (self.position.0 + dx, self.position.1 + dy);
        Ok(())
    }

    /// Number of panels painted at least once.
    pub fn panels_painted(&self) -> usize {
        self.painted.len()
    }

    /// Render the white panels as text, one character per panel.
    pub fn render(&self) -> String {
        let white: Vec<(i64, i64)> = self
            .panels
            .iter()
            .filter(|(_, &color)| color == WHITE)
            .map(|(&pos, _)| pos)
            .collect();

        if white.is_empty() {
            return String::new();
        }

        let min_x = white.iter().map(|p| p.0).min().unwrap_or(0);
        let max_x = white.iter().map(|p| p.0).max().unwrap_or(0);
        let min_y = white.iter().map(|p| p.1).min().unwrap_or(0);
        let max_y = white.iter().map(|p| p.1).max().unwrap_or(0);

        let mut out = String::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let is_white = self.panels.get(&(x, y)).copied().unwrap_or(BLACK) == WHITE;
                out.push(if is_white { '#' } else { ' ' });
            }
            out.push('\n');
        }
        out
    }
}
