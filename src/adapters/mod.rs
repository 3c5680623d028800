//! Host adapters that drive machines
//!
//! The VM core never performs I/O or owns any geometry; these adapters wire
//! one or more machines into the topologies the host protocols need:
//!
//! - **console.rs**: feed a fixed input sequence, collect every output
//!   until the machine halts.
//!
//! - **pipeline.rs**: an amplifier chain: machines in series threading one
//!   signal, or in a feedback loop iterated until the last machine halts.
//!
//! - **robot.rs**: a painting robot on an unbounded surface, two outputs
//!   per cycle (paint, turn).
//!
//! - **arcade.rs**: a tile display with a score counter, three outputs per
//!   frame (x, y, tile-or-score) and an optional joystick.
//!
//! Each adapter owns its lookup tables (headings, tile glyphs) locally and
//! schedules its machines itself; at most one machine executes at a time.

pub mod arcade;
pub mod console;
pub mod pipeline;
pub mod robot;

pub use arcade::{Arcade, Tile};
pub use console::run_diagnostic;
pub use pipeline::{best_feedback_signal, best_series_signal, AmplifierChain};
pub use robot::Robot;
