//! Suspendable IntCode virtual machine
//!
//! The `intcode` crate provides an interpreter for the IntCode instruction
//! set: an integer tape acting as both program and data, three addressing
//! modes, and a cooperative suspend/resume execution contract that lets a
//! machine act as an interactive peripheral.
//!
//! Key features:
//! - Grow-on-demand tape memory with address validation
//! - A closed opcode enum decoded into fully resolved instructions
//! - Exhaustive machine status (`Ready`/`Paused`/`Halted`/`Faulted`) with
//!   faults retained as the machine's fault reason
//! - Pausing after every output and on starved inputs, so hosts can stream
//!   values in and out of a running program
//! - Adapters composing machines into pipelines, feedback loops, a painting
//!   robot, and an arcade display
//!
//! This crate is intended for programs encoded as a single line of
//! comma-separated decimal integers, loaded into the tape from address 0.

pub mod adapters;
pub mod events;
pub mod program;
pub mod vm;

// Re-export key types for convenience
pub use program::{load_program, parse_program};
pub use vm::{Machine, PauseReason, Status, VMError};
