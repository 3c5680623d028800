//! Suspendable IntCode virtual machine
//!
//! This module contains the interpreter for the IntCode instruction set: a
//! single integer tape serving as both program and data, three addressing
//! modes, and a cooperative execution contract that lets a machine act as an
//! interactive peripheral.
//!
//! ## Modular architecture
//!
//! The VM is divided into focused components, each with a clear
//! responsibility:
//!
//! - **memory.rs**: The grow-on-demand integer tape. Defined by the
//!   `AddressSpace` trait and implemented by `Tape`.
//!
//! - **decoder.rs**: Turns one tape cell into a fully resolved instruction,
//!   handling the opcode/mode split and operand resolution.
//!
//! - **execution.rs**: Applies each opcode's semantics to machine state,
//!   including the pause points after outputs and on starved inputs.
//!
//! - **machine.rs**: Owns tape, registers, queues, and status; provides the
//!   host-facing `step`/`run`/`feed_input`/`take_output` API.
//!
//! - **types.rs**: Core data types: opcodes, modes, instructions, status.
//!
//! - **errors.rs**: Centralized fault and error definitions.
//!
//! ## Execution contract
//!
//! A machine is `Ready` until it emits an output (pausing with
//! `PauseReason::OutputReady`), requests input from an empty queue (pausing
//! with `PauseReason::AwaitingInput`), executes the halt opcode (terminal
//! `Halted`), or violates decode/addressing rules (terminal `Faulted`, with
//! the error retained as the fault reason). `run` drives fetch-decode-execute
//! until the machine leaves `Ready`; hosts resume a paused machine simply by
//! calling `run` again, after feeding input if one was requested.

pub mod decoder;
pub mod errors;
pub mod execution;
pub mod machine;
pub mod memory;
pub mod types;

pub use decoder::Decoder;
pub use errors::VMError;
pub use machine::Machine;
pub use memory::{AddressSpace, Tape};
pub use types::{Instruction, Mode, Opcode, PauseReason, Status};
