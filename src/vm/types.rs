//! Type definitions for the virtual machine
//!
//! This module contains the core data types used by the VM: the opcode set,
//! parameter modes, decoded instructions, and the machine status enum.
//!
//! Centralizing type definitions in this module:
//! - Establishes a single source of truth for VM data structures
//! - Prevents circular dependencies between modules
//! - Facilitates serialization and deserialization
//! - Provides a clear boundary for extending the VM with new opcodes

use crate::vm::errors::VMError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The ten recognized opcodes of the IntCode instruction set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    /// Add two operands and store the sum
    Add,

    /// Multiply two operands and store the product
    Multiply,

    /// Read one value from the input queue into memory
    Input,

    /// Emit one operand as output and pause the machine
    Output,

    /// Jump to the second operand if the first is non-zero
    JumpIfTrue,

    /// Jump to the second operand if the first is zero
    JumpIfFalse,

    /// Store 1 if the first operand is less than the second, else 0
    LessThan,

    /// Store 1 if the operands are equal, else 0
    Equals,

    /// Add the operand to the relative base register
    AdjustRelativeBase,

    /// Stop the machine permanently
    Halt,
}

impl Opcode {
    /// Decode the 2-digit opcode portion of an instruction cell.
    ///
    /// `pc` is carried along only so the error can say where decoding failed.
    pub fn from_cell(code: i64, pc: usize) -> Result<Self, VMError> {
        match code {
            1 => Ok(Opcode::Add),
            2 => Ok(Opcode::Multiply),
            3 => Ok(Opcode::Input),
            4 => Ok(Opcode::Output),
            5 => Ok(Opcode::JumpIfTrue),
            6 => Ok(Opcode::JumpIfFalse),
            7 => Ok(Opcode::LessThan),
            8 => Ok(Opcode::Equals),
            9 => Ok(Opcode::AdjustRelativeBase),
            99 => Ok(Opcode::Halt),
            other => Err(VMError::UnknownOpcode { opcode: other, pc }),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Add => "add",
            Opcode::Multiply => "multiply",
            Opcode::Input => "input",
            Opcode::Output => "output",
            Opcode::JumpIfTrue => "jump-if-true",
            Opcode::JumpIfFalse => "jump-if-false",
            Opcode::LessThan => "less-than",
            Opcode::Equals => "equals",
            Opcode::AdjustRelativeBase => "adjust-relative-base",
            Opcode::Halt => "halt",
        };
        write!(f, "{}", name)
    }
}

/// Per-operand addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// The operand cell holds an address; the value lives at that address
    Position,

    /// The operand cell holds the value itself
    Immediate,

    /// The operand cell holds an offset from the relative base register
    Relative,
}

impl Mode {
    /// Decode a single mode digit (0, 1, or 2).
    pub fn from_digit(digit: i64, pc: usize) -> Result<Self, VMError> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            other => Err(VMError::UnknownMode { mode: other, pc }),
        }
    }
}

/// One fully resolved instruction, produced by the decoder each step
///
/// Read operands are carried as values; write targets are carried as
/// validated non-negative addresses. The variant alone determines how the
/// executor mutates machine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Add { a: i64, b: i64, dst: usize },
    Multiply { a: i64, b: i64, dst: usize },
    Input { dst: usize },
    Output { value: i64 },
    JumpIfTrue { condition: i64, target: i64 },
    JumpIfFalse { condition: i64, target: i64 },
    LessThan { a: i64, b: i64, dst: usize },
    Equals { a: i64, b: i64, dst: usize },
    AdjustRelativeBase { delta: i64 },
    Halt,
}

impl Instruction {
    /// Number of cells the instruction occupies, including the opcode cell.
    ///
    /// The program counter advances by this amount unless a jump is taken
    /// or the machine halts.
    pub fn length(&self) -> usize {
        match self {
            Instruction::Add { .. }
            | Instruction::Multiply { .. }
            | Instruction::LessThan { .. }
            | Instruction::Equals { .. } => 4,
            Instruction::JumpIfTrue { .. } | Instruction::JumpIfFalse { .. } => 3,
            Instruction::Input { .. }
            | Instruction::Output { .. }
            | Instruction::AdjustRelativeBase { .. } => 2,
            Instruction::Halt => 1,
        }
    }
}

/// Why a machine is paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseReason {
    /// An output instruction executed; the value is waiting to be drained
    OutputReady,

    /// An input instruction executed with an empty input queue; the host
    /// must feed a value before resuming
    AwaitingInput,
}

/// Execution status of a machine
///
/// `Halted` and `Faulted` are terminal: once entered they are never left,
/// and `run()` on such a machine is a no-op. `Paused` records why the
/// machine suspended so hosts can tell an output pause from input
/// starvation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The machine will execute another instruction when driven
    Ready,

    /// Execution is suspended at a designed yield point
    Paused(PauseReason),

    /// The halt opcode executed; terminal
    Halted,

    /// A decode or semantic violation occurred; terminal
    Faulted,
}

impl Status {
    /// Whether the machine can never execute again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Halted | Status::Faulted)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "ready"),
            Status::Paused(PauseReason::OutputReady) => write!(f, "paused (output ready)"),
            Status::Paused(PauseReason::AwaitingInput) => write!(f, "paused (awaiting input)"),
            Status::Halted => write!(f, "halted"),
            Status::Faulted => write!(f, "faulted"),
        }
    }
}
