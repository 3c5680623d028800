//! Error types for VM operations
//!
//! This module defines all fault conditions that can occur while decoding or
//! executing an IntCode program, plus the errors the host-facing surface
//! (program parsing, adapter protocols) can report.
//!
//! Having a dedicated error module provides:
//! - Consistent error handling throughout the VM
//! - Clear categorization of decode faults versus address faults
//! - Detailed error messages with relevant context (program counter, address)
//! - Better integration with Rust's error handling patterns
//!
//! Decode and address faults are terminal for the machine that raised them:
//! the machine records the error as its fault reason and refuses to execute
//! further. The host decides whether to rebuild a fresh machine and retry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error variants that can occur during VM execution
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VMError {
    /// An instruction cell decoded to an opcode outside the recognized set
    #[error("Unknown opcode {opcode} at address {pc}")]
    UnknownOpcode { opcode: i64, pc: usize },

    /// A mode digit was not position (0), immediate (1), or relative (2)
    #[error("Unknown parameter mode {mode} at address {pc}")]
    UnknownMode { mode: i64, pc: usize },

    /// A write operand was decoded with immediate mode
    #[error("Immediate mode is not a valid write target at address {pc}")]
    ImmediateWriteTarget { pc: usize },

    /// A read or write resolved to a negative address
    #[error("Address fault: negative address {address}")]
    AddressFault { address: i64 },

    /// The program counter left the tape while the machine was still running
    #[error("Program counter {pc} ran off the end of the tape")]
    ProgramCounterOverrun { pc: usize },

    /// An operation was attempted on a machine that already faulted
    #[error("Machine '{label}' has faulted and cannot continue")]
    MachineFaulted { label: String },

    /// An operation was attempted on a machine that already halted
    #[error("Machine '{label}' has halted and cannot continue")]
    MachineHalted { label: String },

    /// Program text could not be parsed into a tape
    #[error("Parse error: {details}")]
    ParseError { details: String },

    /// An adapter protocol was violated (wrong output arity, missing value)
    #[error("Protocol error: {details}")]
    ProtocolError { details: String },

    /// IO error while loading a program or interacting with the host
    #[error("IO error: {details}")]
    IoError { details: String },
}

impl From<std::io::Error> for VMError {
    fn from(err: std::io::Error) -> Self {
        VMError::IoError {
            details: err.to_string(),
        }
    }
}

impl From<std::num::ParseIntError> for VMError {
    fn from(err: std::num::ParseIntError) -> Self {
        VMError::ParseError {
            details: err.to_string(),
        }
    }
}
