//! Instruction decoding and operand resolution
//!
//! This module turns the cell at the program counter into one fully resolved
//! [`Instruction`].
//!
//! The decoder handles:
//! - Splitting a cell into its 2-digit opcode and three mode digits
//! - Resolving read operands to values according to their mode
//! - Resolving write targets to validated addresses (immediate mode is
//!   rejected for writes)
//!
//! Separating decoding from execution keeps the executor free of addressing
//! concerns and lets mode resolution be tested in isolation.

use crate::vm::errors::VMError;
use crate::vm::memory::AddressSpace;
use crate::vm::types::{Instruction, Mode, Opcode};

/// Decodes instructions against a tape and the current register state
///
/// A `Decoder` borrows the tape for the duration of one fetch; it holds the
/// relative base by value since decoding never mutates it.
pub struct Decoder<'a, A: AddressSpace> {
    tape: &'a A,
    pc: usize,
    relative_base: i64,
}

impl<'a, A: AddressSpace> Decoder<'a, A> {
    pub fn new(tape: &'a A, pc: usize, relative_base: i64) -> Self {
        Self {
            tape,
            pc,
            relative_base,
        }
    }

    /// Decode the instruction at the program counter.
    pub fn decode(&self) -> Result<Instruction, VMError> {
        let cell = self.tape.read(self.pc as i64)?;
        let opcode = Opcode::from_cell(cell % 100, self.pc)?;

        // Mode digits: hundreds for operand 1, thousands for operand 2,
        // ten-thousands for operand 3.
        let mode1 = Mode::from_digit(cell / 100 % 10, self.pc)?;
        let mode2 = Mode::from_digit(cell / 1000 % 10, self.pc)?;
        let mode3 = Mode::from_digit(cell / 10_000 % 10, self.pc)?;

        let instruction = match opcode {
            Opcode::Add => Instruction::Add {
                a: self.read_operand(1, mode1)?,
                b: self.read_operand(2, mode2)?,
                dst: self.write_target(3, mode3)?,
            },
            Opcode::Multiply => Instruction::Multiply {
                a: self.read_operand(1, mode1)?,
                b: self.read_operand(2, mode2)?,
                dst: self.write_target(3, mode3)?,
            },
            Opcode::Input => Instruction::Input {
                dst: self.write_target(1, mode1)?,
            },
            Opcode::Output => Instruction::Output {
                value: self.read_operand(1, mode1)?,
            },
            Opcode::JumpIfTrue => Instruction::JumpIfTrue {
                condition: self.read_operand(1, mode1)?,
                target: self.read_operand(2, mode2)?,
            },
            Opcode::JumpIfFalse => Instruction::JumpIfFalse {
                condition: self.read_operand(1, mode1)?,
                target: self.read_operand(2, mode2)?,
            },
            Opcode::LessThan => Instruction::LessThan {
                a: self.read_operand(1, mode1)?,
                b: self.read_operand(2, mode2)?,
                dst: self.write_target(3, mode3)?,
            },
            Opcode::Equals => Instruction::Equals {
                a: self.read_operand(1, mode1)?,
                b: self.read_operand(2, mode2)?,
                dst: self.write_target(3, mode3)?,
            },
            Opcode::AdjustRelativeBase => Instruction::AdjustRelativeBase {
                delta: self.read_operand(1, mode1)?,
            },
            Opcode::Halt => Instruction::Halt,
        };

        Ok(instruction)
    }

    /// Resolve the k-th operand to a value according to its mode.
    fn read_operand(&self, k: usize, mode: Mode) -> Result<i64, VMError> {
        let raw = self.tape.read((self.pc + k) as i64)?;
        match mode {
            Mode::Immediate => Ok(raw),
            Mode::Position => self.tape.read(raw),
            Mode::Relative => self.tape.read(raw + self.relative_base),
        }
    }

    /// Resolve the k-th operand to a write address according to its mode.
    fn write_target(&self, k: usize, mode: Mode) -> Result<usize, VMError> {
        let raw = self.tape.read((self.pc + k) as i64)?;
        let address = match mode {
            Mode::Position => raw,
            Mode::Relative => raw + self.relative_base,
            Mode::Immediate => return Err(VMError::ImmediateWriteTarget { pc: self.pc }),
        };
        if address < 0 {
            return Err(VMError::AddressFault { address });
        }
        Ok(address as usize)
    }
}
