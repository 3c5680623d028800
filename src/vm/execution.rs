//! Opcode execution logic
//!
//! This module applies the semantics of each decoded instruction to a
//! machine's state.
//!
//! The executor handles:
//! - Arithmetic and comparison writes
//! - Input consumption and the input-starvation pause
//! - Output emission and the output pause
//! - Jumps, relative base adjustment, and halting
//!
//! Separating execution from the machine's host-facing API keeps the
//! instruction semantics in one place and lets the step-level contract
//! (status transitions, fault recording) be tested against each opcode
//! individually.

use crate::vm::decoder::Decoder;
use crate::vm::errors::VMError;
use crate::vm::machine::Machine;
use crate::vm::memory::AddressSpace;
use crate::vm::types::{Instruction, PauseReason, Status};

use log::{debug, error};

impl Machine {
    /// Execute exactly one instruction.
    ///
    /// Returns the status the machine entered. A decode or semantic
    /// violation moves the machine into `Faulted`, records the error as the
    /// fault reason, and returns it; calling `step` on a terminal machine is
    /// itself an error.
    pub fn step(&mut self) -> Result<Status, VMError> {
        match self.status {
            Status::Halted => {
                return Err(VMError::MachineHalted {
                    label: self.label.clone(),
                })
            }
            Status::Faulted => {
                return Err(VMError::MachineFaulted {
                    label: self.label.clone(),
                })
            }
            Status::Ready | Status::Paused(_) => {}
        }

        match self.execute_one() {
            Ok(status) => {
                self.status = status;
                Ok(status)
            }
            Err(err) => {
                error!("machine '{}': fault at pc {}: {}", self.label, self.pc, err);
                self.status = Status::Faulted;
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Fetch, decode, and apply the instruction at the program counter.
    fn execute_one(&mut self) -> Result<Status, VMError> {
        if self.pc >= self.tape.len() {
            return Err(VMError::ProgramCounterOverrun { pc: self.pc });
        }

        let instruction = Decoder::new(&self.tape, self.pc, self.relative_base).decode()?;

        match instruction {
            Instruction::Add { a, b, dst } => {
                self.tape.write(dst as i64, a + b)?;
            }
            Instruction::Multiply { a, b, dst } => {
                self.tape.write(dst as i64, a * b)?;
            }
            Instruction::Input { dst } => match self.inputs.pop_front() {
                Some(value) => {
                    self.tape.write(dst as i64, value)?;
                }
                None => {
                    // The program counter stays on the input instruction so
                    // it is retried once the host feeds a value.
                    debug!("machine '{}': input starved at pc {}", self.label, self.pc);
                    return Ok(Status::Paused(PauseReason::AwaitingInput));
                }
            },
            Instruction::Output { value } => {
                debug!("machine '{}': output {}", self.label, value);
                self.outputs.push_back(value);
                self.pc += instruction.length();
                return Ok(Status::Paused(PauseReason::OutputReady));
            }
            Instruction::JumpIfTrue { condition, target } => {
                if condition != 0 {
                    self.pc = Self::jump_target(target)?;
                    return Ok(Status::Ready);
                }
            }
            Instruction::JumpIfFalse { condition, target } => {
                if condition == 0 {
                    self.pc = Self::jump_target(target)?;
                    return Ok(Status::Ready);
                }
            }
            Instruction::LessThan { a, b, dst } => {
                self.tape.write(dst as i64, i64::from(a < b))?;
            }
            Instruction::Equals { a, b, dst } => {
                self.tape.write(dst as i64, i64::from(a == b))?;
            }
            Instruction::AdjustRelativeBase { delta } => {
                self.relative_base += delta;
            }
            Instruction::Halt => {
                return Ok(Status::Halted);
            }
        }

        self.pc += instruction.length();
        Ok(Status::Ready)
    }

    /// Validate a jump destination.
    fn jump_target(target: i64) -> Result<usize, VMError> {
        if target < 0 {
            return Err(VMError::AddressFault { address: target });
        }
        Ok(target as usize)
    }
}
