//! Main machine implementation
//!
//! This module brings together the tape, decoder, and executor to implement
//! one suspendable IntCode machine.
//!
//! The `Machine` struct is the central coordinator that:
//! - Owns the tape, program counter, relative base, and input/output queues
//! - Tracks execution status through an exhaustive state enum
//! - Provides the host-facing API: `step`, `run`, `feed_input`, `take_output`
//!
//! All state is private; hosts interact only through methods, so invariants
//! like "the program counter only moves under executor control" cannot be
//! bypassed from outside.

use crate::vm::errors::VMError;
use crate::vm::memory::{AddressSpace, Tape};
use crate::vm::types::{PauseReason, Status};

use log::{debug, warn};
use std::collections::VecDeque;

/// A suspendable IntCode machine
///
/// Execution is cooperative: the machine yields after every output and when
/// an input is requested while the input queue is empty. Hosts drive it with
/// [`Machine::run`], inspect [`Machine::status`], and exchange values through
/// the input and output queues.
#[derive(Debug, Clone)]
pub struct Machine {
    /// The integer tape, program and data in one address space
    pub(crate) tape: Tape,

    /// Program counter; moved only by the executor
    pub(crate) pc: usize,

    /// Relative base register; mutated only by adjust-relative-base
    pub(crate) relative_base: i64,

    /// Current execution status
    pub(crate) status: Status,

    /// Host-supplied inputs, consumed strictly in arrival order
    pub(crate) inputs: VecDeque<i64>,

    /// Produced outputs, oldest first
    pub(crate) outputs: VecDeque<i64>,

    /// The error that moved the machine into `Faulted`, if any
    pub(crate) fault: Option<VMError>,

    /// Short identifier used in log lines when machines run in compositions
    pub(crate) label: String,
}

impl Machine {
    /// Create a machine from an initial program.
    ///
    /// The program is copied into a fresh tape; the caller's slice is not
    /// aliased. The machine starts `Ready` at address 0 with an empty input
    /// queue and relative base 0.
    pub fn new(program: &[i64]) -> Self {
        Self::with_label(program, "vm")
    }

    /// Create a machine with a label for log lines.
    pub fn with_label(program: &[i64], label: &str) -> Self {
        Self {
            tape: Tape::new(program),
            pc: 0,
            relative_base: 0,
            status: Status::Ready,
            inputs: VecDeque::new(),
            outputs: VecDeque::new(),
            fault: None,
            label: label.to_string(),
        }
    }

    /// Current execution status
    pub fn status(&self) -> Status {
        self.status
    }

    /// The fault that stopped the machine, if it is `Faulted`
    pub fn fault(&self) -> Option<&VMError> {
        self.fault.as_ref()
    }

    /// Label used in log lines
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Append a value to the input queue.
    ///
    /// Valid in any non-terminal status. A machine paused for input returns
    /// to `Ready` so the next `run` resumes at the starved instruction.
    /// Feeding a terminal machine is ignored with a warning.
    pub fn feed_input(&mut self, value: i64) {
        if self.status.is_terminal() {
            warn!(
                "machine '{}': input {} ignored, machine is {}",
                self.label, value, self.status
            );
            return;
        }
        self.inputs.push_back(value);
        if self.status == Status::Paused(PauseReason::AwaitingInput) {
            self.status = Status::Ready;
        }
    }

    /// Remove and return the oldest undrained output.
    pub fn take_output(&mut self) -> Option<i64> {
        self.outputs.pop_front()
    }

    /// The most recent output without removing it.
    pub fn last_output(&self) -> Option<i64> {
        self.outputs.back().copied()
    }

    /// Remove and return every undrained output, oldest first.
    pub fn drain_outputs(&mut self) -> Vec<i64> {
        self.outputs.drain(..).collect()
    }

    /// Read a tape cell directly, for host inspection.
    pub fn peek(&self, address: i64) -> Result<i64, VMError> {
        self.tape.read(address)
    }

    /// Write a tape cell directly, for host patching before a run
    /// (e.g. the arcade inserts quarters by writing address 0).
    pub fn poke(&mut self, address: i64, value: i64) -> Result<(), VMError> {
        self.tape.write(address, value)
    }

    /// Borrow the tape, e.g. for snapshot comparison in tests.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Drive fetch-decode-execute until the machine leaves `Ready`.
    ///
    /// A paused machine resumes first: after an output pause execution
    /// continues at the instruction following the output; after an input
    /// pause the starved input instruction is retried. Calling `run` on a
    /// terminal machine is a no-op returning the terminal status.
    pub fn run(&mut self) -> Status {
        if self.status.is_terminal() {
            debug!("machine '{}': run on {} machine", self.label, self.status);
            return self.status;
        }

        self.status = Status::Ready;
        while self.status == Status::Ready {
            // step() records the fault and flips status, so the error
            // itself needs no extra handling here
            let _ = self.step();
        }

        debug!("machine '{}': stopped {}", self.label, self.status);
        self.status
    }

    /// Run until the next output value is available and take it.
    ///
    /// Returns `Ok(None)` when the machine halts before producing another
    /// output. An input pause here means the host violated its protocol by
    /// not pre-feeding enough input, and a fault surfaces as the recorded
    /// error.
    pub fn run_until_output(&mut self) -> Result<Option<i64>, VMError> {
        match self.run() {
            Status::Paused(PauseReason::OutputReady) => Ok(self.take_output()),
            Status::Halted => Ok(None),
            Status::Paused(PauseReason::AwaitingInput) => Err(VMError::ProtocolError {
                details: format!(
                    "machine '{}' requested input while an output was expected",
                    self.label
                ),
            }),
            Status::Faulted => Err(self
                .fault
                .clone()
                .unwrap_or_else(|| VMError::MachineFaulted {
                    label: self.label.clone(),
                })),
            Status::Ready => unreachable!("run() never returns Ready"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halted_machine_stays_halted() {
        let mut machine = Machine::new(&[99]);
        assert_eq!(machine.run(), Status::Halted);
        assert_eq!(machine.run(), Status::Halted);
        assert!(machine.fault().is_none());
    }

    #[test]
    fn test_feed_input_resumes_awaiting_machine() {
        // read one input into address 0, then halt
        let mut machine = Machine::new(&[3, 0, 99]);
        assert_eq!(machine.run(), Status::Paused(PauseReason::AwaitingInput));

        machine.feed_input(7);
        assert_eq!(machine.status(), Status::Ready);
        assert_eq!(machine.run(), Status::Halted);
        assert_eq!(machine.peek(0).unwrap(), 7);
    }

    #[test]
    fn test_feed_input_on_terminal_machine_is_ignored() {
        let mut machine = Machine::new(&[99]);
        machine.run();
        machine.feed_input(1);
        assert_eq!(machine.status(), Status::Halted);
    }

    #[test]
    fn test_output_pause_and_drain() {
        // output 5, output 6, halt
        let mut machine = Machine::new(&[104, 5, 104, 6, 99]);

        assert_eq!(machine.run(), Status::Paused(PauseReason::OutputReady));
        assert_eq!(machine.take_output(), Some(5));

        assert_eq!(machine.run(), Status::Paused(PauseReason::OutputReady));
        assert_eq!(machine.take_output(), Some(6));

        assert_eq!(machine.run(), Status::Halted);
        assert_eq!(machine.take_output(), None);
    }

    #[test]
    fn test_run_until_output() {
        let mut machine = Machine::new(&[104, 42, 99]);
        assert_eq!(machine.run_until_output().unwrap(), Some(42));
        assert_eq!(machine.run_until_output().unwrap(), None);
    }

    #[test]
    fn test_poke_and_peek() {
        let mut machine = Machine::new(&[1, 0, 0, 0, 99]);
        machine.poke(0, 2).unwrap();
        assert_eq!(machine.peek(0).unwrap(), 2);
    }
}
