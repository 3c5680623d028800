//! Console / diagnostic adapter
//!
//! The simplest host: pre-feed a sequence of inputs, drive the machine, and
//! collect every output in order until it halts. Used for diagnostic
//! programs that self-test and report status codes.

use crate::vm::{Machine, PauseReason, Status, VMError};

use log::info;

/// Run a program to completion with a fixed input sequence.
///
/// Returns every output in emission order. A request for input beyond the
/// supplied sequence is reported as the machine's `AwaitingInput` pause
/// turned into a protocol error, since a diagnostic run has no interactive
/// source to draw from.
pub fn run_diagnostic(program: &[i64], inputs: &[i64]) -> Result<Vec<i64>, VMError> {
    let mut machine = Machine::with_label(program, "console");
    for &value in inputs {
        machine.feed_input(value);
    }

    let mut outputs = Vec::new();
    loop {
        match machine.run() {
            Status::Paused(PauseReason::OutputReady) => {
                if let Some(value) = machine.take_output() {
                    outputs.push(value);
                }
            }
            Status::Paused(PauseReason::AwaitingInput) => {
                return Err(VMError::ProtocolError {
                    details: format!(
                        "diagnostic run supplied {} inputs but the program wanted more",
                        inputs.len()
                    ),
                });
            }
            Status::Halted => break,
            Status::Faulted => {
                return Err(machine.fault().cloned().unwrap_or(VMError::MachineFaulted {
                    label: machine.label().to_string(),
                }))
            }
            Status::Ready => unreachable!("run() never returns Ready"),
        }
    }

    info!("diagnostic run produced {} outputs", outputs.len());
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_program() {
        // read one value and echo it back
        let outputs = run_diagnostic(&[3, 0, 4, 0, 99], &[1]).unwrap();
        assert_eq!(outputs, vec![1]);
    }

    #[test]
    fn test_equals_eight_position_mode() {
        let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
        assert_eq!(run_diagnostic(&program, &[8]).unwrap(), vec![1]);
        assert_eq!(run_diagnostic(&program, &[7]).unwrap(), vec![0]);
        assert_eq!(run_diagnostic(&program, &[-3]).unwrap(), vec![0]);
    }

    #[test]
    fn test_missing_input_is_protocol_error() {
        let err = run_diagnostic(&[3, 0, 99], &[]).unwrap_err();
        assert!(matches!(err, VMError::ProtocolError { .. }));
    }

    #[test]
    fn test_fault_surfaces_as_error() {
        let err = run_diagnostic(&[42, 0, 0, 0], &[]).unwrap_err();
        assert!(matches!(err, VMError::UnknownOpcode { .. }));
    }
}
