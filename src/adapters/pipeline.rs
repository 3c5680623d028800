//! Amplifier pipeline adapter
//!
//! Wires several machines loaded with the same program into a chain. Each
//! machine is seeded with a distinct phase value as its first input; the
//! chain then threads a signal through the machines either once (linear
//! series) or cyclically until the last machine halts (feedback loop).
//!
//! Scheduling is round-robin by this adapter: at most one machine executes
//! at a time, and each is driven only to its next output before the signal
//! moves on.

use crate::vm::{Machine, Status, VMError};

use log::{debug, info};

/// A chain of machines threaded by a single signal
pub struct AmplifierChain {
    machines: Vec<Machine>,
}

impl AmplifierChain {
    /// Load one machine per phase value, each seeded with its phase as the
    /// first input.
    pub fn new(program: &[i64], phases: &[i64]) -> Self {
        let machines = phases
            .iter()
            .enumerate()
            .map(|(i, &phase)| {
                let mut machine = Machine::with_label(program, &format!("amp-{}", i));
                machine.feed_input(phase);
                machine
            })
            .collect();
        Self { machines }
    }

    /// Number of machines in the chain
    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Run the chain once, linearly: machine i's first output becomes
    /// machine i+1's input. Returns the last machine's output.
    pub fn run_series(&mut self, input: i64) -> Result<i64, VMError> {
        let mut signal = input;
        for machine in &mut self.machines {
            machine.feed_input(signal);
            signal = machine
                .run_until_output()?
                .ok_or_else(|| VMError::ProtocolError {
                    details: format!(
                        "machine '{}' halted before producing an output",
                        machine.label()
                    ),
                })?;
        }
        debug!("series run produced signal {}", signal);
        Ok(signal)
    }

    /// Run the chain as a feedback loop: the last machine's output feeds
    /// back into the first, round after round, until the last machine
    /// halts. Returns the last output it produced before halting.
    pub fn run_feedback(&mut self, input: i64) -> Result<i64, VMError> {
        let count = self.machines.len();
        let mut signal = input;
        let mut final_signal = None;

        while !self.last_halted() {
            for i in 0..count {
                let machine = &mut self.machines[i];
                if machine.status() == Status::Halted {
                    continue;
                }
                machine.feed_input(signal);
                if let Some(value) = machine.run_until_output()? {
                    signal = value;
                    if i == count - 1 {
                        final_signal = Some(value);
                    }
                }
            }
        }

        final_signal.ok_or_else(|| VMError::ProtocolError {
            details: "feedback loop ended before the last machine produced an output".to_string(),
        })
    }

    fn last_halted(&self) -> bool {
        self.machines
            .last()
            .map_or(true, |machine| machine.status() == Status::Halted)
    }
}

/// Highest series signal over every permutation of the given phases.
pub fn best_series_signal(program: &[i64], phases: &[i64]) -> Result<i64, VMError> {
    best_signal(program, phases, |chain| chain.run_series(0))
}

/// Highest feedback-loop signal over every permutation of the given phases.
pub fn best_feedback_signal(program: &[i64], phases: &[i64]) -> Result<i64, VMError> {
    best_signal(program, phases, |chain| chain.run_feedback(0))
}

fn best_signal<F>(program: &[i64], phases: &[i64], mut run: F) -> Result<i64, VMError>
where
    F: FnMut(&mut AmplifierChain) -> Result<i64, VMError>,
{
    if phases.is_empty() {
        return Err(VMError::ProtocolError {
            details: "no phase values supplied".to_string(),
        });
    }

    let mut best = None;
    for permutation in permutations(phases) {
        let mut chain = AmplifierChain::new(program, &permutation);
        let signal = run(&mut chain)?;
        if best.map_or(true, |current| signal > current) {
            best = Some(signal);
        }
    }

    let best = best.ok_or_else(|| VMError::ProtocolError {
        details: "no phase values supplied".to_string(),
    })?;
    info!("best signal over {} phases: {}", phases.len(), best);
    Ok(best)
}

/// All orderings of the given values (Heap's algorithm).
fn permutations(values: &[i64]) -> Vec<Vec<i64>> {
    fn generate(k: usize, values: &mut Vec<i64>, out: &mut Vec<Vec<i64>>) {
        if k <= 1 {
            out.push(values.clone());
            return;
        }
        for i in 0..k {
            generate(k - 1, values, out);
            if k % 2 == 0 {
                values.swap(i, k - 1);
            } else {
                values.swap(0, k - 1);
            }
        }
    }

    let mut scratch = values.to_vec();
    let mut out = Vec::new();
    let len = scratch.len();
    generate(len, &mut scratch, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutations_count_and_uniqueness() {
        let mut perms = permutations(&[0, 1, 2]);
        assert_eq!(perms.len(), 6);
        perms.sort();
        perms.dedup();
        assert_eq!(perms.len(), 6);
    }

    #[test]
    fn test_series_reference_signals() {
        let program = [
            3, 15, 3, 16, 1002, 16, 10, 16, 1, 16, 15, 15, 4, 15, 99, 0, 0,
        ];
        let mut chain = AmplifierChain::new(&program, &[4, 3, 2, 1, 0]);
        assert_eq!(chain.run_series(0).unwrap(), 43210);
    }

    #[test]
    fn test_best_series_signal() {
        let program = [
            3, 23, 3, 24, 1002, 24, 10, 24, 1002, 23, -1, 23, 101, 5, 23, 23, 1, 24, 23, 23, 4,
            23, 99, 0, 0,
        ];
        assert_eq!(best_series_signal(&program, &[0, 1, 2, 3, 4]).unwrap(), 54321);
    }

    #[test]
    fn test_feedback_reference_signal() {
        let program = [
            3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28, -1,
            28, 1005, 28, 6, 99, 0, 0, 5,
        ];
        let mut chain = AmplifierChain::new(&program, &[9, 8, 7, 6, 5]);
        assert_eq!(chain.run_feedback(0).unwrap(), 139_629_729);
    }

    #[test]
    fn test_feedback_signal_depends_on_phase_order() {
        let program = [
            3, 26, 1001, 26, -4, 26, 3, 27, 1002, 27, 2, 27, 1, 27, 26, 27, 4, 27, 1001, 28, -1,
            28, 1005, 28, 6, 99, 0, 0, 5,
        ];

        let mut chain = AmplifierChain::new(&program, &[5, 6, 7, 8, 9]);
        let reordered = chain.run_feedback(0).unwrap();
        assert_ne!(reordered, 139_629_729);

        // deterministic: the same permutation always yields the same signal
        let mut again = AmplifierChain::new(&program, &[5, 6, 7, 8, 9]);
        assert_eq!(again.run_feedback(0).unwrap(), reordered);
    }

    #[test]
    fn test_empty_chain_is_protocol_error() {
        assert!(best_series_signal(&[99], &[]).is_err());
    }
}
