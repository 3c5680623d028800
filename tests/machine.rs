use intcode::adapters::run_diagnostic;
use intcode::vm::{Machine, PauseReason, Status, VMError};

#[test]
fn test_arithmetic_program_halts_with_3500() {
    let mut machine = Machine::new(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
    assert_eq!(machine.run(), Status::Halted);
    assert_eq!(machine.peek(0).unwrap(), 3500);
}

#[test]
fn test_equals_eight_program() {
    let program = [3, 9, 8, 9, 10, 9, 4, 9, 99, -1, 8];
    assert_eq!(run_diagnostic(&program, &[8]).unwrap(), vec![1]);
    assert_eq!(run_diagnostic(&program, &[7]).unwrap(), vec![0]);
    assert_eq!(run_diagnostic(&program, &[1000]).unwrap(), vec![0]);
}

#[test]
fn test_self_replicating_program_emits_itself() {
    let quine = [
        109, 1, 204, -1, 1001, 100, 1, 100, 1008, 100, 16, 101, 1006, 101, 0, 99,
    ];
    let outputs = run_diagnostic(&quine, &[]).unwrap();
    assert_eq!(outputs, quine.to_vec());
}

#[test]
fn test_large_number_support() {
    // 16-digit product of two 8-digit factors
    let outputs = run_diagnostic(&[1102, 34_915_192, 34_915_192, 7, 4, 7, 99, 0], &[]).unwrap();
    assert_eq!(outputs, vec![1_219_070_632_396_864]);

    // a large immediate passes through untouched
    let outputs = run_diagnostic(&[104, 1_125_899_906_842_624, 99], &[]).unwrap();
    assert_eq!(outputs, vec![1_125_899_906_842_624]);
}

#[test]
fn test_branching_comparator_program() {
    // outputs 999 / 1000 / 1001 for input below / equal to / above 8
    let program = [
        3, 21, 1008, 21, 8, 20, 1005, 20, 22, 107, 8, 21, 20, 1006, 20, 31, 1106, 0, 36, 98, 0,
        0, 1002, 21, 125, 20, 4, 20, 1105, 1, 46, 104, 999, 1105, 1, 46, 1101, 1000, 1, 20, 4,
        20, 1105, 1, 46, 98, 99,
    ];
    assert_eq!(run_diagnostic(&program, &[3]).unwrap(), vec![999]);
    assert_eq!(run_diagnostic(&program, &[8]).unwrap(), vec![1000]);
    assert_eq!(run_diagnostic(&program, &[55]).unwrap(), vec![1001]);
}

#[test]
fn test_mode_equivalence_immediate_vs_position() {
    // the same addition expressed with immediate operands...
    let mut immediate = Machine::new(&[1101, 5, 7, 0, 99]);
    immediate.run();

    // ...and with position operands pointing at cells holding 5 and 7
    let mut position = Machine::new(&[1, 5, 6, 0, 99, 5, 7]);
    position.run();

    assert_eq!(immediate.peek(0).unwrap(), 12);
    assert_eq!(position.peek(0).unwrap(), immediate.peek(0).unwrap());
}

#[test]
fn test_relative_operand_resolves_against_base() {
    // set base to 6, then output mem[base + 0]
    let mut machine = Machine::new(&[109, 6, 204, 0, 99, 0, 42]);
    assert_eq!(machine.run_until_output().unwrap(), Some(42));
}

#[test]
fn test_pause_resume_equivalence() {
    // count down from 5, emitting each value
    let countdown = [1101, 5, 0, 20, 4, 20, 1001, 20, -1, 20, 1005, 20, 4, 99];

    // uninterrupted: step through without reacting to pauses
    let mut stepped = Machine::new(&countdown);
    while !stepped.status().is_terminal() {
        let _ = stepped.step();
    }
    let stepped_outputs = stepped.drain_outputs();

    // interactive: resume from every output pause, draining one at a time
    let mut paused = Machine::new(&countdown);
    let mut paused_outputs = Vec::new();
    loop {
        match paused.run() {
            Status::Paused(PauseReason::OutputReady) => {
                paused_outputs.push(paused.take_output().unwrap());
            }
            Status::Halted => break,
            other => panic!("unexpected status {:?}", other),
        }
    }

    assert_eq!(stepped_outputs, vec![5, 4, 3, 2, 1]);
    assert_eq!(paused_outputs, stepped_outputs);
    assert_eq!(paused.tape(), stepped.tape());
}

#[test]
fn test_input_starvation_pause_is_distinguishable() {
    let mut starved = Machine::new(&[3, 0, 99]);
    assert_eq!(starved.run(), Status::Paused(PauseReason::AwaitingInput));

    let mut emitting = Machine::new(&[104, 1, 99]);
    assert_eq!(emitting.run(), Status::Paused(PauseReason::OutputReady));

    assert_ne!(starved.status(), emitting.status());
}

#[test]
fn test_faults_carry_reason_and_are_terminal() {
    let mut machine = Machine::new(&[203, -10, 99]);
    assert_eq!(machine.run(), Status::Faulted);
    assert!(matches!(
        machine.fault(),
        Some(VMError::AddressFault { address: -10 })
    ));

    // feeding input does not revive a faulted machine
    machine.feed_input(0);
    assert_eq!(machine.run(), Status::Faulted);
}
