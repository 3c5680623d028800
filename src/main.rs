use clap::{Arg, Command};
use std::path::PathBuf;
use std::process;
use thiserror::Error;

use intcode::adapters::{best_feedback_signal, best_series_signal, run_diagnostic, Arcade, Robot};
use intcode::events::{set_log_format, Event, LogFormat};
use intcode::program::load_program;
use intcode::vm::VMError;

#[derive(Debug, Error)]
enum AppError {
    #[error("VM error: {0}")]
    VM(#[from] VMError),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Other(s)
    }
}

fn main() {
    env_logger::init();

    // Parse command line arguments
    let matches = Command::new("intcode")
        .version("0.2.0")
        .about("Suspendable IntCode virtual machine with pipeline, robot, and arcade adapters")
        .arg(
            Arg::new("program")
                .value_name("FILE")
                .help("Program file: one line of comma-separated integers")
                .required(true),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Execution mode: console, amplify, feedback, robot, or arcade")
                .default_value("console"),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("VALUE")
                .help("Input value fed to the machine (can be used multiple times)")
                .action(clap::ArgAction::Append)
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("phases")
                .long("phases")
                .value_name("LIST")
                .help("Comma-separated phase values for amplify/feedback modes"),
        )
        .arg(
            Arg::new("start-color")
                .long("start-color")
                .value_name("COLOR")
                .help("Robot starting panel color: 0 black, 1 white")
                .default_value("0"),
        )
        .arg(
            Arg::new("play")
                .long("play")
                .help("Arcade mode: insert quarters and let the auto-player finish the game")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("screen")
                .long("screen")
                .help("Arcade/robot mode: render the final screen or painted hull")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output events in JSON format")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("json") {
        if let Err(err) = set_log_format(LogFormat::Json) {
            eprintln!("Failed to set log format: {}", err);
            process::exit(1);
        }
    }

    if let Err(err) = run(&matches) {
        let _ = Event::error("cli", err.to_string()).emit();
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<(), AppError> {
    let path = PathBuf::from(
        matches
            .get_one::<String>("program")
            .expect("program is required"),
    );
    let program = load_program(&path)?;

    let inputs = parse_values(matches, "input")?;
    let mode = matches
        .get_one::<String>("mode")
        .expect("mode has a default");

    match mode.as_str() {
        "console" => run_console(&program, &inputs),
        "amplify" => run_amplify(matches, &program, false),
        "feedback" => run_amplify(matches, &program, true),
        "robot" => run_robot(matches, &program),
        "arcade" => run_arcade(matches, &program),
        other => Err(AppError::Other(format!(
            "unknown mode '{}': expected console, amplify, feedback, robot, or arcade",
            other
        ))),
    }
}

fn run_console(program: &[i64], inputs: &[i64]) -> Result<(), AppError> {
    let outputs = run_diagnostic(program, inputs)?;
    for value in &outputs {
        println!("{}", value);
    }
    Event::info("console", format!("halted after {} outputs", outputs.len()))
        .with_data(serde_json::json!({ "outputs": outputs }))
        .emit()?;
    Ok(())
}

fn run_amplify(
    matches: &clap::ArgMatches,
    program: &[i64],
    feedback: bool,
) -> Result<(), AppError> {
    let phases = match matches.get_one::<String>("phases") {
        Some(text) => intcode::parse_program(text)?,
        // conventional defaults: 0-4 for one-shot series, 5-9 for feedback
        None if feedback => vec![5, 6, 7, 8, 9],
        None => vec![0, 1, 2, 3, 4],
    };

    let signal = if feedback {
        best_feedback_signal(program, &phases)?
    } else {
        best_series_signal(program, &phases)?
    };

    println!("{}", signal);
    Event::info(
        "pipeline",
        format!(
            "best {} signal over {} machines",
            if feedback { "feedback" } else { "series" },
            phases.len()
        ),
    )
    .with_data(serde_json::json!({ "signal": signal }))
    .emit()?;
    Ok(())
}

fn run_robot(matches: &clap::ArgMatches, program: &[i64]) -> Result<(), AppError> {
    let start_color: i64 = matches
        .get_one::<String>("start-color")
        .expect("start-color has a default")
        .parse()
        .map_err(|_| AppError::Other("start-color must be 0 or 1".to_string()))?;

    let mut robot = Robot::new(program);
    if start_color != 0 {
        robot.start_on(start_color);
    }
    robot.run()?;

    println!("{}", robot.panels_painted());
    if matches.get_flag("screen") {
        print!("{}", robot.render());
    }
    Event::info("robot", format!("painted {} panels", robot.panels_painted())).emit()?;
    Ok(())
}

fn run_arcade(matches: &clap::ArgMatches, program: &[i64]) -> Result<(), AppError> {
    let mut arcade = Arcade::new(program);

    if matches.get_flag("play") {
        let score = arcade.autoplay()?;
        println!("{}", score);
        Event::info("arcade", format!("final score {}", score)).emit()?;
    } else {
        arcade.run_demo()?;
        println!("{}", arcade.block_count());
        Event::info("arcade", format!("{} blocks on screen", arcade.block_count())).emit()?;
    }

    if matches.get_flag("screen") {
        print!("{}", arcade.render());
    }
    Ok(())
}

fn parse_values(matches: &clap::ArgMatches, name: &str) -> Result<Vec<i64>, AppError> {
    matches
        .get_many::<String>(name)
        .unwrap_or_default()
        .map(|text| {
            text.parse::<i64>()
                .map_err(|err| AppError::Other(format!("invalid {} value '{}': {}", name, text, err)))
        })
        .collect()
}
