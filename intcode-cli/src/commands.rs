//! CLI command implementations.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};

use intcode_common::Program;
use intcode_pipeline::{Circuit, PipelineError, Topology};
use intcode_vm::{Event, Executor, RuntimeError};

/// Flags accepted across commands; each command allows a subset.
#[derive(Debug, Default)]
struct Options {
    inputs: Vec<i64>,
    phases: Option<Vec<i64>>,
    feedback: bool,
    max_steps: Option<u64>,
    max_memory: Option<usize>,
}

const KNOWN_FLAGS: &[&str] = &["--input", "--max-steps", "--max-memory", "--phases", "--feedback"];
const RUN_FLAGS: &[&str] = &["--input", "--max-steps", "--max-memory"];
const CIRCUIT_FLAGS: &[&str] = &["--phases", "--feedback", "--max-steps"];

/// Run a program to completion, printing each output on its own line.
pub fn run(args: &[String]) -> Result<(), i32> {
    let (path, opts) = parse_args("run", args, RUN_FLAGS)?;
    let program = read_program(path)?;

    let mut vm = Executor::new(&program);
    if let Some(limit) = opts.max_steps {
        vm = vm.with_step_limit(limit);
    }
    if let Some(limit) = opts.max_memory {
        vm = vm.with_memory_limit(limit);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let from_stdin = opts.inputs.is_empty();
    let interactive = from_stdin && stdin.is_terminal();
    let mut lines = stdin.lock().lines();
    let mut queued = opts.inputs.iter().copied();

    let mut input = None;
    loop {
        match vm.resume(input.take()).map_err(runtime_error)? {
            Event::Output(value) => writeln!(out, "{value}").map_err(|e| {
                eprintln!("error: cannot write output: {e}");
                1
            })?,
            Event::NeedInput { at } => {
                let next = if from_stdin {
                    read_stdin_value(&mut lines, interactive)?
                } else {
                    queued.next()
                };
                let value = next.ok_or_else(|| runtime_error(RuntimeError::InputExhausted { at }))?;
                input = Some(value);
            }
            Event::Halted(_) => break,
        }
    }

    out.flush().map_err(|e| {
        eprintln!("error: cannot write output: {e}");
        1
    })
}

/// Run an amplifier circuit with explicit phases and print the final signal.
pub fn chain(args: &[String]) -> Result<(), i32> {
    let (path, opts) = parse_args("chain", args, CIRCUIT_FLAGS)?;
    let Some(phases) = opts.phases.as_deref() else {
        eprintln!("error: chain requires --phases");
        eprintln!("Usage: intcode chain <prog> --phases a,b,.. [--feedback]");
        return Err(1);
    };
    let program = read_program(path)?;

    let mut circuit = Circuit::new(&program, phases, topology(&opts)).map_err(report)?;
    if let Some(limit) = opts.max_steps {
        circuit = circuit.with_step_limit(limit);
    }

    let signal = circuit.run().map_err(report)?;
    println!("{signal}");
    Ok(())
}

/// Search all orderings of the phase set and print the best one.
pub fn tune(args: &[String]) -> Result<(), i32> {
    let (path, opts) = parse_args("tune", args, CIRCUIT_FLAGS)?;
    let program = read_program(path)?;
    let topology = topology(&opts);
    let phases = opts
        .phases
        .clone()
        .unwrap_or_else(|| topology.default_phases().to_vec());

    let tuning = intcode_pipeline::best_phase_setting(&program, &phases, topology, opts.max_steps)
        .map_err(report)?;

    println!("{} -> {}", join(&tuning.phases), tuning.signal);
    Ok(())
}

// --- Helpers ---

fn topology(opts: &Options) -> Topology {
    if opts.feedback {
        Topology::Feedback
    } else {
        Topology::Serial
    }
}

/// Print a VM error and map it to an exit code.
fn runtime_error(err: RuntimeError) -> i32 {
    eprintln!("runtime error: {err}");
    3
}

/// Print a circuit error and map it to an exit code.
fn report(err: PipelineError) -> i32 {
    match err {
        PipelineError::EmptyPhases | PipelineError::TooManyPhases { .. } => {
            eprintln!("error: {err}");
            1
        }
        PipelineError::Stage { .. } | PipelineError::Stalled { .. } | PipelineError::NoOutput { .. } => {
            eprintln!("runtime error: {err}");
            3
        }
    }
}

/// Read and parse a program file.
fn read_program(path: &str) -> Result<Program, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })?;

    Program::parse(&text).map_err(|e| {
        eprintln!("error: invalid program: {e}");
        1
    })
}

/// Split `args` into the program path and flags. Flags outside `allowed`
/// are rejected.
fn parse_args<'a>(
    command: &str,
    args: &'a [String],
    allowed: &[&str],
) -> Result<(&'a str, Options), i32> {
    let mut path = None;
    let mut opts = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        if KNOWN_FLAGS.contains(&flag) && !allowed.contains(&flag) {
            eprintln!("error: {flag} is not valid for {command}");
            return Err(1);
        }
        match flag {
            "--input" => opts.inputs.push(parse_number(flag_value(&mut iter, "--input")?)?),
            "--max-steps" => {
                opts.max_steps = Some(parse_number(flag_value(&mut iter, "--max-steps")?)?)
            }
            "--max-memory" => {
                opts.max_memory = Some(parse_number(flag_value(&mut iter, "--max-memory")?)?)
            }
            "--phases" => opts.phases = Some(parse_list(flag_value(&mut iter, "--phases")?)?),
            "--feedback" => opts.feedback = true,
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown flag '{flag}'");
                return Err(1);
            }
            other if path.is_none() => path = Some(other),
            other => {
                eprintln!("error: unexpected argument '{other}'");
                return Err(1);
            }
        }
    }

    match path {
        Some(path) => Ok((path, opts)),
        None => {
            eprintln!("error: {command} requires a program file");
            eprintln!("Usage: intcode {command} <prog> [flags]");
            Err(1)
        }
    }
}

fn flag_value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a str, i32> {
    iter.next().map(String::as_str).ok_or_else(|| {
        eprintln!("error: {flag} requires a value");
        1
    })
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, i32> {
    text.trim().parse().map_err(|_| {
        eprintln!("error: '{text}' is not a valid number");
        1
    })
}

fn parse_list(text: &str) -> Result<Vec<i64>, i32> {
    text.split(',').map(parse_number::<i64>).collect()
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Read the next non-blank line from stdin as an input value.
///
/// Returns `Ok(None)` at end of input, which the VM reports as exhausted
/// input. An unreadable or non-integer line is a usage error.
fn read_stdin_value<B: BufRead>(
    lines: &mut io::Lines<B>,
    interactive: bool,
) -> Result<Option<i64>, i32> {
    loop {
        if interactive {
            eprint!("input> ");
        }
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.map_err(|e| {
            eprintln!("error: cannot read input: {e}");
            1
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        return line.parse().map(Some).map_err(|_| {
            eprintln!("error: '{line}' is not a valid integer");
            1
        });
    }
}
