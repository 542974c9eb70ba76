//! Intcode CLI — run programs and amplifier circuits.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, input or decode error
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "chain" => commands::chain(&args[2..]),
        "tune" => commands::tune(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: intcode <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog> [--input N]... [--max-steps N] [--max-memory N]");
    eprintln!("                                                   Run a program, printing outputs");
    eprintln!("  chain <prog> --phases a,b,.. [--feedback]        Run an amplifier circuit");
    eprintln!("  tune <prog> [--phases a,b,..] [--feedback]       Find the strongest phase ordering");
    eprintln!();
    eprintln!("chain and tune also accept --max-steps N per stage.");
    eprintln!();
    eprintln!("Without --input, `run` reads one integer per line from stdin when asked.");
}
