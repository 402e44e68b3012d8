//! RPAL CSE machine CLI.

use rpalc::commands::{check_file, control_file, parse_run_options, run_file};

fn main() {
    rpalc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => match parse_run_options(&args[2..]) {
            Ok((options, path)) => run_file(&path, options),
            Err(msg) => {
                eprintln!("error: {msg}");
                eprintln!("Usage: rpal run <file.st> [--profile] [--max-depth=N]");
                std::process::exit(1);
            }
        },
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: rpal check <file.st>");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "control" => {
            if args.len() < 3 {
                eprintln!("Usage: rpal control <file.st>");
                std::process::exit(1);
            }
            control_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("rpal {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("RPAL CSE machine");
    println!();
    println!("Usage: rpal <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.st>        Evaluate a standardized tree");
    println!("  check <file.st>      Validate a standardized tree (no execution)");
    println!("  control <file.st>    Print the control structures");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --profile            Print evaluation counters to stderr");
    println!("  --max-depth=<n>      Abort when more than n closure frames are live");
    println!();
    println!("Environment:");
    println!("  RPAL_LOG             Tracing filter, e.g. rpal_eval=debug");
}
