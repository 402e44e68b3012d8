//! The `run` command: load a standardized tree and evaluate it.

use rpal_eval::{stdout_handler, EvalCounters, MachineBuilder, MachineConfig, SharedPrintHandler};

use super::{fail, load, read_file, CommandError};

/// Options accepted by `rpal run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print `EvalCounters` to stderr after the run.
    pub profile: bool,
    pub max_depth: Option<usize>,
}

/// Parse `rpal run` flags. Returns the options and the file path.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, String), String> {
    let mut options = RunOptions::default();
    let mut path = None;

    for arg in args {
        if arg == "--profile" {
            options.profile = true;
        } else if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse::<usize>()
                .map_err(|_| format!("invalid --max-depth value '{depth}'"))?;
            options.max_depth = Some(depth);
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }

    let path = path.ok_or_else(|| "missing file path".to_string())?;
    Ok((options, path))
}

/// What one run produced.
pub struct RunOutcome {
    pub result: Result<(), CommandError>,
    /// Counters up to the end of the run or its first error, when profiling
    /// was requested.
    pub counters: Option<EvalCounters>,
}

/// Evaluate a standardized tree dump, sending `Print` output to `handler`.
pub fn run_source(text: &str, options: RunOptions, handler: SharedPrintHandler) -> RunOutcome {
    let program = match load(text) {
        Ok(program) => program,
        Err(e) => {
            return RunOutcome {
                result: Err(e),
                counters: None,
            }
        }
    };
    let mut machine = MachineBuilder::new(&program.structure, &program.interner)
        .print_handler(handler)
        .config(MachineConfig {
            max_depth: options.max_depth,
        })
        .profile(options.profile)
        .build();
    let result = machine.run().map(|_| ()).map_err(CommandError::from);
    RunOutcome {
        result,
        counters: machine.counters().cloned(),
    }
}

/// Run a `.st` file, printing to stdout.
///
/// With `--profile` the counters go to stderr before any error is reported.
pub fn run_file(path: &str, options: RunOptions) {
    let text = read_file(path);
    let outcome = run_source(&text, options, stdout_handler());
    if let Some(counters) = &outcome.counters {
        eprintln!("{}", counters.report());
    }
    if let Err(e) = outcome.result {
        fail(path, &e);
    }
}
