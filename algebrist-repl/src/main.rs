mod error;

use algebrist::{config::SolverConfigBuilder, Solver, EXAMPLES};
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, IsTerminal, Read}};
use tracing_subscriber::EnvFilter;

/// Command line options.
#[derive(Debug, Default)]
struct Options {
    /// Print solutions as JSON objects.
    json: bool,

    /// Print the sample queries and exit.
    examples: bool,

    /// Overrides the root verification tolerance.
    tolerance: Option<f64>,

    /// File to read the query from.
    file: Option<String>,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, Error> {
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => options.json = true,
                "--examples" => options.examples = true,
                "--tolerance" => {
                    let value = args.next()
                        .ok_or_else(|| Error::Usage("`--tolerance` needs a value".to_string()))?;
                    let tolerance = value.parse::<f64>()
                        .ok()
                        .filter(|t| t.is_finite() && *t > 0.0)
                        .ok_or_else(|| Error::Usage(format!("invalid tolerance `{}`", value)))?;
                    options.tolerance = Some(tolerance);
                },
                flag if flag.starts_with("--") => {
                    return Err(Error::Usage(format!("unknown option `{}`", flag)));
                },
                _ if options.file.is_none() => options.file = Some(arg),
                _ => return Err(Error::Usage(format!("unexpected argument `{}`", arg))),
            }
        }
        Ok(options)
    }
}

/// Installs the log subscriber. The filter is read from `ALGEBRIST_LOG`, and logs go to stderr so
/// they never mix with solutions.
fn init_logging() {
    let filter = EnvFilter::try_from_env("ALGEBRIST_LOG")
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Solves the query, printing the solution or the error.
fn solve(input: &str, solver: &Solver, json: bool) {
    if let Err(err) = try_solve(input, solver, json) {
        if json {
            println!("{}", serde_json::json!({ "ok": false, "error": err.to_string() }));
        } else {
            err.report_to_stderr(input);
        }
    }
}

fn try_solve(input: &str, solver: &Solver, json: bool) -> Result<(), Error> {
    let solution = solver.solve(input)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        println!("{}", solution);
    }
    Ok(())
}

fn run(options: Options) -> Result<(), Error> {
    tracing::debug!(?options, "starting");
    if options.examples {
        EXAMPLES.iter().for_each(|example| println!("{}\n", example));
        return Ok(());
    }

    let mut config = SolverConfigBuilder::new();
    if let Some(tolerance) = options.tolerance {
        config = config.root_tolerance(tolerance);
    }
    let solver = Solver::with_config(config.build());

    if let Some(filename) = options.file {
        // solve the query in the file
        let input = fs::read_to_string(filename)?;
        solve(&input, &solver, options.json);
    } else if !io::stdin().is_terminal() {
        // read the query from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        solve(&input, &solver, options.json);
    } else {
        // interactive mode, one query per line
        let mut rl = DefaultEditor::new().map_err(|err| Error::Usage(err.to_string()))?;

        fn process_line(rl: &mut DefaultEditor, solver: &Solver, json: bool) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            solve(&input, solver, json);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &solver, options.json) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let result = Options::parse(std::env::args().skip(1)).and_then(run);
    if let Err(err) = result {
        err.report_to_stderr("");
        std::process::exit(1);
    }
}
