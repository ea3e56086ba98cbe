use std::{fs, process::ExitCode};

use clap::Parser;
use tally::{Context, build, evaluate};
use tracing_subscriber::EnvFilter;

/// tally evaluates arithmetic, comparison and string expressions over exact
/// decimal numbers.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tally to read expressions from a file, one per line, instead of
    /// taking a single expression. Blank lines and lines starting with `#`
    /// are skipped.
    #[arg(short, long)]
    file: bool,

    /// Binds a variable as `name=expression`. The expression is evaluated
    /// with the bindings given before it. May be repeated.
    #[arg(long = "var", value_name = "NAME=EXPR", value_parser = parse_binding)]
    vars: Vec<(String, String)>,

    /// Prints the built tree before each result.
    #[arg(short, long)]
    tree: bool,

    /// Logs tree construction, reduction passes and failed lookups.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn parse_binding(binding: &str) -> Result<(String, String), String> {
    match binding.split_once('=') {
        Some((name, expression)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), expression.to_string()))
        },
        _ => Err(format!("expected NAME=EXPR, found '{binding}'")),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Evaluates one expression and prints the result. Returns `false` when the
/// result is `Undefined`.
fn run(expression: &str, context: &Context, print_tree: bool) -> bool {
    if print_tree {
        match build(expression) {
            Ok(tree) => println!("tree: {tree}"),
            Err(e) => println!("tree: {e}"),
        }
    }

    let value = evaluate(expression, context);
    println!("{value}");
    !value.is_undefined()
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let context = args.vars.iter().fold(Context::new(), |context, (name, expression)| {
                                      let value = evaluate(expression, &context);
                                      context.with_variable(name.clone(), value)
                                  });

    let expressions = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(source) => source.lines()
                                .map(str::trim)
                                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                                .map(str::to_string)
                                .collect(),
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        vec![args.contents]
    };

    let mut all_defined = true;
    for expression in &expressions {
        all_defined &= run(expression, &context, args.tree);
    }

    if all_defined { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
