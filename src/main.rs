use std::{fs, process::ExitCode};

use clap::Parser;
use exprval::{Context, MapContext, ParseOptions, parse_with};
use tracing_subscriber::EnvFilter;

/// exprval parses and evaluates infix arithmetic expressions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells exprval to read expressions from a file, one per line, instead
    /// of taking a single expression.
    #[arg(short, long)]
    file: bool,

    /// Binds a variable, as NAME=VALUE. May be repeated.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_binding)]
    define: Vec<(String, f64)>,

    /// Starts from an empty context instead of the builtin functions and
    /// constants.
    #[arg(long)]
    no_builtins: bool,

    /// Maximum nesting of parentheses, calls and prefix operators.
    #[arg(long, default_value_t = ParseOptions::default().max_depth)]
    max_depth: usize,

    /// Prints the parsed tree, fully parenthesized, instead of evaluating it.
    #[arg(long)]
    ast: bool,

    contents: String,
}

fn parse_binding(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s.split_once('=')
                         .ok_or_else(|| format!("expected NAME=VALUE, found '{s}'"))?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(format!("'{name}' is not a valid variable name"));
    }
    let value = value.trim()
                     .parse()
                     .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.to_string(), value))
}

/// Matches the lexer's identifier rule, `[a-zA-Z_][a-zA-Z0-9_]*`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn run_line(source: &str, context: &impl Context, options: &ParseOptions, ast: bool) -> bool {
    let expr = match parse_with(source, options) {
        Ok(expr) => expr,
        Err(e) => {
            eprintln!("{e}");
            return false;
        },
    };
    if ast {
        println!("{expr}");
        return true;
    }
    match expr.evaluate(context) {
        Ok(value) => {
            println!("{value}");
            true
        },
        Err(e) => {
            eprintln!("{e}");
            false
        },
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents.clone()
    };
    let expressions = if args.file {
        script.lines()
              .map(str::trim)
              .filter(|line| !line.is_empty())
              .collect::<Vec<_>>()
    } else {
        vec![script.as_str()]
    };

    let mut context = if args.no_builtins {
        MapContext::new()
    } else {
        MapContext::with_builtins()
    };
    for (name, value) in &args.define {
        context.set_variable(name.clone(), *value);
    }

    let options = ParseOptions { max_depth: args.max_depth,
                                 ..ParseOptions::default() };

    let mut ok = true;
    for expression in expressions {
        ok &= run_line(expression, &context, &options, args.ast);
    }

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
