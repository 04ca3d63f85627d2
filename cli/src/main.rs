use std::process::ExitCode;

use argtree_core::{
    Cli, Command, Context, HandlerResult, OptionSchema, ParserConfig, ValueType, parse_bool, scan,
};
use tracing_subscriber::EnvFilter;

mod commands;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    init_logging(verbose_requested(&args));
    app().run_main(args)
}

/// Logs go to stderr. `RUST_LOG` overrides the default level, which is
/// `debug` with `--verbose` and `warn` otherwise.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Looks for a true `--verbose`/`-v` before dispatch, so the logging level
/// covers the whole run. Unparsable input counts as not verbose.
fn verbose_requested(args: &[String]) -> bool {
    let Ok(parsed) = scan(args.iter().skip(1), &ParserConfig::default()) else {
        return false;
    };

    ["verbose", "v"]
        .into_iter()
        .filter_map(|name| parsed.options.get(name))
        .any(|value| parse_bool(value) == Some(true))
}

fn app() -> Cli {
    Cli::new("argtree-demo")
        .with_version(PACKAGE_VERSION)
        .with_usage("Demonstrates command dispatch with typed options")
        .with_option(
            OptionSchema::new(Some("verbose"), Some("v"), ValueType::Bool)
                .with_default(false)
                .with_usage("Report the bound options on stderr"),
        )
        .with_option(
            OptionSchema::long("json", ValueType::Bool)
                .with_default(false)
                .with_usage("Print the bound command context as JSON instead of running it"),
        )
        .with_command(
            Command::new("greet")
                .with_usage("Greet someone")
                .with_option(
                    OptionSchema::long("name", ValueType::String)
                        .with_default("world")
                        .with_placeholder("NAME")
                        .with_usage("Who to greet"),
                )
                .with_option(
                    OptionSchema::short("n", ValueType::Uint)
                        .with_default(1u64)
                        .with_placeholder("TIMES")
                        .with_usage("How many times"),
                )
                .with_option(
                    OptionSchema::long("shout", ValueType::Bool)
                        .with_default(false)
                        .with_usage("Greet in upper case"),
                )
                .with_handler(|ctx| run(ctx, commands::greet)),
        )
        .with_command(
            Command::new("math")
                .with_usage("Arithmetic over positional numbers")
                .with_option(
                    OptionSchema::new(Some("precision"), Some("p"), ValueType::Uint)
                        .with_default(2u64)
                        .with_placeholder("DIGITS")
                        .with_usage("Digits after the decimal point"),
                )
                .with_subcommand(
                    Command::new("add")
                        .with_usage("Sum the numbers")
                        .with_handler(|ctx| run(ctx, commands::add)),
                )
                .with_subcommand(
                    Command::new("mul")
                        .with_usage("Multiply the numbers")
                        .with_handler(|ctx| run(ctx, commands::mul)),
                ),
        )
        .with_command(
            Command::new("echo")
                .with_usage("Print the arguments")
                .with_option(
                    OptionSchema::long("sep", ValueType::String)
                        .with_default(" ")
                        .with_placeholder("SEP")
                        .with_usage("Separator between arguments"),
                )
                .with_handler(|ctx| run(ctx, commands::echo)),
        )
}

/// Applies the global flags, then runs `command` unless `--json` asked for
/// the bound context only.
fn run(ctx: &Context<'_>, command: fn(&Context<'_>) -> HandlerResult) -> HandlerResult {
    if ctx.bool_option("verbose").unwrap_or_default() {
        for level in ctx.ancestors() {
            eprintln!("{}: {}", level.command(), level.to_json());
        }
    }

    if ctx.bool_option("json").unwrap_or_default() {
        println!("{}", serde_json::to_string_pretty(&ctx.to_json())?);
        return Ok(());
    }

    command(ctx)
}
