//! Demo command handlers.

use argtree_core::{Context, HandlerResult};
use tracing::debug;

/// Largest `--precision` accepted; an `f64` carries 17 significant digits.
const MAX_PRECISION: u64 = 17;

pub fn greet(ctx: &Context<'_>) -> HandlerResult {
    let name = ctx.string_option("name").unwrap_or("world");
    let times = ctx.uint_option("n").unwrap_or(1);

    let mut greeting = format!("Hello, {name}!");
    if ctx.bool_option("shout").unwrap_or_default() {
        greeting = greeting.to_uppercase();
    }

    for _ in 0..times {
        println!("{greeting}");
    }
    Ok(())
}

pub fn add(ctx: &Context<'_>) -> HandlerResult {
    let numbers = numbers(ctx)?;
    print_number(ctx, numbers.iter().sum())
}

pub fn mul(ctx: &Context<'_>) -> HandlerResult {
    let numbers = numbers(ctx)?;
    print_number(ctx, numbers.iter().product())
}

pub fn echo(ctx: &Context<'_>) -> HandlerResult {
    let sep = ctx.string_option("sep").unwrap_or(" ");
    println!("{}", ctx.args().join(sep));
    Ok(())
}

fn numbers(ctx: &Context<'_>) -> Result<Vec<f64>, String> {
    if ctx.args().is_empty() {
        return Err(format!("{} needs at least one number", ctx.command()));
    }

    ctx.args()
        .iter()
        .map(|arg| {
            arg.parse::<f64>()
                .map_err(|err| format!("'{arg}' is not a number: {err}"))
        })
        .collect()
}

fn print_number(ctx: &Context<'_>, value: f64) -> HandlerResult {
    let precision = ctx.uint_option("precision").unwrap_or(2);
    if precision > MAX_PRECISION {
        return Err(format!("precision must be <= {MAX_PRECISION}, got {precision}").into());
    }

    debug!(value, precision, "printing result");
    let precision = precision as usize;
    println!("{value:.precision$}");
    Ok(())
}
