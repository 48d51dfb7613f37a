//! Calc - a small calculator built on bindarg.
//!
//! ```text
//! $ calc add 1 2 3.5
//! 6.5
//! $ calc div 1 0
//! error: division by zero
//! $ calc range -start 1 -end 10 -ste 3
//! 1 4 7
//! $ calc int bits 0xff
//! 8
//! $ calc greet --
//! hello, world
//! ```
//!
//! Set `BINDARG_LOGGING__LEVEL=trace` to watch every token being bound.

use anyhow::{Result, bail, ensure};
use bindarg::prelude::*;
use tracing::info;

/// Options for `range`.
#[derive(Debug, OptionGroup)]
struct RangeOpts {
    start: i64,
    end: i64,
    step: Option<i64>,
}

fn add(values: Rest<f64>) -> f64 {
    values.iter().sum()
}

fn div(a: f64, b: f64) -> Result<f64> {
    ensure!(b != 0.0, "division by zero");
    Ok(a / b)
}

fn range(opts: RangeOpts) -> Result<Vec<i64>> {
    let step = opts.step.unwrap_or(1);
    if step <= 0 {
        bail!("step must be positive, got {step}");
    }
    info!(start = opts.start, end = opts.end, step, "building range");

    let mut values = Vec::new();
    let mut current = opts.start;
    while current < opts.end {
        values.push(current);
        current = current.saturating_add(step);
    }
    Ok(values)
}

fn greet(name: Option<String>) -> String {
    format!("hello, {}", name.as_deref().unwrap_or("world"))
}

fn app() -> Commands {
    Commands::new()
        .command("add", add)
        .command("div", div)
        .command("range", range)
        .command("greet", greet)
        .command("not", |b: bool| !b)
        .nest(
            "int",
            Commands::new()
                .command("hex", |n: i64| format!("{n:#x}"))
                .command("bits", |n: u64| n.count_ones())
                .command("divmod", |a: i32, b: i32| -> Result<(i32, i32)> {
                    ensure!(b != 0, "division by zero");
                    Ok((a.div_euclid(b), a.rem_euclid(b)))
                }),
        )
}

fn main() -> ExitCode {
    Runner::new(app()).run_env()
}
