//! Apply command
//!
//! Loads a raw RGB8 buffer, runs one filter pass on a worker thread and
//! writes the result. Progress is logged at `info` in 10% steps.

use crate::ApplyArgs;
#[allow(unused_imports)]
use tracing::{debug, info, trace, warn};
use anyhow::{Context, Result, bail};
use pfx_ops::FilterJob;
use std::thread;
use std::time::Duration;

pub fn run(args: ApplyArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), filter = %args.filter.filter, "apply::run");

    let timeout = args
        .timeout
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Invalid timeout: {} seconds", secs))
        })
        .transpose()?;

    let source = super::load_raw(&args.input, args.width, args.height)?;
    let filter = super::build_filter(&args.filter)?;
    let name = if args.filter.kernel.is_some() { filter.name() } else { args.filter.filter.as_str() };

    info!(filter = name, w = args.width, h = args.height, parallel = args.parallel, "Applying filter");

    if verbose > 0 {
        println!("Applying {} to {}", name, args.input.display());
    }

    let job = if args.parallel {
        FilterJob::spawn_parallel(filter, source)?
    } else {
        FilterJob::spawn(filter, source)?
    };

    if let Some(timeout) = timeout {
        let token = job.token();
        thread::spawn(move || {
            thread::sleep(timeout);
            token.cancel();
        });
    }

    let mut next_report = 0u8;
    let result = job.wait_with(|percent| {
        if percent >= next_report {
            info!(percent, "progress");
            next_report = (percent / 10 + 1) * 10;
        }
    })?;

    let Some(output) = result else {
        warn!("filter pass cancelled, no output written");
        bail!("Filter pass cancelled");
    };

    super::save_raw(&args.output, &output)?;

    if verbose > 0 {
        println!("Done.");
    }

    Ok(())
}
