//! Kernel command
//!
//! Prints the weights of the selected convolution kernel.

use crate::KernelArgs;
use anyhow::{Result, bail};

pub fn run(args: KernelArgs) -> Result<()> {
    let filter = super::build_filter(&args.filter)?;
    let Some(kernel) = filter.kernel() else {
        bail!("{} is a per-pixel filter and has no kernel", args.filter.filter);
    };

    let (rx, ry) = kernel.radius();
    println!("{}x{} (radius {}x{})", kernel.width(), kernel.height(), rx, ry);
    for ky in 0..kernel.height() {
        let row: Vec<String> = (0..kernel.width())
            .map(|kx| format!("{:>9.5}", kernel.at(kx, ky)))
            .collect();
        println!("{}", row.join(" "));
    }
    println!("sum = {:.6}", kernel.sum());

    Ok(())
}
