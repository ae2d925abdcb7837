//! Interpolator curve tables

use anyhow::Result;
use kinetic_animation::Interpolator;
use std::io::Write;

/// Width of the bar drawn for a shaped value of 1.0
const BAR_WIDTH: f64 = 40.0;

/// Write `samples + 1` evenly spaced points of `interpolator` over `[0, 1]`
pub fn write_curve(interpolator: &Interpolator, samples: u32, out: &mut dyn Write) -> Result<()> {
    let samples = samples.max(1);
    writeln!(out, "# {interpolator}")?;
    writeln!(out, "{:>6} {:>9}", "ratio", "value")?;
    for step in 0..=samples {
        let ratio = f64::from(step) / f64::from(samples);
        let value = interpolator.value(ratio);
        let bar = "#".repeat((value.max(0.0) * BAR_WIDTH).round() as usize);
        writeln!(out, "{ratio:>6.3} {value:>9.4} {bar}")?;
    }
    Ok(())
}
