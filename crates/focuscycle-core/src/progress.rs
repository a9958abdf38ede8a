//! Quantized progress rendering for the live display.
//!
//! The bar is a row of fixed columns, each standing for an equal slice of
//! the phase. Finished slices show the full glyph, untouched slices the
//! empty one, and the slice currently in progress is quantized onto the
//! glyph scale. With the default moon-phase scale a running phase reads
//! like a row of waxing moons.

use std::time::Duration;

use crate::config::BarConfig;

/// Snapshot of phase progress at one tick. Recomputed per firing, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressTick {
    pub remaining: Duration,
    /// 0.0 ..= 1.0 share of the phase already elapsed.
    pub elapsed_fraction: f64,
}

impl ProgressTick {
    /// `remaining` may exceed `total` when the phase has not started yet
    /// (a start time in the future); it is kept as-is so the display
    /// reports true wall-clock time, while the fraction floors at zero.
    pub fn new(total: Duration, remaining: Duration) -> Self {
        let fraction = if total.is_zero() {
            1.0
        } else {
            (1.0 - remaining.as_secs_f64() / total.as_secs_f64()).max(0.0)
        };
        Self {
            remaining,
            elapsed_fraction: fraction,
        }
    }

    /// Whole minutes left, rounded up. A phase with one second left still
    /// shows one minute.
    pub fn remaining_minutes(&self) -> u64 {
        self.remaining.as_millis().div_ceil(60_000) as u64
    }
}

/// Render the elapsed share of `total` as a glyph bar.
///
/// `elapsed` past `total` is legal (the last tick may race phase
/// completion) and renders all-full.
pub fn render_bar(total: Duration, elapsed: Duration, bar: &BarConfig) -> String {
    let n = bar.columns().max(1);
    let levels = bar.glyphs.len();
    let empty = &bar.glyphs[0];
    let full = &bar.glyphs[levels - 1];

    let total_ms = total.as_millis() as f64;
    let done_ms = elapsed.as_millis() as f64;
    let step = total_ms / n as f64;

    let columns: Vec<&str> = (0..n)
        .map(|i| {
            if total_ms <= 0.0 || done_ms / step >= (i + 1) as f64 {
                full.as_str()
            } else if done_ms / step < i as f64 {
                empty.as_str()
            } else {
                let portion = (done_ms % step) / step;
                let index = (portion * (levels - 1) as f64).floor() as usize;
                bar.glyphs[index.min(levels - 1)].as_str()
            }
        })
        .collect();

    columns.join(" ")
}
