//! Visibility windows.
//!
//! A component's visibility is authored as a flat list of show/hide
//! timestamps: `[show, hide, show, hide, ...]`. This module pairs them up.

use serde::{Deserialize, Serialize};

/// A time interval `[start, end]` in seconds, relative to the start of the
/// video, during which a component is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityWindow {
    pub start: f64,
    pub end: f64,
}

impl VisibilityWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the window in seconds. Negative for malformed input.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Pair a flat timestamp list into visibility windows.
///
/// Elements `2k` and `2k + 1` form window `k`. A trailing unmatched start
/// is closed by `duration_secs`. An empty list yields no windows.
///
/// Values are taken as-is: no sorting, merging, or clamping. Inverted or
/// out-of-range windows reach the renderer unchanged.
pub fn resolve(timestamps: &[f64], duration_secs: f64) -> Vec<VisibilityWindow> {
    timestamps
        .chunks(2)
        .filter_map(|pair| match pair {
            [start, rest @ ..] => Some(VisibilityWindow::new(
                *start,
                rest.first().copied().unwrap_or(duration_secs),
            )),
            [] => None,
        })
        .collect()
}
