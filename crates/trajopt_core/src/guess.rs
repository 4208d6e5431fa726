//! Produces an initial pose trajectory by piecewise-linear interpolation
//! through the user's guess-point skeleton.
//!
//! The interpolation is deliberately *not* the naive "divide the segment
//! evenly and hit every guess point exactly" scheme; see the doc comment on
//! [`linspace`] for the quirk this preserves.

use crate::model::{InitialGuessPoint, Waypoint};

/// A piecewise-linear initial guess, one triple per sample, length `S`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessTrajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub theta: Vec<f64>,
}

/// Appends exactly `count` values interpolating from `v0` towards `v1`:
/// `v0 + k * (v1 - v0) / count` for `k` in `0..count`.
///
/// This **never appends `v1` itself** — the right endpoint is left for
/// whichever sub-segment starts there next, or, for the very last
/// sub-segment of a path, is never appended at all. So the final sample of
/// a segment carries the last *pre*-endpoint interpolated value, not the
/// waypoint's own guess point. See the `Scenario 6` test in `builder.rs`
/// for the exact fixture this produces.
fn linspace(out: &mut Vec<f64>, count: usize, v0: f64, v1: f64) {
    for k in 0..count {
        out.push(v0 + (k as f64) * (v1 - v0) / (count as f64));
    }
}

fn linspace_triple(
    x: &mut Vec<f64>,
    y: &mut Vec<f64>,
    theta: &mut Vec<f64>,
    count: usize,
    from: InitialGuessPoint,
    to: InitialGuessPoint,
) {
    linspace(x, count, from.x, to.x);
    linspace(y, count, from.y, to.y);
    linspace(theta, count, from.heading, to.heading);
}

/// Generates the initial guess for every sample in `waypoints`, matching
/// the sample grid `layout::allocate` produces for the same waypoints.
#[must_use]
pub fn generate(waypoints: &[Waypoint]) -> GuessTrajectory {
    let first = *waypoints[0].initial_guess_points.first();
    let mut x = vec![first.x];
    let mut y = vec![first.y];
    let mut theta = vec![first.heading];
    let mut previous_last_guess = first;

    for wp in waypoints.iter().skip(1) {
        let n_i = wp.control_interval_count;
        let guess_points = wp.initial_guess_points.as_slice();
        let g_i = guess_points.len();
        let q = n_i / g_i;

        // First sub-segment: previous waypoint's last guess point to this
        // waypoint's first guess point.
        linspace_triple(&mut x, &mut y, &mut theta, q, previous_last_guess, guess_points[0]);

        // Middle sub-segments, only when there are at least 3 guess points.
        if g_i >= 3 {
            for j in 1..=(g_i - 2) {
                linspace_triple(
                    &mut x,
                    &mut y,
                    &mut theta,
                    q,
                    guess_points[j - 1],
                    guess_points[j],
                );
            }
        }

        // Tail sub-segment: absorbs the remainder `n_i - (g_i - 1) * q`,
        // only when there are at least 2 guess points (otherwise the first
        // sub-segment already consumed the whole segment, since q == n_i).
        if g_i >= 2 {
            let tail_len = n_i - (g_i - 1) * q;
            linspace_triple(
                &mut x,
                &mut y,
                &mut theta,
                tail_len,
                guess_points[g_i - 2],
                guess_points[g_i - 1],
            );
        }

        previous_last_guess = *guess_points[g_i - 1];
    }

    GuessTrajectory { x, y, theta }
}
