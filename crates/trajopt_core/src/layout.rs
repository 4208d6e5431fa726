//! Allocates decision variables into the sample grid and partitions them
//! across trajectory segments.

use std::ops::Range;

use trajopt_solver::{Constraint, Expr, SolverAdapter};

use crate::config::BuilderConfig;
use crate::model::Waypoint;

/// The allocated variable grid for one path: one `x`/`y`/`theta` per sample,
/// one `dt` per sample (with every sample in a segment sharing the same
/// underlying segment timestep handle), and the sample index each waypoint
/// owns.
///
/// `waypoint_samples[0] == 0`; `waypoint_samples[i]` for `i >= 1` is the
/// cumulative sum of control-interval counts up to and including waypoint
/// `i`.
#[derive(Debug)]
pub struct Layout<E> {
    pub x: Vec<E>,
    pub y: Vec<E>,
    pub theta: Vec<E>,
    /// Flat, length-K timestep array: `dt[k]` is a clone of the handle for
    /// whichever segment owns sample range containing `k + 1`. Cloning the
    /// handle (rather than truly duplicating the variable) is what keeps
    /// every sample in a segment pointing at the same underlying symbolic
    /// variable, by construction.
    pub dt: Vec<E>,
    waypoint_samples: Vec<usize>,
}

impl<E: Clone> Layout<E> {
    /// Total sample count `S`.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.x.len()
    }

    /// The sample index waypoint `i` owns.
    #[must_use]
    pub fn waypoint_sample(&self, i: usize) -> usize {
        self.waypoint_samples[i]
    }

    /// The half-open range of sample indices that belong to segment `i`
    /// (`1 <= i < waypoint_count`), i.e. the samples strictly after the
    /// previous waypoint through and including waypoint `i`'s own sample.
    #[must_use]
    pub fn segment_range(&self, i: usize) -> Range<usize> {
        (self.waypoint_samples[i - 1] + 1)..(self.waypoint_samples[i] + 1)
    }
}

/// Allocates `x`, `y`, `theta`, and the flat `dt` array; emits the
/// nonnegativity constraint and initial-timestep seed for every segment;
/// and submits the time-minimizing objective. Returns the resulting
/// [`Layout`].
pub fn allocate<S: SolverAdapter>(solver: &mut S, waypoints: &[Waypoint], config: &BuilderConfig) -> Layout<S::Expr> {
    let waypoint_count = waypoints.len();

    let mut waypoint_samples = Vec::with_capacity(waypoint_count);
    waypoint_samples.push(0);
    let mut total_intervals = 0;
    for wp in waypoints.iter().skip(1) {
        total_intervals += wp.control_interval_count;
        waypoint_samples.push(total_intervals);
    }
    let sample_count = total_intervals + 1;

    let x = (0..sample_count).map(|_| solver.variable()).collect();
    let y = (0..sample_count).map(|_| solver.variable()).collect();
    let theta = (0..sample_count).map(|_| solver.variable()).collect();

    let mut dt = Vec::with_capacity(total_intervals);
    let mut objective: Option<S::Expr> = None;
    for wp in waypoints.iter().skip(1) {
        let n_i = wp.control_interval_count;
        let dt_segment = solver.variable();
        solver.subject_to(Constraint::ge(dt_segment.clone(), S::Expr::constant(0.0)));
        solver.set_initial(&dt_segment, config.initial_timestep_guess_seconds / n_i as f64);

        for _ in 0..n_i {
            dt.push(dt_segment.clone());
        }

        let term = dt_segment * n_i as f64;
        objective = Some(match objective {
            Some(acc) => acc + term,
            None => term,
        });
    }
    if let Some(objective) = objective {
        solver.minimize(objective);
    }

    Layout {
        x,
        y,
        theta,
        dt,
        waypoint_samples,
    }
}

#[cfg(test)]
mod tests {
    use min_len_vec::OneOrMore;
    use pretty_assertions::assert_eq;
    use trajopt_mock_solver::RecordingSolverAdapter;
    use trajopt_solver::RelOp;

    use super::*;
    use crate::model::InitialGuessPoint;

    fn waypoint(control_interval_count: usize) -> Waypoint {
        Waypoint::new(
            control_interval_count,
            OneOrMore::new(vec![InitialGuessPoint::new(0.0, 0.0, 0.0)]).unwrap(),
        )
    }

    #[test]
    fn two_waypoint_layout_matches_sample_grid_formula() {
        let mut solver = RecordingSolverAdapter::new();
        let waypoints = vec![waypoint(0), waypoint(4)];
        let layout = allocate(&mut solver, &waypoints, &BuilderConfig::default());

        assert_eq!(layout.sample_count(), 5);
        assert_eq!(layout.dt.len(), 4);
        assert_eq!(layout.waypoint_sample(0), 0);
        assert_eq!(layout.waypoint_sample(1), 4);
        assert_eq!(layout.segment_range(1), 1..5);

        // all four dt entries alias the same segment variable
        for w in layout.dt.windows(2) {
            assert_eq!(w[0], w[1]);
        }

        assert_eq!(
            solver.constraints().iter().filter(|c| c.op == RelOp::Ge).count(),
            1
        );
    }

    #[test]
    fn objective_sums_interval_weighted_segment_timesteps() {
        let mut solver = RecordingSolverAdapter::new();
        let waypoints = vec![waypoint(0), waypoint(3), waypoint(2)];
        let layout = allocate(&mut solver, &waypoints, &BuilderConfig::default());
        assert_eq!(layout.dt.len(), 5);
        assert!(solver.objective().is_some());
    }

    #[test]
    fn segment_timestep_seeded_with_heuristic_over_interval_count() {
        let mut solver = RecordingSolverAdapter::new();
        let waypoints = vec![waypoint(0), waypoint(5)];
        let config = BuilderConfig {
            initial_timestep_guess_seconds: 10.0,
        };
        let layout = allocate(&mut solver, &waypoints, &config);
        assert_eq!(solver.solution_value(&layout.dt[0]), 2.0);
    }
}
