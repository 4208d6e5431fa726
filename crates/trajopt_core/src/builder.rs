//! Composes the layout, constraint dispatch, and initial-guess generator
//! into a fully populated nonlinear program.

use trajopt_solver::SolverAdapter;

use crate::config::BuilderConfig;
use crate::error::BuildError;
use crate::model::{Drivetrain, Path};
use crate::{dispatch, guess, layout};

/// The constructed problem: every decision-variable handle the solver
/// allocated, grouped by role. Callers hand the enclosing `solver` to the
/// NLP backend's solve routine (outside this crate's concern) and then
/// call [`Problem::extract`] to read the solution back.
#[derive(Debug, Clone)]
pub struct Problem<E> {
    pub x: Vec<E>,
    pub y: Vec<E>,
    pub theta: Vec<E>,
    pub dt: Vec<E>,
}

/// The solved trajectory, as plain numeric sequences parallel in shape to
/// [`Problem`]'s variable vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub theta: Vec<f64>,
    pub dt: Vec<f64>,
}

impl<E> Problem<E> {
    /// Reads back the numeric value of every decision variable via
    /// `SolverAdapter::solution_value`. Precondition: `solver` has solved
    /// this exact problem successfully.
    #[must_use]
    pub fn extract<S: SolverAdapter<Expr = E>>(&self, solver: &S) -> Trajectory {
        Trajectory {
            x: self.x.iter().map(|e| solver.solution_value(e)).collect(),
            y: self.y.iter().map(|e| solver.solution_value(e)).collect(),
            theta: self.theta.iter().map(|e| solver.solution_value(e)).collect(),
            dt: self.dt.iter().map(|e| solver.solution_value(e)).collect(),
        }
    }
}

/// Builds a time-optimal trajectory-optimization problem against a
/// [`SolverAdapter`].
///
/// Stateless beyond its [`BuilderConfig`]; a fresh `ProblemBuilder` (or the
/// same one reused) can build any number of independent problems — nothing
/// is shared across calls to [`ProblemBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    config: BuilderConfig,
}

impl ProblemBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Validates `path`, then allocates, constrains, and seeds every
    /// decision variable against `solver`. Returns `Err` before a single
    /// `Variable()` call reaches the adapter if `path` is malformed; a
    /// returned `Ok` problem has every variable and constraint installed.
    ///
    /// `_drivetrain` is accepted for interface compatibility with a future
    /// dynamics-aware builder but never inspected.
    pub fn build<S: SolverAdapter>(
        &self,
        solver: &mut S,
        path: &Path,
        _drivetrain: Drivetrain,
    ) -> Result<Problem<S::Expr>, BuildError> {
        validate(path)?;

        let waypoints = path.waypoints.as_slice();
        let span = tracing::debug_span!(
            "build_problem",
            waypoints = waypoints.len(),
            samples = tracing::field::Empty,
            intervals = tracing::field::Empty,
        );
        let _enter = span.enter();

        let layout = layout::allocate(solver, waypoints, &self.config);
        span.record("samples", layout.sample_count());
        span.record("intervals", layout.dt.len());

        apply_waypoint_zero(solver, path, &layout);
        for i in 1..waypoints.len() {
            apply_segment(solver, path, &layout, i);
        }

        let guess = guess::generate(waypoints);
        for k in 0..layout.sample_count() {
            solver.set_initial(&layout.x[k], guess.x[k]);
            solver.set_initial(&layout.y[k], guess.y[k]);
            solver.set_initial(&layout.theta[k], guess.theta[k]);
        }

        Ok(Problem {
            x: layout.x,
            y: layout.y,
            theta: layout.theta,
            dt: layout.dt,
        })
    }
}

fn apply_waypoint_zero<S: SolverAdapter>(solver: &mut S, path: &Path, layout: &layout::Layout<S::Expr>) {
    let sample = layout.waypoint_sample(0);
    let (x, y, theta) = (&layout.x[sample], &layout.y[sample], &layout.theta[sample]);
    dispatch::apply_all(solver, x, y, theta, &path.bumpers, &path.global_constraints);
    dispatch::apply_all(
        solver,
        x,
        y,
        theta,
        &path.bumpers,
        &path.waypoints.as_slice()[0].waypoint_constraints,
    );
    tracing::trace!(sample, "applied waypoint 0 constraints");
}

fn apply_segment<S: SolverAdapter>(solver: &mut S, path: &Path, layout: &layout::Layout<S::Expr>, i: usize) {
    let wp = &path.waypoints.as_slice()[i];
    let range = layout.segment_range(i);
    let last_sample = range.end - 1;

    for sample in range {
        let (x, y, theta) = (&layout.x[sample], &layout.y[sample], &layout.theta[sample]);
        dispatch::apply_all(solver, x, y, theta, &path.bumpers, &path.global_constraints);
        let per_sample_constraints = if sample == last_sample {
            &wp.waypoint_constraints
        } else {
            &wp.segment_constraints
        };
        dispatch::apply_all(solver, x, y, theta, &path.bumpers, per_sample_constraints);
        tracing::trace!(
            sample,
            waypoint = i,
            is_waypoint_sample = sample == last_sample,
            "applied segment constraints"
        );
    }
}

/// Rejects a malformed `Path` before any variable is allocated against it.
///
/// `Path::waypoints` is a `TwoOrMore<Waypoint>`, so `waypoints.len() < 2` is
/// structurally unreachable through the public constructors — this check
/// exists only as defense-in-depth, not because it can fire in practice.
fn validate(path: &Path) -> Result<(), BuildError> {
    let waypoints = path.waypoints.as_slice();
    if waypoints.len() < 2 {
        return Err(BuildError::TooFewWaypoints {
            waypoint_count: waypoints.len(),
        });
    }
    for (i, wp) in waypoints.iter().enumerate().skip(1) {
        if wp.control_interval_count == 0 {
            return Err(BuildError::ZeroControlIntervals { waypoint_index: i });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use min_len_vec::{OneOrMore, TwoOrMore};
    use pretty_assertions::assert_eq;
    use trajopt_geometry::{IntervalSet1d, Point, Polygon, Set2d};
    use trajopt_mock_solver::RecordingSolverAdapter;
    use trajopt_solver::RelOp;

    use super::*;
    use crate::model::{Constraint, InitialGuessPoint, Waypoint};

    fn bumpers() -> Polygon {
        Polygon::new(0.0, OneOrMore::new(vec![Point::new(0.0, 0.0)]).unwrap())
    }

    fn straight_line_path() -> Path {
        let wp0 = Waypoint::new(
            0,
            OneOrMore::new(vec![InitialGuessPoint::new(0.0, 0.0, 0.0)]).unwrap(),
        );
        let wp1 = Waypoint::new(
            4,
            OneOrMore::new(vec![InitialGuessPoint::new(4.0, 0.0, 0.0)]).unwrap(),
        );
        Path::new(TwoOrMore::new(vec![wp0, wp1]).unwrap(), bumpers())
    }

    #[test]
    fn scenario_6_two_waypoint_straight_line() {
        let mut solver = RecordingSolverAdapter::new();
        let builder = ProblemBuilder::new();
        let problem = builder.build(&mut solver, &straight_line_path(), Drivetrain).unwrap();

        assert_eq!(problem.x.len(), 5);
        assert_eq!(problem.y.len(), 5);
        assert_eq!(problem.theta.len(), 5);
        assert_eq!(problem.dt.len(), 4);
        for w in problem.dt.windows(2) {
            assert_eq!(w[0], w[1]);
        }

        assert_eq!(
            solver.constraints().iter().filter(|c| c.op == RelOp::Ge).count(),
            1
        );

        let trajectory = problem.extract(&solver);
        assert_eq!(trajectory.x, vec![0.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_control_intervals_rejected_before_any_variable_is_allocated() {
        let mut solver = RecordingSolverAdapter::new();
        let builder = ProblemBuilder::new();
        let wp0 = Waypoint::new(
            0,
            OneOrMore::new(vec![InitialGuessPoint::new(0.0, 0.0, 0.0)]).unwrap(),
        );
        let wp1 = Waypoint::new(
            0,
            OneOrMore::new(vec![InitialGuessPoint::new(4.0, 0.0, 0.0)]).unwrap(),
        );
        let path = Path::new(TwoOrMore::new(vec![wp0, wp1]).unwrap(), bumpers());

        let result = builder.build(&mut solver, &path, Drivetrain);
        assert_eq!(result.unwrap_err(), BuildError::ZeroControlIntervals { waypoint_index: 1 });
        assert_eq!(solver.variable_count(), 0);
    }

    #[test]
    fn pose_constraint_on_waypoint_emits_translation_and_heading_at_its_sample() {
        let mut solver = RecordingSolverAdapter::new();
        let builder = ProblemBuilder::new();
        let mut path = straight_line_path();
        path.waypoints.as_mut_slice()[1].waypoint_constraints = vec![Constraint::Pose {
            translation: Set2d::Rectangular {
                x: IntervalSet1d::exact(4.0),
                y: IntervalSet1d::exact(0.0),
            },
            heading: IntervalSet1d::exact(0.0),
        }];

        builder.build(&mut solver, &path, Drivetrain).unwrap();
        let equalities = solver.constraints().iter().filter(|c| c.op == RelOp::Eq).count();
        assert_eq!(equalities, 3);
    }
}
