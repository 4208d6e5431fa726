//! Demo binary: wires a hardcoded two-waypoint path through
//! [`trajopt_core::ProblemBuilder`] against the in-memory recording solver
//! and logs the resulting problem shape.
//!
//! This is explicitly a demo, not a product CLI — there is no file I/O, no
//! path format, and no real NLP backend. It exists to exercise the builder
//! end to end without linking one.

use clap::Parser;
use min_len_vec::{OneOrMore, TwoOrMore};
use trajopt_core::{BuilderConfig, Drivetrain, InitialGuessPoint, Path, ProblemBuilder, Waypoint};
use trajopt_geometry::{Point, Polygon};
use trajopt_mock_solver::RecordingSolverAdapter;
use tracing::{error, info};

#[derive(Parser)]
#[command(version, author, about)]
struct Cli {
    /// Number of control intervals in the path's single segment.
    #[arg(long, default_value_t = 4)]
    control_intervals: usize,

    /// Heuristic seconds-per-segment used to seed every `dt_segment`.
    #[arg(long, default_value_t = 5.0)]
    initial_timestep_guess_seconds: f64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    let cli = Cli::parse();

    let bumpers = Polygon::new(
        0.3,
        OneOrMore::new(vec![Point::new(0.0, 0.0)]).expect("one corner is always at least one"),
    );
    let wp0 = Waypoint::new(
        0,
        OneOrMore::new(vec![InitialGuessPoint::new(0.0, 0.0, 0.0)])
            .expect("one guess point is always at least one"),
    );
    let wp1 = Waypoint::new(
        cli.control_intervals,
        OneOrMore::new(vec![InitialGuessPoint::new(4.0, 0.0, 0.0)])
            .expect("one guess point is always at least one"),
    );
    let path = Path::new(
        TwoOrMore::new(vec![wp0, wp1]).expect("two waypoints are always at least two"),
        bumpers,
    );

    let builder = ProblemBuilder::with_config(BuilderConfig {
        initial_timestep_guess_seconds: cli.initial_timestep_guess_seconds,
    });
    let mut solver = RecordingSolverAdapter::new();

    match builder.build(&mut solver, &path, Drivetrain) {
        Ok(problem) => {
            info!(
                samples = problem.x.len(),
                intervals = problem.dt.len(),
                constraints = solver.constraints().len(),
                "built problem"
            );
            let trajectory = problem.extract(&solver);
            info!(x = ?trajectory.x, y = ?trajectory.y, "initial-guess trajectory");
        }
        Err(err) => {
            error!(%err, "failed to build problem");
            std::process::exit(1);
        }
    }
}
