//! Builds a time-optimal wheeled-robot trajectory as a nonlinear program
//! against an opaque [`trajopt_solver::SolverAdapter`].
//!
//! Given a [`model::Path`] (waypoints, bumper geometry, constraints), this
//! crate allocates a pose-and-timestep sample grid ([`layout`]), routes
//! every declared constraint to the right encoder ([`sets`], [`collision`],
//! via [`dispatch`]), seeds the grid with a piecewise-linear initial guess
//! ([`guess`]), and hands back a [`builder::Problem`] ready for an external
//! solver to optimize. It does not solve anything itself — solving,
//! drivetrain dynamics, and well-posedness checking are all out of scope.

pub mod builder;
pub mod collision;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod guess;
pub mod layout;
pub mod model;
pub mod sets;

pub use builder::{Problem, ProblemBuilder, Trajectory};
pub use config::BuilderConfig;
pub use error::BuildError;
pub use model::{Constraint, Drivetrain, InitialGuessPoint, Obstacle, Path, Waypoint};
