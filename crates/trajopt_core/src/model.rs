//! Plain value records the builder consumes.
//!
//! These are deliberately thin: the hard engineering is in the builder, not
//! in these types. `Path`/`Waypoint`/`Obstacle`/`Constraint` carry no
//! behavior beyond what's needed to describe the problem.

use min_len_vec::{OneOrMore, TwoOrMore};
use trajopt_geometry::{IntervalSet1d, Polygon, Set2d};

/// A single `(x, y, heading)` sample of a user-supplied guess skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialGuessPoint {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl InitialGuessPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }
}

/// A geometric constraint applied at one or more samples.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Constrains `(x, y)` to lie within a [`Set2d`].
    Translation(Set2d),
    /// Constrains `theta` to lie within an [`IntervalSet1d`].
    Heading(IntervalSet1d),
    /// Both a translation and a heading view of the same requested pose;
    /// applying this emits both constraints at the same sample.
    Pose {
        translation: Set2d,
        heading: IntervalSet1d,
    },
    /// Keeps the robot's bumpers clear of a static obstacle.
    Obstacle(Obstacle),
}

/// An obstacle is geometrically identical to the robot's own bumper
/// footprint: a safety-padded polygon.
pub type Obstacle = Polygon;

/// One stop along the path.
#[derive(Debug, Clone)]
pub struct Waypoint {
    /// Number of control intervals (samples minus one) in the segment
    /// leading up to this waypoint. Unused for waypoint 0.
    pub control_interval_count: usize,
    /// Ordered guess-point skeleton used to seed this segment's initial
    /// guess. At least one point.
    pub initial_guess_points: OneOrMore<InitialGuessPoint>,
    /// Applied only at the single sample this waypoint owns.
    pub waypoint_constraints: Vec<Constraint>,
    /// Applied at every interior (non-waypoint) sample of the segment
    /// leading up to this waypoint.
    pub segment_constraints: Vec<Constraint>,
}

impl Waypoint {
    #[must_use]
    pub fn new(control_interval_count: usize, initial_guess_points: OneOrMore<InitialGuessPoint>) -> Self {
        Self {
            control_interval_count,
            initial_guess_points,
            waypoint_constraints: Vec::new(),
            segment_constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_waypoint_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.waypoint_constraints = constraints;
        self
    }

    #[must_use]
    pub fn with_segment_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.segment_constraints = constraints;
        self
    }
}

/// The full piecewise path to optimize: an ordered sequence of at least two
/// waypoints, the robot's bumper footprint, and constraints applied at
/// every sample.
#[derive(Debug, Clone)]
pub struct Path {
    pub waypoints: TwoOrMore<Waypoint>,
    pub bumpers: Polygon,
    pub global_constraints: Vec<Constraint>,
}

impl Path {
    #[must_use]
    pub fn new(waypoints: TwoOrMore<Waypoint>, bumpers: Polygon) -> Self {
        Self {
            waypoints,
            bumpers,
            global_constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_global_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.global_constraints = constraints;
        self
    }
}

/// Drivetrain dynamics are out of scope for this builder. This marker is
/// threaded through
/// [`crate::builder::ProblemBuilder::build`] purely for interface
/// compatibility with a future dynamics-aware builder; it is never
/// inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Drivetrain;
