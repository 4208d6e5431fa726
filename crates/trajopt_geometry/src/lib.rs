//! Declarative, solver-agnostic geometric primitives.
//!
//! Everything in this crate is plain data: points, one-dimensional intervals,
//! two-dimensional sets built from them, and polygons. Nothing here knows
//! about decision variables or a solver backend — that translation lives in
//! `trajopt_core`, which consumes these types.

use itertools::Itertools;
use min_len_vec::OneOrMore;
use serde::{Deserialize, Serialize};
use typed_floats::StrictlyPositiveFinite;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::Add, derive_more::Sub)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Polar angle of this point about the origin, in `(-pi, pi]`.
    #[must_use]
    pub fn bearing(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// A closed interval `[lower, upper]` over the reals, where either bound may
/// be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalSet1d {
    pub lower: f64,
    pub upper: f64,
}

impl IntervalSet1d {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub const fn exact(value: f64) -> Self {
        Self::new(value, value)
    }

    #[must_use]
    pub const fn at_least(lower: f64) -> Self {
        Self::new(lower, f64::INFINITY)
    }

    #[must_use]
    pub const fn at_most(upper: f64) -> Self {
        Self::new(f64::NEG_INFINITY, upper)
    }

    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.lower == self.upper
    }

    #[must_use]
    pub fn is_lower_bounded(&self) -> bool {
        self.lower > f64::NEG_INFINITY
    }

    #[must_use]
    pub fn is_upper_bounded(&self) -> bool {
        self.upper < f64::INFINITY
    }
}

/// Which side of an elliptical boundary a [`Set2d::Elliptical`] admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Inside,
    Centered,
    Outside,
}

/// A declarative two-dimensional set that a translation `(sx, sy)` may be
/// constrained to lie within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "kebab-case")]
pub enum Set2d {
    /// Independent bounds on each axis.
    Rectangular { x: IntervalSet1d, y: IntervalSet1d },
    /// Collinear with the direction `angle` (radians) through the origin.
    Linear { angle: f64 },
    /// An axis-aligned ellipse of the given radii, admitting its interior,
    /// boundary, or exterior depending on `direction`.
    Elliptical {
        x_radius: StrictlyPositiveFinite<f64>,
        y_radius: StrictlyPositiveFinite<f64>,
        direction: Direction,
    },
    /// A sector: points whose bearing from the origin lies in `bearing`.
    Cone { bearing: IntervalSet1d },
}

/// A convex (by convention, not enforced) polygon: the robot's bumper
/// footprint, or an obstacle.
///
/// `points.len() == 1` is a point obstacle, `== 2` a line segment, `>= 3` a
/// closed polygon whose last corner connects back to its first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    /// Euclidean padding added to every clearance constraint this polygon
    /// takes part in.
    pub safety_distance: f64,
    pub points: OneOrMore<Point>,
}

impl Polygon {
    #[must_use]
    pub fn new(safety_distance: f64, points: OneOrMore<Point>) -> Self {
        Self {
            safety_distance,
            points,
        }
    }

    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_point(&self) -> bool {
        self.corner_count() == 1
    }

    /// The polygon's edges as consecutive-corner pairs, including the
    /// closing edge from the last corner back to the first when there are
    /// at least three corners. Yields nothing for a point, and the single
    /// edge `(p0, p1)` for a line segment.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let corners = self.points.as_slice();
        let consecutive = corners.iter().copied().tuple_windows();
        let closing = (corners.len() >= 3).then(|| (corners[corners.len() - 1], corners[0]));
        consecutive.chain(closing)
    }
}

/// Squared distance from `p` to the *infinite line* through `a` and `b`,
/// found by projecting `p` onto that line.
///
/// This is the **unclamped** projection: the parameter `t` is not restricted
/// to `[0, 1]`, so for points whose perpendicular foot falls outside the
/// segment `a..b`, this returns the line distance rather than the true
/// segment distance. That is a deliberate, preserved property of this
/// builder (see the crate-level docs in `trajopt_core::collision`), not an
/// oversight here — for near-axial bumper/obstacle geometry it can under-
/// constrain a collision-avoidance constraint.
#[must_use]
pub fn point_to_segment_distance_squared(a: Point, b: Point, p: Point) -> f64 {
    let l = b - a;
    let v = p - a;
    let l_dot_l = l.length_squared();
    if l_dot_l == 0.0 {
        return (p - a).length_squared();
    }
    let t = (v.x * l.x + v.y * l.y) / l_dot_l;
    let foot = Point::new(a.x + t * l.x, a.y + t * l.y);
    (foot - p).length_squared()
}
