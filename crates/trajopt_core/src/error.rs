//! The builder's only error type.
//!
//! Malformed input is a programmer error, not a solver-reported failure —
//! but it is still surfaced as a typed `Result`, never a panic, so an
//! embedding application can report it without a debugger attached. A
//! `ProblemBuilder` either completes and installs every variable and
//! constraint, or returns one of these before a single `Variable()` call
//! reaches the solver adapter.
//!
//! "Empty path" and "missing guess point" are covered at the type level
//! instead, by `TwoOrMore<Waypoint>` and `OneOrMore<InitialGuessPoint>`
//! respectively — a `Path`/`Waypoint` simply cannot be constructed without
//! satisfying them, so this enum only needs a variant for the one
//! malformed-input case the type system doesn't close off: a zero-length
//! `control_interval_count`.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    /// A path must have at least two waypoints. Unreachable through the
    /// public constructors (`Path::waypoints` is a `TwoOrMore<Waypoint>`);
    /// kept as a defense-in-depth check.
    #[error("path has {waypoint_count} waypoint(s), need at least 2")]
    TooFewWaypoints { waypoint_count: usize },

    /// `control_interval_count` must be at least 1 for every waypoint past
    /// the first (waypoint 0's count is unused).
    #[error("waypoint {waypoint_index} has zero control intervals")]
    ZeroControlIntervals { waypoint_index: usize },
}
