//! The only interface the trajectory-optimization core imports from its
//! environment: an opaque nonlinear-program expression factory.
//!
//! Real backends (e.g. a CasADi or Sleipnir binding) are never named here —
//! [`SolverAdapter`] is the narrow seam the builder in `trajopt_core` is
//! generic over, so it can run against a real solver in production and
//! against an in-memory recording mock (`trajopt_mock_solver`) in tests.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// A symbolic decision-variable expression.
///
/// The collision encoder in `trajopt_core` needs to rotate a bumper corner
/// by a *symbolic* heading (`cos`/`sin` of a decision variable), and the
/// unclamped point-to-segment projection needs to divide by a
/// possibly-symbolic squared edge length. Every NLP backend this crate is
/// plausibly bound to (autodiff expression graphs) supports both, so this
/// trait is the surface the builder actually needs, not just `+ - *` on
/// plain doubles.
pub trait Expr:
    Clone
    + Add<Output = Self>
    + Add<f64, Output = Self>
    + Sub<Output = Self>
    + Sub<f64, Output = Self>
    + Mul<Output = Self>
    + Mul<f64, Output = Self>
    + Div<Output = Self>
    + Div<f64, Output = Self>
    + Neg<Output = Self>
{
    /// Lift a numeric constant into the expression type.
    fn constant(value: f64) -> Self;

    fn sin(&self) -> Self;
    fn cos(&self) -> Self;
}

/// The relational operator of a `SubjectTo` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq,
    Le,
    Ge,
}

/// A single scalar constraint `lhs <op> rhs`, recordable as a structured
/// value (operator plus two operand trees) rather than only as a
/// solver-side side effect.
#[derive(Debug, Clone)]
pub struct Constraint<E> {
    pub lhs: E,
    pub op: RelOp,
    pub rhs: E,
}

impl<E> Constraint<E> {
    #[must_use]
    pub fn eq(lhs: E, rhs: E) -> Self {
        Self {
            lhs,
            op: RelOp::Eq,
            rhs,
        }
    }

    #[must_use]
    pub fn le(lhs: E, rhs: E) -> Self {
        Self {
            lhs,
            op: RelOp::Le,
            rhs,
        }
    }

    #[must_use]
    pub fn ge(lhs: E, rhs: E) -> Self {
        Self {
            lhs,
            op: RelOp::Ge,
            rhs,
        }
    }
}

/// An opaque nonlinear-program expression factory and constraint sink.
///
/// Implementors own every `Expr` and constraint they hand out or accept;
/// nothing in `trajopt_core` mutates a [`SolverAdapter`] after `build`
/// finishes composing a problem. Construction is single-threaded and
/// synchronous, so this trait carries no `Send`/`Sync` bound of its own.
pub trait SolverAdapter {
    type Expr: Expr;

    /// Allocate a fresh decision variable.
    fn variable(&mut self) -> Self::Expr;

    /// Register a constraint that must hold at the solution.
    fn subject_to(&mut self, constraint: Constraint<Self::Expr>);

    /// Seed a decision variable with an initial value for the solver to
    /// start iterating from.
    fn set_initial(&mut self, expr: &Self::Expr, value: f64);

    /// Install the objective to minimize. Called exactly once per problem;
    /// a second call replaces the first.
    fn minimize(&mut self, expr: Self::Expr);

    /// Read back the numeric value of an expression after a successful
    /// solve. Precondition: the adapter has solved the problem.
    fn solution_value(&self, expr: &Self::Expr) -> f64;
}
