//! A `SolverAdapter` that never solves anything.
//!
//! [`RecordingSolverAdapter`] records every `Variable`/`SubjectTo`/`SetInitial`
//! /`Minimize` call the builder makes against it, as a structured [`SymExpr`]
//! tree, so unit tests can assert exact constraint shapes without linking a
//! real nonlinear-program backend. `solution_value` reads back whatever was
//! last seeded with `set_initial` — there is no solve step — which is enough
//! to exercise the demo binary end to end.

use std::rc::Rc;

use trajopt_solver::{Constraint, Expr, SolverAdapter};

/// Identity of a decision variable allocated by [`RecordingSolverAdapter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub usize);

/// A symbolic expression tree. Cheaply cloneable: interior nodes are
/// reference-counted, so an `Expr` handle can be freely copied without
/// duplicating the subtree it points to.
#[derive(Debug, Clone, PartialEq)]
pub enum SymExpr {
    Var(VarId),
    Const(OrdF64),
    Add(Rc<SymExpr>, Rc<SymExpr>),
    Sub(Rc<SymExpr>, Rc<SymExpr>),
    Mul(Rc<SymExpr>, Rc<SymExpr>),
    Div(Rc<SymExpr>, Rc<SymExpr>),
    Neg(Rc<SymExpr>),
    Sin(Rc<SymExpr>),
    Cos(Rc<SymExpr>),
}

/// `f64` wrapper with `PartialEq` so [`SymExpr`] can derive it; two `Const`
/// nodes compare equal iff their bit patterns match (NaN excluded by
/// construction — the builder never emits a NaN constant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrdF64(pub f64);

impl SymExpr {
    #[must_use]
    pub fn var(id: VarId) -> Self {
        Self::Var(id)
    }

    /// Evaluate this expression given the current value of every variable.
    #[must_use]
    pub fn eval(&self, values: &[f64]) -> f64 {
        match self {
            Self::Var(VarId(i)) => values[*i],
            Self::Const(OrdF64(v)) => *v,
            Self::Add(a, b) => a.eval(values) + b.eval(values),
            Self::Sub(a, b) => a.eval(values) - b.eval(values),
            Self::Mul(a, b) => a.eval(values) * b.eval(values),
            Self::Div(a, b) => a.eval(values) / b.eval(values),
            Self::Neg(a) => -a.eval(values),
            Self::Sin(a) => a.eval(values).sin(),
            Self::Cos(a) => a.eval(values).cos(),
        }
    }
}

impl Expr for SymExpr {
    fn constant(value: f64) -> Self {
        Self::Const(OrdF64(value))
    }

    fn sin(&self) -> Self {
        Self::Sin(Rc::new(self.clone()))
    }

    fn cos(&self) -> Self {
        Self::Cos(Rc::new(self.clone()))
    }
}

impl std::ops::Add for SymExpr {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::Add(Rc::new(self), Rc::new(rhs))
    }
}

impl std::ops::Add<f64> for SymExpr {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        self + Self::constant(rhs)
    }
}

impl std::ops::Sub for SymExpr {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::Sub(Rc::new(self), Rc::new(rhs))
    }
}

impl std::ops::Sub<f64> for SymExpr {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        self - Self::constant(rhs)
    }
}

impl std::ops::Mul for SymExpr {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::Mul(Rc::new(self), Rc::new(rhs))
    }
}

impl std::ops::Mul<f64> for SymExpr {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self * Self::constant(rhs)
    }
}

impl std::ops::Div for SymExpr {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::Div(Rc::new(self), Rc::new(rhs))
    }
}

impl std::ops::Div<f64> for SymExpr {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        self / Self::constant(rhs)
    }
}

impl std::ops::Neg for SymExpr {
    type Output = Self;
    fn neg(self) -> Self {
        Self::Neg(Rc::new(self))
    }
}

/// A `SolverAdapter` that records every call instead of forwarding it to a
/// real NLP backend.
#[derive(Debug, Default)]
pub struct RecordingSolverAdapter {
    values: Vec<f64>,
    constraints: Vec<Constraint<SymExpr>>,
    objective: Option<SymExpr>,
}

impl RecordingSolverAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn constraints(&self) -> &[Constraint<SymExpr>] {
        &self.constraints
    }

    #[must_use]
    pub fn objective(&self) -> Option<&SymExpr> {
        self.objective.as_ref()
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.values.len()
    }
}

impl SolverAdapter for RecordingSolverAdapter {
    type Expr = SymExpr;

    fn variable(&mut self) -> Self::Expr {
        let id = VarId(self.values.len());
        self.values.push(0.0);
        SymExpr::var(id)
    }

    fn subject_to(&mut self, constraint: Constraint<Self::Expr>) {
        self.constraints.push(constraint);
    }

    fn set_initial(&mut self, expr: &Self::Expr, value: f64) {
        if let SymExpr::Var(VarId(i)) = expr {
            self.values[*i] = value;
        }
    }

    fn minimize(&mut self, expr: Self::Expr) {
        self.objective = Some(expr);
    }

    fn solution_value(&self, expr: &Self::Expr) -> f64 {
        expr.eval(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trajopt_solver::RelOp;

    use super::*;

    #[test]
    fn records_variables_and_initial_guesses() {
        let mut adapter = RecordingSolverAdapter::new();
        let x = adapter.variable();
        adapter.set_initial(&x, 2.5);
        assert_eq!(adapter.variable_count(), 1);
        assert_eq!(adapter.solution_value(&x), 2.5);
    }

    #[test]
    fn records_constraints_as_structured_trees() {
        let mut adapter = RecordingSolverAdapter::new();
        let x = adapter.variable();
        adapter.subject_to(Constraint::ge(x.clone(), SymExpr::constant(3.0)));
        assert_eq!(adapter.constraints().len(), 1);
        assert_eq!(adapter.constraints()[0].op, RelOp::Ge);
        assert_eq!(adapter.constraints()[0].lhs, x);
        assert_eq!(adapter.constraints()[0].rhs, SymExpr::constant(3.0));
    }

    #[test]
    fn objective_records_last_call() {
        let mut adapter = RecordingSolverAdapter::new();
        let x = adapter.variable();
        adapter.minimize(x.clone());
        adapter.minimize(x.clone() + 1.0);
        assert_eq!(adapter.objective(), Some(&(x + 1.0)));
    }
}
