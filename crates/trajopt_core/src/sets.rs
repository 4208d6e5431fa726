//! Translates declarative [`trajopt_geometry`] sets into scalar solver
//! constraints.

use trajopt_geometry::{Direction, IntervalSet1d, Set2d};
use trajopt_solver::{Constraint, Expr, SolverAdapter};

/// Constrains `scalar` to lie within `interval`.
///
/// Emits an equality if the interval is a single point, otherwise zero, one,
/// or two inequalities depending on which side is bounded.
pub fn apply_1d<S: SolverAdapter>(solver: &mut S, scalar: &S::Expr, interval: IntervalSet1d) {
    if interval.is_exact() {
        solver.subject_to(Constraint::eq(
            scalar.clone(),
            S::Expr::constant(interval.lower),
        ));
        return;
    }
    if interval.is_lower_bounded() {
        solver.subject_to(Constraint::ge(
            scalar.clone(),
            S::Expr::constant(interval.lower),
        ));
    }
    if interval.is_upper_bounded() {
        solver.subject_to(Constraint::le(
            scalar.clone(),
            S::Expr::constant(interval.upper),
        ));
    }
}

/// Constrains the translation `(sx, sy)` to lie within `set`.
pub fn apply_2d<S: SolverAdapter>(solver: &mut S, sx: &S::Expr, sy: &S::Expr, set: &Set2d) {
    match *set {
        Set2d::Rectangular { x, y } => {
            apply_1d(solver, sx, x);
            apply_1d(solver, sy, y);
        }
        Set2d::Linear { angle } => {
            // (sx, sy) collinear with direction `angle` through the origin.
            let lhs = sx.clone() * angle.sin();
            let rhs = sy.clone() * angle.cos();
            solver.subject_to(Constraint::eq(lhs, rhs));
        }
        Set2d::Elliptical {
            x_radius,
            y_radius,
            direction,
        } => {
            let l = (sx.clone() * sx.clone()) / (x_radius.get() * x_radius.get())
                + (sy.clone() * sy.clone()) / (y_radius.get() * y_radius.get());
            let one = S::Expr::constant(1.0);
            let constraint = match direction {
                Direction::Inside => Constraint::le(l, one),
                Direction::Centered => Constraint::eq(l, one),
                Direction::Outside => Constraint::ge(l, one),
            };
            solver.subject_to(constraint);
        }
        Set2d::Cone { bearing } => {
            // Confines bearing(sx, sy) to [lower, upper].
            let (lower, upper) = (bearing.lower, bearing.upper);
            solver.subject_to(Constraint::ge(
                sx.clone() * upper.sin(),
                sy.clone() * upper.cos(),
            ));
            solver.subject_to(Constraint::le(
                sx.clone() * lower.sin(),
                sy.clone() * lower.cos(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use trajopt_geometry::Direction;
    use trajopt_mock_solver::{RecordingSolverAdapter, SymExpr};
    use trajopt_solver::RelOp;

    use super::*;

    #[test]
    fn exact_interval_emits_one_equality() {
        let mut solver = RecordingSolverAdapter::new();
        let s = solver.variable();
        apply_1d(&mut solver, &s, IntervalSet1d::exact(3.0));
        assert_eq!(solver.constraints().len(), 1);
        assert_eq!(solver.constraints()[0].op, RelOp::Eq);
        assert_eq!(solver.constraints()[0].rhs, SymExpr::constant(3.0));
    }

    #[test]
    fn half_bounded_interval_emits_one_inequality() {
        let mut solver = RecordingSolverAdapter::new();
        let s = solver.variable();
        apply_1d(&mut solver, &s, IntervalSet1d::at_least(1.0));
        assert_eq!(solver.constraints().len(), 1);
        assert_eq!(solver.constraints()[0].op, RelOp::Ge);
    }

    #[test]
    fn unbounded_interval_emits_nothing() {
        let mut solver = RecordingSolverAdapter::new();
        let s = solver.variable();
        apply_1d(&mut solver, &s, IntervalSet1d::unbounded());
        assert!(solver.constraints().is_empty());
    }

    #[test]
    fn elliptical_centered_emits_one_equality() {
        let mut solver = RecordingSolverAdapter::new();
        let sx = solver.variable();
        let sy = solver.variable();
        let set = Set2d::Elliptical {
            x_radius: 2.0.try_into().unwrap(),
            y_radius: 1.0.try_into().unwrap(),
            direction: Direction::Centered,
        };
        apply_2d(&mut solver, &sx, &sy, &set);
        assert_eq!(solver.constraints().len(), 1);
        assert_eq!(solver.constraints()[0].op, RelOp::Eq);
    }

    #[test]
    fn cone_confines_to_first_quadrant() {
        let mut solver = RecordingSolverAdapter::new();
        let sx = solver.variable();
        let sy = solver.variable();
        let set = Set2d::Cone {
            bearing: IntervalSet1d::new(0.0, std::f64::consts::FRAC_PI_2),
        };
        apply_2d(&mut solver, &sx, &sy, &set);
        assert_eq!(solver.constraints().len(), 2);
        // sx * sin(pi/2) >= sy * cos(pi/2)  =>  sx >= 0
        assert_eq!(solver.constraints()[0].lhs, sx.clone() * 1.0);
        assert_eq!(solver.constraints()[0].rhs, sy.clone() * 0.0);
        // sx * sin(0) <= sy * cos(0)  =>  0 <= sy
        assert_eq!(solver.constraints()[1].lhs, sx * 0.0);
        assert_eq!(solver.constraints()[1].rhs, sy * 1.0);
    }
}
