//! Routes a tagged [`Constraint`] to the set encoder or the collision
//! encoder depending on its variant.

use trajopt_geometry::Polygon;
use trajopt_solver::SolverAdapter;

use crate::model::Constraint;
use crate::{collision, sets};

/// Applies one constraint at the symbolic pose `(x, y, theta)`.
///
/// A [`Constraint::Pose`] applies *both* a translation view and a heading
/// view of the same requested pose at this sample.
pub fn apply<S: SolverAdapter>(
    solver: &mut S,
    x: &S::Expr,
    y: &S::Expr,
    theta: &S::Expr,
    bumpers: &Polygon,
    constraint: &Constraint,
) {
    match constraint {
        Constraint::Translation(set) => sets::apply_2d(solver, x, y, set),
        Constraint::Heading(interval) => sets::apply_1d(solver, theta, *interval),
        Constraint::Pose { translation, heading } => {
            sets::apply_2d(solver, x, y, translation);
            sets::apply_1d(solver, theta, *heading);
        }
        Constraint::Obstacle(obstacle) => collision::encode(solver, x, y, theta, bumpers, obstacle),
    }
}

/// Applies every constraint in `constraints`, in order, at the same sample.
pub fn apply_all<S: SolverAdapter>(
    solver: &mut S,
    x: &S::Expr,
    y: &S::Expr,
    theta: &S::Expr,
    bumpers: &Polygon,
    constraints: &[Constraint],
) {
    for constraint in constraints {
        apply(solver, x, y, theta, bumpers, constraint);
    }
}

#[cfg(test)]
mod tests {
    use min_len_vec::OneOrMore;
    use pretty_assertions::assert_eq;
    use trajopt_geometry::{IntervalSet1d, Point, Set2d};
    use trajopt_mock_solver::RecordingSolverAdapter;

    use super::*;

    #[test]
    fn pose_constraint_emits_translation_and_heading() {
        let mut solver = RecordingSolverAdapter::new();
        let x = solver.variable();
        let y = solver.variable();
        let theta = solver.variable();
        let bumpers = Polygon::new(0.0, OneOrMore::new(vec![Point::new(0.0, 0.0)]).unwrap());

        let constraint = Constraint::Pose {
            translation: Set2d::Rectangular {
                x: IntervalSet1d::exact(1.0),
                y: IntervalSet1d::exact(2.0),
            },
            heading: IntervalSet1d::exact(0.0),
        };

        apply(&mut solver, &x, &y, &theta, &bumpers, &constraint);
        // two (rectangular x/y) + one (heading) exact equalities.
        assert_eq!(solver.constraints().len(), 3);
    }
}
