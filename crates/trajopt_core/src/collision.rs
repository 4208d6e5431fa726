//! Collision avoidance between the robot's bumper polygon and a single
//! obstacle polygon.
//!
//! Every emitted constraint is a squared-distance lower bound, so none of
//! this module ever takes a square root of a symbolic expression.

use trajopt_geometry::{Point, Polygon};
use trajopt_solver::{Constraint, Expr, SolverAdapter};

/// World-frame position of a bumper corner given in the robot frame, as a
/// symbolic expression pair.
///
/// The corner offset `(cx, cy)` is a fixed numeric value (it's part of the
/// static bumper geometry); only the pose `(x, y, theta)` is symbolic. So
/// `r` and `phi = atan2(cy, cx)` are plain `f64`s, and only the
/// `phi + theta` rotation needs the angle-sum identities to stay inside the
/// `Expr` algebra (`sin`/`cos` are only defined on concrete doubles per the
/// solver adapter contract, never directly on a symbolic sum).
fn world_corner<E: Expr>(x: &E, y: &E, theta: &E, corner: Point) -> (E, E) {
    if corner.x == 0.0 && corner.y == 0.0 {
        return (x.clone(), y.clone());
    }
    let r = corner.length_squared().sqrt();
    let phi = corner.bearing();
    let (sin_phi, cos_phi) = (phi.sin(), phi.cos());
    let sin_theta = theta.sin();
    let cos_theta = theta.cos();
    // cos(phi + theta), sin(phi + theta) via the angle-sum identities.
    let cos_sum = cos_theta.clone() * cos_phi - sin_theta.clone() * sin_phi;
    let sin_sum = sin_theta * cos_phi + cos_theta * sin_phi;
    (x.clone() + cos_sum * r, y.clone() + sin_sum * r)
}

/// A fixed world-frame point lifted into the `Expr` algebra as a constant
/// pair, for obstacle corners (which never move).
fn constant_point<E: Expr>(p: Point) -> (E, E) {
    (E::constant(p.x), E::constant(p.y))
}

/// Squared distance from `p` to the infinite line through `a` and `b`,
/// mirroring [`trajopt_geometry::point_to_segment_distance_squared`] but
/// over symbolic expressions. Unclamped by design; see the geometry crate's
/// doc comment for why.
fn segment_distance_squared<E: Expr>(a: (E, E), b: (E, E), p: (E, E)) -> E {
    let lx = b.0 - a.0.clone();
    let ly = b.1 - a.1.clone();
    let vx = p.0.clone() - a.0.clone();
    let vy = p.1.clone() - a.1.clone();
    let l_dot_l = lx.clone() * lx.clone() + ly.clone() * ly.clone();
    let t = (vx * lx.clone() + vy * ly.clone()) / l_dot_l;
    let foot_x = a.0 + t.clone() * lx;
    let foot_y = a.1 + t * ly;
    let dx = foot_x - p.0;
    let dy = foot_y - p.1;
    dx.clone() * dx + dy.clone() * dy
}

/// Emits minimum-distance constraints keeping `bumpers` (at the symbolic
/// pose `(x, y, theta)`) clear of `obstacle`.
///
/// `d = bumpers.safety_distance + obstacle.safety_distance`; every emitted
/// constraint lower-bounds a squared distance by `D = d^2`, symmetrically
/// for both the bumper-edge/obstacle-corner sweep and the
/// obstacle-edge/bumper-corner sweep (Open Question 2).
pub fn encode<S: SolverAdapter>(
    solver: &mut S,
    x: &S::Expr,
    y: &S::Expr,
    theta: &S::Expr,
    bumpers: &Polygon,
    obstacle: &Polygon,
) {
    let d = bumpers.safety_distance + obstacle.safety_distance;
    let min_distance_squared = S::Expr::constant(d * d);

    if bumpers.is_point() && obstacle.is_point() {
        let corner = world_corner(x, y, theta, *bumpers.points.first());
        let obstacle_point = constant_point::<S::Expr>(*obstacle.points.first());
        let dx = obstacle_point.0 - corner.0;
        let dy = obstacle_point.1 - corner.1;
        solver.subject_to(Constraint::ge(
            dx.clone() * dx + dy.clone() * dy,
            min_distance_squared,
        ));
        tracing::trace!(emitted = 1, "point-obstacle collision constraint");
        return;
    }

    let mut emitted = 0;

    for (a, b) in bumpers.edges() {
        let edge = (world_corner(x, y, theta, a), world_corner(x, y, theta, b));
        for &p in obstacle.points.as_slice() {
            let dist = segment_distance_squared(edge.0.clone(), edge.1.clone(), constant_point(p));
            solver.subject_to(Constraint::ge(dist, min_distance_squared.clone()));
            emitted += 1;
        }
    }

    for (a, b) in obstacle.edges() {
        let edge = (constant_point::<S::Expr>(a), constant_point::<S::Expr>(b));
        for &c in bumpers.points.as_slice() {
            let corner = world_corner(x, y, theta, c);
            let dist = segment_distance_squared(edge.0.clone(), edge.1.clone(), corner);
            solver.subject_to(Constraint::ge(dist, min_distance_squared.clone()));
            emitted += 1;
        }
    }

    tracing::trace!(emitted, "polygon collision constraints");
}

#[cfg(test)]
mod tests {
    use min_len_vec::OneOrMore;
    use pretty_assertions::assert_eq;
    use trajopt_mock_solver::RecordingSolverAdapter;
    use trajopt_solver::RelOp;

    use super::*;

    fn point_polygon(p: Point) -> Polygon {
        Polygon::new(0.0, OneOrMore::new(vec![p]).unwrap())
    }

    #[test]
    fn point_vs_point_emits_one_constraint() {
        let mut solver = RecordingSolverAdapter::new();
        let x = solver.variable();
        let y = solver.variable();
        let theta = solver.variable();
        solver.set_initial(&x, 0.0);
        solver.set_initial(&y, 0.0);

        let bumpers = Polygon::new(0.25, OneOrMore::new(vec![Point::new(0.0, 0.0)]).unwrap());
        let obstacle = Polygon::new(0.25, OneOrMore::new(vec![Point::new(1.0, 0.0)]).unwrap());

        encode(&mut solver, &x, &y, &theta, &bumpers, &obstacle);

        assert_eq!(solver.constraints().len(), 1);
        assert_eq!(solver.constraints()[0].op, RelOp::Ge);
        assert_eq!(solver.solution_value(&solver.constraints()[0].rhs), 0.25);
    }

    #[test]
    fn triangle_bumper_vs_square_obstacle_emits_24_constraints() {
        let mut solver = RecordingSolverAdapter::new();
        let x = solver.variable();
        let y = solver.variable();
        let theta = solver.variable();

        let bumpers = Polygon::new(
            0.0,
            OneOrMore::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ])
            .unwrap(),
        );
        let obstacle = Polygon::new(
            0.0,
            OneOrMore::new(vec![
                Point::new(5.0, 5.0),
                Point::new(6.0, 5.0),
                Point::new(6.0, 6.0),
                Point::new(5.0, 6.0),
            ])
            .unwrap(),
        );

        encode(&mut solver, &x, &y, &theta, &bumpers, &obstacle);
        assert_eq!(solver.constraints().len(), 24);
        assert!(solver.constraints().iter().all(|c| c.op == RelOp::Ge));
    }

    #[test]
    fn point_bumper_vs_segment_obstacle_only_sweeps_obstacle_edges() {
        let mut solver = RecordingSolverAdapter::new();
        let x = solver.variable();
        let y = solver.variable();
        let theta = solver.variable();

        let bumpers = point_polygon(Point::new(0.0, 0.0));
        let obstacle = Polygon::new(
            0.0,
            OneOrMore::new(vec![Point::new(2.0, 0.0), Point::new(2.0, 1.0)]).unwrap(),
        );

        encode(&mut solver, &x, &y, &theta, &bumpers, &obstacle);
        // one obstacle edge x one bumper corner; no bumper edges exist.
        assert_eq!(solver.constraints().len(), 1);
    }
}
