//! Closed-form 2D rigid alignment (Procrustes).

use crate::core::Pose2D;

/// Least-squares rigid transform mapping `source` points onto `target`.
///
/// Pairs are matched by index. Returns `None` for fewer than two pairs or
/// when the source points are coincident.
pub fn fit_rigid(source: &[(f64, f64)], target: &[(f64, f64)]) -> Option<Pose2D> {
    let n = source.len().min(target.len());
    if n < 2 {
        return None;
    }

    let inv_n = 1.0 / n as f64;
    let (mut sx, mut sy, mut tx, mut ty) = (0.0, 0.0, 0.0, 0.0);
    for (s, t) in source.iter().zip(target).take(n) {
        sx += s.0;
        sy += s.1;
        tx += t.0;
        ty += t.1;
    }
    let (sx, sy, tx, ty) = (sx * inv_n, sy * inv_n, tx * inv_n, ty * inv_n);

    // Cross-covariance terms of the centered sets
    let mut dot = 0.0;
    let mut cross = 0.0;
    let mut spread = 0.0;
    for (s, t) in source.iter().zip(target).take(n) {
        let (ax, ay) = (s.0 - sx, s.1 - sy);
        let (bx, by) = (t.0 - tx, t.1 - ty);
        dot += ax * bx + ay * by;
        cross += ax * by - ay * bx;
        spread += ax * ax + ay * ay;
    }

    if spread < 1e-12 {
        return None;
    }

    let theta = cross.atan2(dot);
    let (sin, cos) = theta.sin_cos();
    Some(Pose2D::new(
        tx - (cos * sx - sin * sy),
        ty - (sin * sx + cos * sy),
        theta,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_recovers_exact_transform() {
        let truth = Pose2D::new(0.5, -1.0, 0.7);
        let source = vec![(0.0, 0.0), (1.0, 0.0), (0.0, 2.0), (3.0, 1.0)];
        let target: Vec<_> = source.iter().map(|&p| truth.transform_point(p)).collect();

        let fit = fit_rigid(&source, &target).unwrap();

        assert_relative_eq!(fit.x, truth.x, epsilon = 1e-9);
        assert_relative_eq!(fit.y, truth.y, epsilon = 1e-9);
        assert_relative_eq!(fit.theta, truth.theta, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(fit_rigid(&[(1.0, 1.0)], &[(2.0, 2.0)]).is_none());
        assert!(fit_rigid(&[(1.0, 1.0), (1.0, 1.0)], &[(0.0, 0.0), (1.0, 0.0)]).is_none());
    }
}
