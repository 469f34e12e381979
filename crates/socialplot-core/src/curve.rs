//! Natural cubic spline paths
//!
//! A natural spline passes through every point with continuous first and
//! second derivatives and zero curvature at both ends. Each segment is
//! emitted as one cubic Bezier command.

use crate::axis::fmt;

/// Bezier control points for one coordinate of a natural spline
///
/// Returns `(first, second)` control values for each of the `n - 1`
/// segments of `values`. Requires at least three values.
fn control_points(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = values.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];

    b[0] = 2.0;
    r[0] = values[0] + 2.0 * values[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * values[i] + 2.0 * values[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * values[n - 1] + values[n];

    // Thomas algorithm: forward sweep
    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }

    // Back substitution; `a` now holds the first control points
    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }

    b[n - 1] = (values[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * values[i + 1] - a[i + 1];
    }

    (a, b)
}

/// SVG path data for a natural curve through `points`
///
/// One point yields a bare move, two points a straight segment.
pub fn natural_curve_path(points: &[(f64, f64)]) -> String {
    let Some(&(x0, y0)) = points.first() else {
        return String::new();
    };

    let mut d = format!("M{},{}", fmt(x0), fmt(y0));
    match points.len() {
        1 => {}
        2 => {
            let (x1, y1) = points[1];
            d.push_str(&format!("L{},{}", fmt(x1), fmt(y1)));
        }
        _ => {
            let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
            let (px0, px1) = control_points(&xs);
            let (py0, py1) = control_points(&ys);

            for i in 0..points.len() - 1 {
                d.push_str(&format!(
                    "C{},{},{},{},{},{}",
                    fmt(px0[i]),
                    fmt(py0[i]),
                    fmt(px1[i]),
                    fmt(py1[i]),
                    fmt(xs[i + 1]),
                    fmt(ys[i + 1])
                ));
            }
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(natural_curve_path(&[]), "");
        assert_eq!(natural_curve_path(&[(1.0, 2.0)]), "M1,2");
    }

    #[test]
    fn test_two_points_is_a_line() {
        assert_eq!(natural_curve_path(&[(0.0, 0.0), (10.0, 5.0)]), "M0,0L10,5");
    }

    #[test]
    fn test_collinear_points_stay_straight() {
        let path = natural_curve_path(&[(0.0, 0.0), (3.0, 3.0), (6.0, 6.0)]);
        assert_eq!(path, "M0,0C1,1,2,2,3,3C4,4,5,5,6,6");
    }

    #[test]
    fn test_control_points_interpolate_knots() {
        let values = [0.0, 10.0, 0.0, 10.0];
        let (first, second) = control_points(&values);
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 3);

        // C1 continuity: the knot sits midway between the adjacent controls
        for i in 0..2 {
            let knot = values[i + 1];
            assert!((second[i] + first[i + 1] - 2.0 * knot).abs() < 1e-9);
        }
    }
}
