//! Discrete Coons patch interpolation.
//!
//! Generates an interior grid of points and quad faces from four boundary
//! polylines by discrete transfinite interpolation. Densification feeds it
//! one patch per coarse face; the collapsed side of a pseudo-quad is passed
//! as a constant polyline at the pole, which degenerates the corresponding
//! grid column onto the pole position.

use nalgebra::Point3;

use crate::error::{MeshError, Result};

/// Interpolate a grid of points from four boundary polylines.
///
/// The polylines run `a -> b` (`ab`), `b -> c` (`bc`), `d -> c` (`dc`) and
/// `a -> d` (`ad`); opposite polylines must have equal lengths. With `ab`
/// sampled at `la + 1` points and `ad` at `lb + 1`, the result is a grid of
/// `(la + 1) * (lb + 1)` points indexed row-major (`j * (la + 1) + i`, `i`
/// along `ab`) and `la * lb` quad faces wound consistently with the corner
/// cycle `a, b, c, d`.
pub fn discrete_coons_patch(
    ab: &[Point3<f64>],
    bc: &[Point3<f64>],
    dc: &[Point3<f64>],
    ad: &[Point3<f64>],
) -> Result<(Vec<Point3<f64>>, Vec<Vec<usize>>)> {
    if ab.len() < 2 || bc.len() < 2 {
        return Err(MeshError::invalid_param(
            "boundary",
            ab.len().min(bc.len()),
            "boundary polylines need at least two points",
        ));
    }
    if ab.len() != dc.len() {
        return Err(MeshError::invalid_param(
            "boundary",
            format!("{} vs {}", ab.len(), dc.len()),
            "opposite polylines ab and dc differ in length",
        ));
    }
    if bc.len() != ad.len() {
        return Err(MeshError::invalid_param(
            "boundary",
            format!("{} vs {}", bc.len(), ad.len()),
            "opposite polylines bc and ad differ in length",
        ));
    }

    let la = ab.len() - 1;
    let lb = ad.len() - 1;
    let a = ab[0].coords;
    let b = ab[la].coords;
    let c = dc[la].coords;
    let d = dc[0].coords;

    let mut points = Vec::with_capacity((la + 1) * (lb + 1));
    for j in 0..=lb {
        let t = j as f64 / lb as f64;
        for i in 0..=la {
            let s = i as f64 / la as f64;
            let ruled_st = (1.0 - t) * ab[i].coords + t * dc[i].coords;
            let ruled_ts = (1.0 - s) * ad[j].coords + s * bc[j].coords;
            let bilinear = (1.0 - s) * (1.0 - t) * a
                + s * (1.0 - t) * b
                + s * t * c
                + (1.0 - s) * t * d;
            points.push(Point3::from(ruled_st + ruled_ts - bilinear));
        }
    }

    let mut faces = Vec::with_capacity(la * lb);
    for j in 0..lb {
        for i in 0..la {
            let v00 = j * (la + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (la + 1);
            let v11 = v01 + 1;
            faces.push(vec![v00, v10, v11, v01]);
        }
    }

    Ok((points, faces))
}

/// Sample a straight segment at `density + 1` evenly spaced points.
pub(crate) fn discretize_segment(
    from: Point3<f64>,
    to: Point3<f64>,
    density: usize,
) -> Vec<Point3<f64>> {
    (0..=density)
        .map(|i| {
            let t = i as f64 / density as f64;
            Point3::from((1.0 - t) * from.coords + t * to.coords)
        })
        .collect()
}
