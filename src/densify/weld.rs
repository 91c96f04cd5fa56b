//! Joining and welding of patch submeshes.
//!
//! Densification produces one free-floating submesh per coarse face;
//! neighboring patches emit coinciding boundary points because opposite
//! edges of one strip share a density. Welding merges vertices whose
//! positions agree within a geometric tolerance, stitching the patches into
//! one mesh. A patch quad with two corners welded together collapses into a
//! pseudo-quad, which is how poles reappear in the fine mesh.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{QuadMesh, VertexId};

/// Merge a list of `(points, faces)` submeshes into one mesh, coalescing
/// vertices that coincide within `tolerance`.
///
/// Faces that collapse below three distinct consecutive vertices are
/// dropped; a quad collapsing to a triangle gets the repeated vertex as its
/// pole.
pub fn join_and_weld(
    patches: &[(Vec<Point3<f64>>, Vec<Vec<usize>>)],
    tolerance: f64,
) -> Result<QuadMesh> {
    if !(tolerance > 0.0) {
        return Err(MeshError::invalid_param(
            "tolerance",
            tolerance,
            "weld tolerance must be positive",
        ));
    }

    let mut mesh = QuadMesh::new();
    let mut by_key: HashMap<(i64, i64, i64), VertexId> = HashMap::new();

    let key_of = |p: &Point3<f64>| -> (i64, i64, i64) {
        (
            (p.x / tolerance).round() as i64,
            (p.y / tolerance).round() as i64,
            (p.z / tolerance).round() as i64,
        )
    };

    for (points, faces) in patches {
        let local: Vec<VertexId> = points
            .iter()
            .map(|p| {
                let key = key_of(p);
                *by_key.entry(key).or_insert_with(|| mesh.add_vertex(*p))
            })
            .collect();

        for face in faces {
            let cycle: Vec<VertexId> = face.iter().map(|&i| local[i]).collect();
            let (welded, pole) = collapse_cycle(cycle);
            if welded.len() >= 3 {
                mesh.add_face(welded, pole)?;
            }
        }
    }

    Ok(mesh)
}

/// Remove cyclically consecutive duplicates; a quad reduced to a triangle
/// reports the repeated vertex as a pole.
fn collapse_cycle(cycle: Vec<VertexId>) -> (Vec<VertexId>, Option<VertexId>) {
    let before = cycle.len();
    let mut out: Vec<VertexId> = Vec::with_capacity(before);
    let mut repeated = None;
    for v in cycle {
        if out.last() == Some(&v) {
            repeated = Some(v);
        } else {
            out.push(v);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        repeated = out.pop();
    }
    let pole = match (before, out.len()) {
        (4, 3) => repeated,
        _ => None,
    };
    (out, pole)
}
