//! Strip splitting.
//!
//! [`split_strip`] subdivides a strip into two parallel strips by inserting
//! a midpoint vertex on every transverse edge and cutting each strip face
//! along the seam. Splitting is the preparation step for deletions that
//! would otherwise damage the boundary topology: deleting one of the two
//! halves afterwards leaves the other in place.

use std::collections::BTreeMap;

use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, QuadMesh, StripId, VertexId};
use crate::strip::{edge_key, StripPartition};

/// A corner of a planned replacement face.
#[derive(Debug, Clone, Copy)]
enum Corner {
    /// An existing vertex.
    Old(VertexId),
    /// The midpoint of a transverse edge, created at apply time.
    Mid(VertexId, VertexId),
}

use Corner::{Mid, Old};

/// Subdivide a strip into two parallel strips.
///
/// Every transverse edge `(u, v)` of the strip gains a midpoint vertex;
/// each quad of the strip is cut into two quads along the seam, and a
/// pseudo-quad into a near-pole pseudo-quad plus a quad (or, where the
/// strip terminates against the pole, into two pseudo-quads). Returns the
/// seam midpoints in strip order; for a strip of two or more edges they
/// form a polyedge along the cut (closed iff the strip is closed).
///
/// The partition is invalidated by a successful split.
///
/// # Errors
/// Fails before any mutation on an unknown strip or on a strip that crosses
/// itself (a face with four transverse edges has no single seam).
pub fn split_strip(
    mesh: &mut QuadMesh,
    partition: &StripPartition,
    strip: StripId,
) -> Result<Vec<VertexId>> {
    let s = partition.strip(strip)?.clone();

    let transverse: BTreeMap<(VertexId, VertexId), nalgebra::Point3<f64>> = s
        .edges()
        .iter()
        .map(|&(u, v)| (edge_key(u, v), mesh.edge_midpoint(u, v)))
        .collect();

    // Plan every face cut first so an unsupported strip fails fast.
    let mut cuts: Vec<(FaceId, Vec<(Vec<Corner>, Option<VertexId>)>)> = Vec::new();
    for f in s.faces(mesh) {
        cuts.push((f, plan_cut(mesh, f, strip, &transverse)?));
    }

    // Apply: create the midpoints, then replace each face by its cut pair.
    let mids: BTreeMap<(VertexId, VertexId), VertexId> = transverse
        .iter()
        .map(|(&key, &pos)| (key, mesh.add_vertex(pos)))
        .collect();

    for (f, plan) in cuts {
        mesh.delete_face(f)?;
        for (corners, pole) in plan {
            let cycle: Vec<VertexId> = corners
                .into_iter()
                .map(|c| match c {
                    Old(v) => v,
                    Mid(u, v) => mids[&edge_key(u, v)],
                })
                .collect();
            mesh.add_face(cycle, pole)?;
        }
    }

    Ok(s
        .edges()
        .iter()
        .map(|&(u, v)| mids[&edge_key(u, v)])
        .collect())
}

/// Plan the replacement faces for one strip face.
fn plan_cut(
    mesh: &QuadMesh,
    f: FaceId,
    strip: StripId,
    transverse: &BTreeMap<(VertexId, VertexId), nalgebra::Point3<f64>>,
) -> Result<Vec<(Vec<Corner>, Option<VertexId>)>> {
    let vertices = mesh.face_vertices(f).to_vec();
    let n = vertices.len();
    let marked: Vec<bool> = (0..n)
        .map(|i| transverse.contains_key(&edge_key(vertices[i], vertices[(i + 1) % n])))
        .collect();
    let count = marked.iter().filter(|&&m| m).count();

    match (n, count) {
        // Quad crossed once: cut between the two opposite marked edges.
        (4, 2) => {
            let i = marked.iter().position(|&m| m).expect("marked edge exists");
            if !marked[(i + 2) % 4] {
                return Err(MeshError::invalid_param(
                    "strip",
                    format!("{:?}", strip),
                    "marked edges of a strip quad must be opposite",
                ));
            }
            let (u, v, w, x) = (
                vertices[i],
                vertices[(i + 1) % 4],
                vertices[(i + 2) % 4],
                vertices[(i + 3) % 4],
            );
            Ok(vec![
                (vec![Old(u), Mid(u, v), Mid(w, x), Old(x)], None),
                (vec![Mid(u, v), Old(v), Old(w), Mid(w, x)], None),
            ])
        }
        // Pseudo-quad crossed through the pole flanks.
        (3, 2) => {
            let (p, b, c) = pole_corners(mesh, f)?;
            if transverse.contains_key(&edge_key(b, c)) {
                return Err(MeshError::invalid_param(
                    "strip",
                    format!("{:?}", strip),
                    "self-crossing strips cannot be split",
                ));
            }
            Ok(vec![
                (vec![Old(p), Mid(p, b), Mid(c, p)], Some(p)),
                (vec![Mid(p, b), Old(b), Old(c), Mid(c, p)], None),
            ])
        }
        // Pseudo-quad terminating the strip against its pole.
        (3, 1) => {
            let (p, b, c) = pole_corners(mesh, f)?;
            Ok(vec![
                (vec![Old(p), Old(b), Mid(b, c)], Some(p)),
                (vec![Old(p), Mid(b, c), Old(c)], Some(p)),
            ])
        }
        _ => Err(MeshError::invalid_param(
            "strip",
            format!("{:?}", strip),
            "self-crossing strips cannot be split",
        )),
    }
}

/// The vertices of a pseudo-quad starting from its pole.
fn pole_corners(mesh: &QuadMesh, f: FaceId) -> Result<(VertexId, VertexId, VertexId)> {
    let pole = mesh.face_pole(f).ok_or(MeshError::NotQuadFace(f))?;
    let vertices = mesh.face_vertices(f);
    let i = vertices
        .iter()
        .position(|&p| p == pole)
        .ok_or(MeshError::InvalidPole(f))?;
    Ok((vertices[i], vertices[(i + 1) % 3], vertices[(i + 2) % 3]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::builder::{from_vertices_and_faces_with_poles, grid};
    use crate::strip::collect_strips;
    use nalgebra::Point3;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_split_grid_strip() {
        let mut mesh = grid(2, 2);
        let partition = collect_strips(&mesh).unwrap();
        let strip = partition.strip_of_edge(v(0), v(1)).unwrap();

        let seam = split_strip(&mut mesh, &partition, strip).unwrap();

        // Two faces cut in two, three midpoints inserted
        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_vertices(), 12);
        assert!(mesh.is_manifold());
        assert!(mesh.is_quad_mesh());
        assert_eq!(mesh.euler_characteristic(), 1);

        assert_eq!(seam.len(), 3);
        for pair in seam.windows(2) {
            assert!(mesh.has_edge(pair[0], pair[1]));
        }

        // The split strip became two parallel strips
        let after = collect_strips(&mesh).unwrap();
        assert_eq!(after.num_strips(), partition.num_strips() + 1);
    }

    #[test]
    fn test_split_then_delete_half() {
        let mut mesh = grid(2, 2);
        let partition = collect_strips(&mesh).unwrap();
        let strip = partition.strip_of_edge(v(0), v(1)).unwrap();

        let seam = split_strip(&mut mesh, &partition, strip).unwrap();
        let partition = collect_strips(&mesh).unwrap();

        // One of the two halves runs between the seam and the old rail
        let m01 = seam
            .iter()
            .copied()
            .find(|&m| mesh.has_edge(m, v(1)))
            .expect("one seam midpoint subdivides the edge (0, 1)");
        let half = partition
            .strip_of_edge(m01, v(1))
            .expect("seam midpoint and old rail vertex span a transverse edge");
        crate::grammar::delete_strip(&mut mesh, &partition, half).unwrap();

        assert!(mesh.is_manifold());
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.boundary_loops().len(), 1);
        assert_eq!(mesh.euler_characteristic(), 1);
    }

    #[test]
    fn test_split_pole_strip() {
        // Pole triangle plus quad; split the strip passing through the
        // pole flanks
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.5, 2.0, 0.0),
            Point3::new(-0.5, 1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2], vec![0, 2, 3, 4]];
        let poles = vec![Some(0), None];
        let mut mesh = from_vertices_and_faces_with_poles(&vertices, &faces, &poles).unwrap();

        let partition = collect_strips(&mesh).unwrap();
        let strip = partition.strip_of_edge(v(0), v(1)).unwrap();

        let seam = split_strip(&mut mesh, &partition, strip).unwrap();

        assert_eq!(mesh.num_faces(), 4);
        assert!(mesh.is_manifold());
        assert!(mesh.is_quad_mesh());
        assert_eq!(seam.len(), 3);
    }

    #[test]
    fn test_split_terminal_pole_strip() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2]];
        let poles = vec![Some(0)];
        let mut mesh = from_vertices_and_faces_with_poles(&vertices, &faces, &poles).unwrap();

        let partition = collect_strips(&mesh).unwrap();
        // The strip of the pole-facing edge (1, 2) has a single edge
        let strip = partition.strip_of_edge(v(1), v(2)).unwrap();

        let seam = split_strip(&mut mesh, &partition, strip).unwrap();

        // The triangle splits into two pseudo-quads sharing the pole
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_quad_mesh());
        assert!(mesh.is_manifold());
        assert_eq!(seam.len(), 1);
    }

    #[test]
    fn test_split_unknown_strip() {
        let mut mesh = grid(1, 1);
        let partition = collect_strips(&mesh).unwrap();
        assert!(matches!(
            split_strip(&mut mesh, &partition, StripId::new(99)),
            Err(MeshError::UnknownStrip(_))
        ));
    }
}
