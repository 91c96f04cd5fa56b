//! Strip addition.
//!
//! [`add_strip`] inserts a new parallel strip of quads along a polyedge:
//! every path vertex is doubled into a left and a right copy, the faces
//! around it are reassigned to one copy or the other according to which
//! side of the path they lie on, and the gap is stitched with one new quad
//! per path edge.
//!
//! The side assignment is computed for the whole path on the unmutated mesh
//! and applied in a single batch, so an invalid polyedge is rejected before
//! any mutation.

use std::collections::BTreeMap;

use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, Polyedge, QuadMesh, StripId, VertexId};
use crate::strip::collect_strips;

/// Which side of the directed path a face lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// The result of a strip addition.
#[derive(Debug, Clone)]
pub struct AddedStrip {
    /// The id of the inserted strip under a freshly collected partition.
    pub strip: StripId,
    /// The new vertices along the left side of the path.
    pub left: Polyedge,
    /// The new vertices along the right side of the path.
    pub right: Polyedge,
}

/// Insert a new strip of quads along a polyedge.
///
/// The polyedge must be at least one edge long, follow existing mesh edges,
/// and either be closed (with at least three edges) or have both endpoints
/// on the mesh boundary. On success the mesh has one more face per path
/// edge and one more vertex per path vertex, its Euler characteristic is
/// unchanged, and the returned left/right polyedges lie on the two
/// boundaries of the new strip.
///
/// Any previously collected [`StripPartition`](crate::strip::StripPartition)
/// is invalidated; the returned strip id refers to a fresh partition.
///
/// # Errors
/// Fails without mutating the mesh if the polyedge is invalid.
pub fn add_strip(mesh: &mut QuadMesh, polyedge: &Polyedge) -> Result<AddedStrip> {
    if let Some(f) = mesh
        .face_ids()
        .find(|&f| !mesh.is_quad(f) && !mesh.is_pseudo_quad(f))
    {
        return Err(MeshError::NotQuadFace(f));
    }
    validate_polyedge(mesh, polyedge)?;

    let closed = polyedge.is_closed();
    let path: Vec<VertexId> = polyedge.path_vertices().to_vec();
    let k = path.len();

    // Side of every face incident to the path, per path vertex, computed
    // before any mutation.
    let mut face_sides: BTreeMap<FaceId, BTreeMap<VertexId, Side>> = BTreeMap::new();
    for i in 0..k {
        let v = path[i];
        let prev = if closed {
            Some(path[(i + k - 1) % k])
        } else {
            (i > 0).then(|| path[i - 1])
        };
        let next = if closed {
            Some(path[(i + 1) % k])
        } else {
            (i + 1 < k).then(|| path[i + 1])
        };
        for (f, side) in partition_fan(mesh, v, prev, next)? {
            face_sides.entry(f).or_default().insert(v, side);
        }
    }

    // Double the path vertices.
    let mut left = Vec::with_capacity(k);
    let mut right = Vec::with_capacity(k);
    for &v in &path {
        let pos = *mesh.position(v);
        left.push(mesh.add_vertex(pos));
        right.push(mesh.add_vertex(pos));
    }
    let copies: BTreeMap<VertexId, (VertexId, VertexId)> = path
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, (left[i], right[i])))
        .collect();

    // Rewrite the incident faces with the sided copies.
    let mut rewrites = Vec::with_capacity(face_sides.len());
    for (&f, sides) in &face_sides {
        let face = mesh.face(f);
        let vertices = face
            .vertices
            .iter()
            .map(|&v| substituted(v, sides.get(&v), &copies))
            .collect::<Vec<_>>();
        let pole = face.pole.map(|p| substituted(p, sides.get(&p), &copies));
        rewrites.push((f, vertices, pole));
    }
    for &(f, _, _) in &rewrites {
        mesh.delete_face(f)?;
    }
    for (_, vertices, pole) in rewrites {
        mesh.add_face(vertices, pole)?;
    }
    for &v in &path {
        mesh.delete_vertex(v)?;
    }

    // Stitch one quad behind each path edge.
    let quads = if closed { k } else { k - 1 };
    for i in 0..quads {
        let j = (i + 1) % k;
        mesh.add_face(vec![right[i], right[j], left[j], left[i]], None)?;
    }

    let partition = collect_strips(mesh)?;
    let strip = partition
        .strip_of_edge(left[0], right[0])
        .expect("rung edge belongs to the new strip");

    let (left, right) = if closed {
        (Polyedge::closed(left)?, Polyedge::closed(right)?)
    } else {
        (Polyedge::new(left)?, Polyedge::new(right)?)
    };
    Ok(AddedStrip { strip, left, right })
}

/// Check a polyedge against the mesh before any mutation.
fn validate_polyedge(mesh: &QuadMesh, polyedge: &Polyedge) -> Result<()> {
    for &v in polyedge.vertices() {
        if !mesh.has_vertex(v) {
            return Err(MeshError::UnknownVertex(v));
        }
    }
    for (u, v) in polyedge.edges() {
        if !mesh.has_edge(u, v) {
            return Err(MeshError::PolyedgeNotConnected { u, v });
        }
    }
    if !polyedge.is_closed() {
        let vertices = polyedge.vertices();
        for &endpoint in [vertices[0], vertices[vertices.len() - 1]].iter() {
            if !mesh.is_boundary_vertex(endpoint) {
                return Err(MeshError::PolyedgeEndpointNotOnBoundary(endpoint));
            }
        }
    }
    Ok(())
}

/// Assign every face around a path vertex to a side of the path.
///
/// Walks the counter-clockwise fan once, flipping sides when crossing the
/// spoke toward the path successor (left thereafter), the spoke toward the
/// predecessor (right thereafter), or — at a path endpoint — the boundary
/// gap, which stands in for the missing path edge.
fn partition_fan(
    mesh: &QuadMesh,
    v: VertexId,
    prev: Option<VertexId>,
    next: Option<VertexId>,
) -> Result<BTreeMap<FaceId, Side>> {
    let nbrs = mesh.vertex_neighbors_ordered(v);
    let m = nbrs.len();

    let (start_nbr, start_side) = match next {
        Some(w) => (w, Side::Left),
        None => (prev.expect("path vertex has a neighbor on the path"), Side::Right),
    };
    let start = nbrs
        .iter()
        .position(|&n| n == start_nbr)
        .ok_or(MeshError::PolyedgeNotConnected { u: v, v: start_nbr })?;

    let mut side = start_side;
    let mut sides = BTreeMap::new();
    for step in 0..m {
        let j = (start + step) % m;
        if step > 0 {
            if Some(nbrs[j]) == next {
                side = Side::Left;
            } else if Some(nbrs[j]) == prev {
                side = Side::Right;
            }
        }
        // The slot between nbrs[j] and its fan successor.
        match mesh.halfedge_face(v, nbrs[j]) {
            Some(f) => {
                sides.insert(f, side);
            }
            None => {
                if prev.is_none() {
                    side = Side::Right;
                } else if next.is_none() {
                    side = Side::Left;
                }
            }
        }
    }
    Ok(sides)
}

/// Replace a path vertex by its sided copy; other vertices pass through.
fn substituted(
    v: VertexId,
    side: Option<&Side>,
    copies: &BTreeMap<VertexId, (VertexId, VertexId)>,
) -> VertexId {
    match (copies.get(&v), side) {
        (Some(&(l, _)), Some(Side::Left)) => l,
        (Some(&(_, r)), Some(Side::Right)) => r,
        _ => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::builder::{from_vertices_and_faces, grid};
    use nalgebra::Point3;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn tube() -> QuadMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        from_vertices_and_faces(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_add_strip_middle_polyedge_scenario() {
        // 3x3 vertex grid; middle horizontal polyedge [3, 4, 5]
        let mut mesh = grid(2, 2);
        let euler = mesh.euler_characteristic();
        let polyedge = Polyedge::new(vec![v(3), v(4), v(5)]).unwrap();

        let added = add_strip(&mut mesh, &polyedge).unwrap();

        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.euler_characteristic(), euler);
        assert!(mesh.is_manifold());
        assert!(mesh.is_quad_mesh());

        // Both returned polyedges follow the new strip boundaries
        assert_eq!(added.left.path_vertices().len(), 3);
        assert_eq!(added.right.path_vertices().len(), 3);
        for (u, w) in added.left.edges().chain(added.right.edges()) {
            assert!(mesh.has_edge(u, w));
        }
        // The original path vertices are gone
        for i in [3, 4, 5] {
            assert!(!mesh.has_vertex(v(i)));
        }

        let partition = collect_strips(&mesh).unwrap();
        let strip = partition.strip(added.strip).unwrap();
        assert!(!strip.is_closed());
        assert_eq!(strip.faces(&mesh).len(), 2);
    }

    #[test]
    fn test_add_strip_single_edge() {
        let mut mesh = grid(1, 1);
        let face = mesh.face_ids().next().unwrap();
        let [a, b] = [mesh.face_vertices(face)[0], mesh.face_vertices(face)[1]];
        let polyedge = Polyedge::new(vec![a, b]).unwrap();

        add_strip(&mut mesh, &polyedge).unwrap();

        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_vertices(), 6);
        assert!(mesh.is_manifold());
        assert!(mesh.is_quad_mesh());
    }

    #[test]
    fn test_add_strip_bent_path() {
        // Path [1, 4, 3] bends around the corner of face [0, 1, 4, 3]
        let mut mesh = grid(2, 2);
        let polyedge = Polyedge::new(vec![v(1), v(4), v(3)]).unwrap();

        add_strip(&mut mesh, &polyedge).unwrap();

        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_vertices(), 12);
        assert!(mesh.is_manifold());
        assert!(mesh.is_quad_mesh());
    }

    #[test]
    fn test_add_strip_along_boundary() {
        // The bottom edge of the grid: both endpoints and the whole path on
        // the boundary, every existing face on one side
        let mut mesh = grid(2, 2);
        let polyedge = Polyedge::new(vec![v(0), v(1), v(2)]).unwrap();

        add_strip(&mut mesh, &polyedge).unwrap();

        assert_eq!(mesh.num_faces(), 6);
        assert_eq!(mesh.num_vertices(), 12);
        assert!(mesh.is_manifold());
        assert_eq!(mesh.boundary_loops().len(), 1);
    }

    #[test]
    fn test_add_strip_closed_polyedge() {
        let mut mesh = tube();
        let euler = mesh.euler_characteristic();
        let polyedge = Polyedge::closed(vec![v(0), v(1), v(2), v(3)]).unwrap();

        let added = add_strip(&mut mesh, &polyedge).unwrap();

        // Closed path of n edges: n new faces and n new vertices
        assert_eq!(mesh.num_faces(), 8);
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.euler_characteristic(), euler);
        assert!(mesh.is_manifold());
        assert!(added.left.is_closed());
        assert!(added.right.is_closed());

        let partition = collect_strips(&mesh).unwrap();
        assert!(partition.strip(added.strip).unwrap().is_closed());
    }

    #[test]
    fn test_add_strip_rejects_interior_endpoint() {
        let mut mesh = grid(2, 2);
        // Vertex 4 is interior
        let polyedge = Polyedge::new(vec![v(3), v(4)]).unwrap();
        let before = mesh.num_faces();

        let result = add_strip(&mut mesh, &polyedge);
        assert!(matches!(
            result,
            Err(MeshError::PolyedgeEndpointNotOnBoundary(_))
        ));
        // No mutation applied
        assert_eq!(mesh.num_faces(), before);
        assert_eq!(mesh.num_vertices(), 9);
    }

    #[test]
    fn test_add_strip_rejects_disconnected_path() {
        let mut mesh = grid(2, 2);
        // 0 and 8 are not adjacent
        let polyedge = Polyedge::new(vec![v(0), v(8)]).unwrap();
        assert!(matches!(
            add_strip(&mut mesh, &polyedge),
            Err(MeshError::PolyedgeNotConnected { .. })
        ));
    }
}
