//! Coarse meshes and densification.
//!
//! A [`CoarseMesh`] pairs a quad mesh with its strip partition and a
//! per-strip density: the number of subdivisions every edge of that strip
//! receives when the coarse mesh is regenerated into a fine one. Because
//! opposite edges of a face always belong to the same strip, the
//! discretized patches of neighboring faces agree along shared edges and
//! weld into a conforming fine mesh.
//!
//! Densities become stale whenever the strips change: after any grammar
//! operation, rebuild the coarse mesh from the edited [`QuadMesh`].
//!
//! # Example
//!
//! ```
//! use quadrille::densify::CoarseMesh;
//! use quadrille::mesh::builder::grid;
//!
//! let mut coarse = CoarseMesh::new(grid(2, 2)).unwrap();
//! let strip = coarse.partition().strip_ids().next().unwrap();
//! coarse.set_strip_density(strip, 3).unwrap();
//!
//! let fine = coarse.densify().unwrap();
//! assert_eq!(fine.num_faces(), 8);
//! ```

mod coons;
mod weld;

pub use coons::discrete_coons_patch;
pub use weld::join_and_weld;

use std::collections::BTreeMap;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{QuadMesh, StripId};
use crate::strip::{collect_strips, StripPartition};

use coons::discretize_segment;

/// Geometric tolerance for welding patch boundaries.
const WELD_TOLERANCE: f64 = 1e-9;

/// A quad mesh with per-strip subdivision densities.
///
/// Composition of orthogonal capabilities: the mesh itself, its strip
/// partition, and the density map. The fine mesh produced by
/// [`densify`](CoarseMesh::densify) is cached until a density changes.
#[derive(Debug, Clone)]
pub struct CoarseMesh {
    mesh: QuadMesh,
    partition: StripPartition,
    densities: BTreeMap<StripId, usize>,
    dense: Option<QuadMesh>,
}

impl CoarseMesh {
    /// Wrap a mesh, collect its strips, and initialize every density to 1.
    ///
    /// # Errors
    /// Fails if any face is neither a quad nor a valid pseudo-quad.
    pub fn new(mesh: QuadMesh) -> Result<Self> {
        let partition = collect_strips(&mesh)?;
        let densities = partition.strip_ids().map(|s| (s, 1)).collect();
        Ok(Self {
            mesh,
            partition,
            densities,
            dense: None,
        })
    }

    /// The underlying coarse mesh.
    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    /// The strip partition of the coarse mesh.
    pub fn partition(&self) -> &StripPartition {
        &self.partition
    }

    /// Give the coarse mesh back, dropping strips and densities.
    ///
    /// Use this to hand the mesh to a grammar operation; densities do not
    /// survive topological edits and a new [`CoarseMesh`] must be built
    /// afterwards.
    pub fn into_mesh(self) -> QuadMesh {
        self.mesh
    }

    /// The density of a strip.
    pub fn density(&self, strip: StripId) -> Result<usize> {
        self.densities
            .get(&strip)
            .copied()
            .ok_or(MeshError::UnknownStrip(strip))
    }

    /// Set the density of a strip.
    ///
    /// # Errors
    /// Fails on an unknown strip or a zero density.
    pub fn set_strip_density(&mut self, strip: StripId, density: usize) -> Result<()> {
        if density == 0 {
            return Err(MeshError::ZeroDensity { strip });
        }
        if !self.densities.contains_key(&strip) {
            return Err(MeshError::UnknownStrip(strip));
        }
        self.densities.insert(strip, density);
        self.dense = None;
        Ok(())
    }

    /// Derive every strip's density from a target edge length.
    ///
    /// Each strip gets `ceil(mean transverse edge length / target)`, with a
    /// minimum of 1.
    pub fn densities_from_target_length(&mut self, target: f64) -> Result<()> {
        if !(target > 0.0) {
            return Err(MeshError::invalid_param(
                "target",
                target,
                "target length must be positive",
            ));
        }
        let mut updated = BTreeMap::new();
        for (id, strip) in self.partition.strips() {
            let total: f64 = strip
                .edges()
                .iter()
                .map(|&(u, v)| self.mesh.edge_length(u, v))
                .sum();
            let mean = total / strip.len() as f64;
            let density = (mean / target).ceil().max(1.0) as usize;
            updated.insert(id, density);
        }
        self.densities = updated;
        self.dense = None;
        Ok(())
    }

    /// The cached fine mesh from the last [`densify`](CoarseMesh::densify)
    /// call, if any.
    pub fn dense(&self) -> Option<&QuadMesh> {
        self.dense.as_ref()
    }

    /// Regenerate the fine mesh.
    ///
    /// Every coarse face is discretized into a Coons patch sized by its
    /// strips' densities, and all patches are welded into one mesh. The
    /// result is cached; changing any density clears the cache and the next
    /// call regenerates from scratch.
    pub fn densify(&mut self) -> Result<&QuadMesh> {
        if self.dense.is_none() {
            let mut patches = Vec::with_capacity(self.mesh.num_faces());
            for (f, face) in self.mesh.faces() {
                let patch = match face.pole {
                    None => self.quad_patch(&face.vertices)?,
                    Some(pole) => self.pseudo_quad_patch(&face.vertices, pole, f)?,
                };
                patches.push(patch);
            }
            self.dense = Some(join_and_weld(&patches, WELD_TOLERANCE)?);
        }
        Ok(self.dense.as_ref().expect("cache was just filled"))
    }

    /// Boundary discretization and patch for a true quad.
    fn quad_patch(
        &self,
        vertices: &[crate::mesh::VertexId],
    ) -> Result<(Vec<Point3<f64>>, Vec<Vec<usize>>)> {
        let [a, b, c, d] = [vertices[0], vertices[1], vertices[2], vertices[3]];
        let da = self.edge_density(a, b)?;
        let db = self.edge_density(b, c)?;

        let ab = discretize_segment(*self.mesh.position(a), *self.mesh.position(b), da);
        let bc = discretize_segment(*self.mesh.position(b), *self.mesh.position(c), db);
        let dc = discretize_segment(*self.mesh.position(d), *self.mesh.position(c), da);
        let ad = discretize_segment(*self.mesh.position(a), *self.mesh.position(d), db);
        discrete_coons_patch(&ab, &bc, &dc, &ad)
    }

    /// Patch for a pseudo-quad: three boundary curves plus a constant
    /// placeholder polyline at the pole.
    fn pseudo_quad_patch(
        &self,
        vertices: &[crate::mesh::VertexId],
        pole: crate::mesh::VertexId,
        f: crate::mesh::FaceId,
    ) -> Result<(Vec<Point3<f64>>, Vec<Vec<usize>>)> {
        let i = vertices
            .iter()
            .position(|&v| v == pole)
            .ok_or(MeshError::InvalidPole(f))?;
        let (p, b, c) = (vertices[i], vertices[(i + 1) % 3], vertices[(i + 2) % 3]);
        let d1 = self.edge_density(p, b)?;
        let d2 = self.edge_density(b, c)?;

        let ab = discretize_segment(*self.mesh.position(p), *self.mesh.position(b), d1);
        let bc = discretize_segment(*self.mesh.position(b), *self.mesh.position(c), d2);
        let dc = discretize_segment(*self.mesh.position(p), *self.mesh.position(c), d1);
        let ad = vec![*self.mesh.position(p); d2 + 1];
        discrete_coons_patch(&ab, &bc, &dc, &ad)
    }

    /// Density of the strip owning an edge.
    fn edge_density(&self, u: crate::mesh::VertexId, v: crate::mesh::VertexId) -> Result<usize> {
        let strip = self
            .partition
            .strip_of_edge(u, v)
            .ok_or(MeshError::UnknownEdge { u, v })?;
        self.density(strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::builder::{from_vertices_and_faces_with_poles, grid};
    use crate::mesh::VertexId;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_unit_densities_reproduce_coarse_mesh() {
        let mut coarse = CoarseMesh::new(grid(2, 2)).unwrap();
        let fine = coarse.densify().unwrap();

        assert_eq!(fine.num_vertices(), 9);
        assert_eq!(fine.num_faces(), 4);
        assert!(fine.is_manifold());
        assert!(fine.is_quad_mesh());
    }

    #[test]
    fn test_single_strip_density() {
        let mut coarse = CoarseMesh::new(grid(2, 2)).unwrap();
        let strip = coarse.partition().strip_of_edge(v(0), v(1)).unwrap();
        coarse.set_strip_density(strip, 3).unwrap();

        let fine = coarse.densify().unwrap();

        // The two faces of the strip triple; the others stay single
        assert_eq!(fine.num_faces(), 8);
        // Three transverse edges gain two interior points each
        assert_eq!(fine.num_vertices(), 15);
        assert!(fine.is_manifold());
        assert_eq!(fine.euler_characteristic(), 1);
    }

    #[test]
    fn test_density_consistency_across_strip() {
        let mut coarse = CoarseMesh::new(grid(3, 2)).unwrap();
        let strip = coarse.partition().strip_of_edge(v(0), v(1)).unwrap();
        coarse.set_strip_density(strip, 4).unwrap();

        let edges: Vec<_> = coarse
            .partition()
            .strip(strip)
            .unwrap()
            .edges()
            .to_vec();
        let positions: Vec<(Point3<f64>, Point3<f64>)> = edges
            .iter()
            .map(|&(a, b)| (*coarse.mesh().position(a), *coarse.mesh().position(b)))
            .collect();

        let fine = coarse.densify().unwrap().clone();

        // Every transverse edge of the strip carries 4 segments in the
        // fine mesh: its interior sample points all exist as vertices.
        for (pa, pb) in positions {
            for k in 1..4 {
                let t = k as f64 / 4.0;
                let sample = Point3::from((1.0 - t) * pa.coords + t * pb.coords);
                let found = fine
                    .vertex_ids()
                    .any(|w| (fine.position(w) - sample).norm() < 1e-9);
                assert!(found, "missing subdivision point at {:?}", sample);
            }
        }
    }

    #[test]
    fn test_target_length_densities() {
        let mut coarse = CoarseMesh::new(grid(2, 2)).unwrap();
        coarse.densities_from_target_length(0.5).unwrap();

        for s in coarse.partition().strip_ids().collect::<Vec<_>>() {
            assert_eq!(coarse.density(s).unwrap(), 2);
        }

        let fine = coarse.densify().unwrap();
        assert_eq!(fine.num_faces(), 16);
        assert_eq!(fine.num_vertices(), 25);
    }

    #[test]
    fn test_zero_density_rejected() {
        let mut coarse = CoarseMesh::new(grid(1, 1)).unwrap();
        let strip = coarse.partition().strip_ids().next().unwrap();
        assert!(matches!(
            coarse.set_strip_density(strip, 0),
            Err(MeshError::ZeroDensity { .. })
        ));
    }

    #[test]
    fn test_cache_cleared_on_density_change() {
        let mut coarse = CoarseMesh::new(grid(1, 1)).unwrap();
        coarse.densify().unwrap();
        assert!(coarse.dense().is_some());

        let strip = coarse.partition().strip_ids().next().unwrap();
        coarse.set_strip_density(strip, 2).unwrap();
        assert!(coarse.dense().is_none());

        let fine = coarse.densify().unwrap();
        assert_eq!(fine.num_faces(), 2);
    }

    #[test]
    fn test_pseudo_quad_densification() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
        ];
        let faces = vec![vec![0, 1, 2]];
        let poles = vec![Some(0)];
        let mesh = from_vertices_and_faces_with_poles(&vertices, &faces, &poles).unwrap();

        let mut coarse = CoarseMesh::new(mesh).unwrap();
        // Densify the strip terminating at the pole
        let strip = coarse.partition().strip_of_edge(v(1), v(2)).unwrap();
        coarse.set_strip_density(strip, 2).unwrap();

        let fine = coarse.densify().unwrap();

        // The pole fans out into two pseudo-quads
        assert_eq!(fine.num_faces(), 2);
        assert_eq!(fine.num_vertices(), 4);
        assert!(fine.is_quad_mesh());
        let poles_found = fine
            .face_ids()
            .filter(|&f| fine.is_pseudo_quad(f))
            .count();
        assert_eq!(poles_found, 2);
    }
}
