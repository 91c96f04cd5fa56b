//! Strip adjacency.
//!
//! Two strips cross when they share a face: every quad is traversed by
//! exactly two strip passages (one per opposite-edge pair), and every
//! pseudo-quad by one passage through the pole flanks plus one terminating
//! against the pole. The crossing graph records these incidences and is the
//! input to the two-colorability analysis of the exploration layer.

use std::collections::{BTreeMap, BTreeSet};

use super::trace::StripPartition;
use crate::error::Result;
use crate::mesh::{FaceId, QuadMesh, StripId};

/// Build the strip crossing graph.
///
/// Nodes are strip ids; two strips are adjacent iff some face is traversed
/// by both. A strip crossing itself produces a self-loop entry, which makes
/// the graph trivially non-two-colorable.
pub fn crossing_graph(
    mesh: &QuadMesh,
    partition: &StripPartition,
) -> Result<BTreeMap<StripId, BTreeSet<StripId>>> {
    // Each face collects one entry per strip passage through it.
    let mut passages: BTreeMap<FaceId, Vec<StripId>> = BTreeMap::new();
    for (id, strip) in partition.strips() {
        for &(u, v) in strip.edges() {
            if let Some(f) = mesh.halfedge_face(u, v) {
                passages.entry(f).or_default().push(id);
            }
        }
    }

    let mut graph: BTreeMap<StripId, BTreeSet<StripId>> = BTreeMap::new();
    for id in partition.strip_ids() {
        graph.insert(id, BTreeSet::new());
    }
    for ids in passages.values() {
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                graph.get_mut(&a).expect("strip id registered").insert(b);
                graph.get_mut(&b).expect("strip id registered").insert(a);
            }
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::builder::grid;
    use crate::strip::collect_strips;

    #[test]
    fn test_grid_crossing_graph() {
        let mesh = grid(2, 2);
        let partition = collect_strips(&mesh).unwrap();
        let graph = crossing_graph(&mesh, &partition).unwrap();

        assert_eq!(graph.len(), 4);
        // Two horizontal and two vertical strips: every strip crosses
        // exactly the two strips of the other direction.
        for (id, neighbors) in &graph {
            assert_eq!(neighbors.len(), 2, "strip {:?}", id);
            assert!(!neighbors.contains(id));
        }
    }

    #[test]
    fn test_every_face_crossed_twice() {
        let mesh = grid(3, 2);
        let partition = collect_strips(&mesh).unwrap();

        let mut count: BTreeMap<FaceId, usize> = BTreeMap::new();
        for (_, strip) in partition.strips() {
            for &(u, v) in strip.edges() {
                if let Some(f) = mesh.halfedge_face(u, v) {
                    *count.entry(f).or_default() += 1;
                }
            }
        }
        for (f, _) in mesh.faces() {
            assert_eq!(count.get(&f), Some(&2));
        }
    }
}
