//! Combinatorial search over strip deletions.
//!
//! Generate-and-evaluate exploration of the edit grammar: enumerate
//! bounded subsets of strips, apply each deletion to an independent clone
//! of the mesh, and keep the candidates that pass the topological validity
//! predicate. The two-colorability projection additionally screens subsets
//! combinatorially — on the strip crossing graph, before any mesh edit —
//! for survivors whose crossing graph is bipartite.
//!
//! Exhaustive enumeration is exponential in the subset size; both the size
//! bound `kmax` and the candidate budget are explicit options.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::error::Result;
use crate::grammar::delete_strips;
use crate::mesh::{QuadMesh, StripId};
use crate::progress::Progress;
use crate::strip::{collect_strips, crossing_graph};

use super::coloring::two_coloring;

/// Options for combinatorial strip-deletion search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of strips deleted per candidate.
    pub kmax: usize,

    /// Maximum number of candidate subsets examined across all sizes.
    /// Bounds the combinatorial blow-up of exhaustive enumeration.
    pub max_candidates: usize,

    /// Whether to evaluate candidates in parallel (default: true).
    pub parallel: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            kmax: 2,
            max_candidates: 10_000,
            parallel: true,
        }
    }
}

impl SearchOptions {
    /// Set the maximum deletion subset size.
    pub fn with_kmax(mut self, kmax: usize) -> Self {
        self.kmax = kmax;
        self
    }

    /// Set the candidate budget.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Create options for single-threaded evaluation.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// A surviving candidate edit.
#[derive(Debug, Clone)]
pub struct DeletionCandidate {
    /// The strips deleted, as ids of the partition of the source mesh.
    pub strips: Vec<StripId>,
    /// The edited mesh.
    pub mesh: QuadMesh,
}

/// The validity predicate for candidate edits.
///
/// An edit is kept when the edited mesh still has faces, is manifold, is a
/// quad (or pseudo-quad) mesh, and matches the source mesh's Euler
/// characteristic and boundary-loop count.
pub fn is_valid_edit(reference: &QuadMesh, edited: &QuadMesh) -> bool {
    edited.num_faces() > 0
        && edited.is_manifold()
        && edited.is_quad_mesh()
        && edited.euler_characteristic() == reference.euler_characteristic()
        && edited.boundary_loops().len() == reference.boundary_loops().len()
}

/// Enumerate all valid strip deletions of up to `kmax` strips.
///
/// Every subset is applied to an independent clone of the mesh, so
/// evaluation parallelizes over candidates; the source mesh is never
/// mutated. Returns the candidates passing [`is_valid_edit`], in
/// enumeration order.
pub fn enumerate_strip_deletions(
    mesh: &QuadMesh,
    options: &SearchOptions,
    progress: &Progress,
) -> Result<Vec<DeletionCandidate>> {
    let partition = collect_strips(mesh)?;
    let ids: Vec<StripId> = partition.strip_ids().collect();
    let subsets = bounded_subsets(&ids, options.kmax, options.max_candidates);
    let total = subsets.len();

    let evaluate = |strips: &Vec<StripId>| -> Option<DeletionCandidate> {
        let mut clone = mesh.clone();
        let set: BTreeSet<StripId> = strips.iter().copied().collect();
        delete_strips(&mut clone, &partition, &set).ok()?;
        is_valid_edit(mesh, &clone).then(|| DeletionCandidate {
            strips: strips.clone(),
            mesh: clone,
        })
    };

    let candidates = if options.parallel {
        progress.report(0, total, "evaluating strip deletions");
        let found: Vec<DeletionCandidate> = subsets.par_iter().filter_map(evaluate).collect();
        progress.report(total, total, "evaluating strip deletions");
        found
    } else {
        let mut found = Vec::new();
        for (i, subset) in subsets.iter().enumerate() {
            progress.report(i, total, "evaluating strip deletions");
            found.extend(evaluate(subset));
        }
        found
    };

    Ok(candidates)
}

/// Find the smallest strip deletion leaving a two-colorable pattern.
///
/// Subsets are screened on the crossing graph first — deleting a node set
/// and two-coloring the rest is far cheaper than mesh surgery — and only
/// bipartite survivors are applied to a clone and checked with
/// [`is_valid_edit`]. Returns the first valid candidate by ascending subset
/// size, or `None` within the given bounds. A candidate with an empty
/// strip list means the mesh is already two-colorable.
pub fn two_colorable_projection(
    mesh: &QuadMesh,
    options: &SearchOptions,
    progress: &Progress,
) -> Result<Option<DeletionCandidate>> {
    let partition = collect_strips(mesh)?;
    let graph = crossing_graph(mesh, &partition)?;

    if two_coloring(&graph).is_some() {
        return Ok(Some(DeletionCandidate {
            strips: Vec::new(),
            mesh: mesh.clone(),
        }));
    }

    let ids: Vec<StripId> = partition.strip_ids().collect();
    let subsets = bounded_subsets(&ids, options.kmax, options.max_candidates);
    let total = subsets.len();

    for (i, subset) in subsets.iter().enumerate() {
        progress.report(i, total, "screening two-colorable projections");

        let deleted: BTreeSet<StripId> = subset.iter().copied().collect();
        let mut reduced = graph.clone();
        reduced.retain(|n, _| !deleted.contains(n));
        for neighbors in reduced.values_mut() {
            neighbors.retain(|n| !deleted.contains(n));
        }
        if two_coloring(&reduced).is_none() {
            continue;
        }

        let mut clone = mesh.clone();
        if delete_strips(&mut clone, &partition, &deleted).is_err() {
            continue;
        }
        if is_valid_edit(mesh, &clone) {
            return Ok(Some(DeletionCandidate {
                strips: subset.clone(),
                mesh: clone,
            }));
        }
    }
    Ok(None)
}

/// All subsets of `ids` of size 1..=kmax, by ascending size, capped at
/// `budget` subsets.
fn bounded_subsets(ids: &[StripId], kmax: usize, budget: usize) -> Vec<Vec<StripId>> {
    let mut subsets = Vec::new();
    for k in 1..=kmax.min(ids.len()) {
        let mut current = Vec::with_capacity(k);
        extend_subsets(ids, 0, k, &mut current, &mut subsets, budget);
        if subsets.len() >= budget {
            break;
        }
    }
    subsets
}

fn extend_subsets(
    ids: &[StripId],
    from: usize,
    k: usize,
    current: &mut Vec<StripId>,
    out: &mut Vec<Vec<StripId>>,
    budget: usize,
) {
    if out.len() >= budget {
        return;
    }
    if current.len() == k {
        out.push(current.clone());
        return;
    }
    for i in from..ids.len() {
        current.push(ids[i]);
        extend_subsets(ids, i + 1, k, current, out, budget);
        current.pop();
        if out.len() >= budget {
            return;
        }
    }
}
