//! Graph coloring over generic adjacency maps.
//!
//! The two-colorability of the strip crossing graph is the combinatorial
//! predicate behind the checkerboard-pattern projection: a pattern whose
//! strips admit a two-coloring can alternate structural roles strip by
//! strip. The functions here work on plain adjacency maps and know nothing
//! about meshes.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Two-color an adjacency map by breadth-first traversal.
///
/// Returns a node-to-color mapping with colors 0 and 1 such that no two
/// adjacent nodes share a color, or `None` if the graph is not bipartite
/// (it contains an odd cycle or a self-loop). Nodes appearing only as
/// neighbors are treated as nodes of the graph.
pub fn two_coloring<N: Copy + Ord>(
    adjacency: &BTreeMap<N, BTreeSet<N>>,
) -> Option<BTreeMap<N, u8>> {
    let mut colors: BTreeMap<N, u8> = BTreeMap::new();
    let nodes: BTreeSet<N> = adjacency
        .iter()
        .flat_map(|(&n, nbrs)| std::iter::once(n).chain(nbrs.iter().copied()))
        .collect();

    for &start in &nodes {
        if colors.contains_key(&start) {
            continue;
        }
        colors.insert(start, 0);
        let mut queue = VecDeque::from([start]);
        while let Some(n) = queue.pop_front() {
            let color = colors[&n];
            let Some(neighbors) = adjacency.get(&n) else {
                continue;
            };
            for &m in neighbors {
                if m == n {
                    return None;
                }
                match colors.get(&m) {
                    Some(&c) if c == color => return None,
                    Some(_) => {}
                    None => {
                        colors.insert(m, 1 - color);
                        queue.push_back(m);
                    }
                }
            }
        }
    }
    Some(colors)
}

/// Greedy vertex coloring of an adjacency map.
///
/// Nodes are processed by descending degree (ties by node order) and each
/// receives the smallest color unused among its already-colored neighbors.
/// Self-loops are ignored. The result is a proper coloring, not necessarily
/// minimal.
pub fn greedy_coloring<N: Copy + Ord>(adjacency: &BTreeMap<N, BTreeSet<N>>) -> BTreeMap<N, usize> {
    let mut order: Vec<N> = adjacency.keys().copied().collect();
    order.sort_by_key(|n| {
        (
            std::cmp::Reverse(adjacency.get(n).map(|s| s.len()).unwrap_or(0)),
            *n,
        )
    });

    let mut colors: BTreeMap<N, usize> = BTreeMap::new();
    for n in order {
        let used: BTreeSet<usize> = adjacency
            .get(&n)
            .into_iter()
            .flatten()
            .filter(|&&m| m != n)
            .filter_map(|m| colors.get(m).copied())
            .collect();
        let color = (0..).find(|c| !used.contains(c)).expect("some color is free");
        colors.insert(n, color);
    }
    colors
}
