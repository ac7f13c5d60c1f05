//! Circular dependency detection
//!
//! Three-color depth-first search: white nodes are unvisited, gray nodes are
//! on the current search path, black nodes are fully explored. Reaching a
//! gray node closes a cycle. Every node turns black exactly once, so a full
//! pass is O(V + E). The search keeps an explicit stack, so long dependency
//! chains cannot exhaust the thread stack.

use std::fmt;

use vouch_domain::ClaimId;

use crate::graph::DependencyGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// A closed chain of claims, e.g. `A -> B -> A`
///
/// The first and last entries are the same claim. A self-loop is the
/// two-entry chain `A -> A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    chain: Vec<ClaimId>,
}

impl Cycle {
    /// The chain, closing entry included
    pub fn chain(&self) -> &[ClaimId] {
        &self.chain
    }

    /// Distinct claims on the cycle
    pub fn members(&self) -> &[ClaimId] {
        &self.chain[..self.chain.len().saturating_sub(1)]
    }

    /// Whether a claim lies on the cycle
    pub fn contains(&self, id: &str) -> bool {
        self.members().iter().any(|member| member.as_str() == id)
    }

    /// Whether the cycle is a claim depending on itself
    pub fn is_self_loop(&self) -> bool {
        self.members().len() == 1
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, id) in self.chain.iter().enumerate() {
            if idx > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(id.as_str())?;
        }
        Ok(())
    }
}

/// Find circular reference chains in a dependency graph
///
/// Roots are taken in the graph's node order and every back edge found
/// reports one cycle: the current path from the revisited node onward, with
/// the revisited node appended. A graph with several loops yields several
/// cycles; an acyclic graph yields none.
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Cycle> {
    let node_count = graph.node_count();
    let mut color = vec![Color::White; node_count];
    let mut cycles = Vec::new();
    // (node index, next edge to follow); doubles as the current path
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if color[root] != Color::White {
            continue;
        }
        color[root] = Color::Gray;
        stack.push((root, 0));

        while let Some(&(node, next)) = stack.last() {
            let edges = graph
                .node_at(node)
                .map(|(_, edges)| edges.as_slice())
                .unwrap_or(&[]);

            if next >= edges.len() {
                color[node] = Color::Black;
                stack.pop();
                continue;
            }
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let Some(target) = graph.index_of(edges[next].as_str()) else {
                continue;
            };
            match color[target] {
                Color::White => {
                    color[target] = Color::Gray;
                    stack.push((target, 0));
                }
                Color::Gray => {
                    if let Some(start) = stack.iter().position(|&(n, _)| n == target) {
                        let mut chain: Vec<ClaimId> = stack[start..]
                            .iter()
                            .filter_map(|&(n, _)| graph.node_at(n).map(|(id, _)| id.clone()))
                            .collect();
                        chain.push(edges[next].clone());
                        cycles.push(Cycle { chain });
                    }
                }
                Color::Black => {}
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &[&str])]) -> DependencyGraph {
        DependencyGraph::from_edges(
            edges
                .iter()
                .map(|(node, targets)| (*node, targets.to_vec()))
                .collect::<Vec<_>>(),
        )
    }

    fn rendered(cycles: &[Cycle]) -> Vec<String> {
        cycles.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_mutual_reference() {
        let cycles = detect_cycles(&graph(&[("A", &["B"]), ("B", &["A"])]));
        assert_eq!(rendered(&cycles), vec!["A -> B -> A"]);
        assert!(cycles[0].contains("A"));
        assert!(cycles[0].contains("B"));
    }

    #[test]
    fn test_self_loop() {
        let cycles = detect_cycles(&graph(&[("A", &["A"])]));
        assert_eq!(rendered(&cycles), vec!["A -> A"]);
        assert!(cycles[0].is_self_loop());
        assert_eq!(cycles[0].members().len(), 1);
    }

    #[test]
    fn test_acyclic_chain() {
        let cycles = detect_cycles(&graph(&[
            ("D", &["C"]),
            ("C", &["B", "A"]),
            ("B", &["A"]),
            ("A", &[]),
        ]));
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let cycles = detect_cycles(&graph(&[
            ("top", &["left", "right"]),
            ("left", &["bottom"]),
            ("right", &["bottom"]),
            ("bottom", &[]),
        ]));
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_cycle_suffix_of_path() {
        // Root X leads into the loop; X itself is not on it
        let cycles = detect_cycles(&graph(&[
            ("X", &["A"]),
            ("A", &["B"]),
            ("B", &["C"]),
            ("C", &["A"]),
        ]));
        assert_eq!(rendered(&cycles), vec!["A -> B -> C -> A"]);
        assert!(!cycles[0].contains("X"));
    }

    #[test]
    fn test_multiple_disjoint_cycles() {
        let cycles = detect_cycles(&graph(&[
            ("A", &["B"]),
            ("B", &["A"]),
            ("C", &["D"]),
            ("D", &["C"]),
            ("E", &["E"]),
        ]));
        assert_eq!(
            rendered(&cycles),
            vec!["A -> B -> A", "C -> D -> C", "E -> E"]
        );
    }

    #[test]
    fn test_two_loops_through_one_root() {
        let cycles = detect_cycles(&graph(&[("A", &["B", "C"]), ("B", &["A"]), ("C", &["A"])]));
        assert_eq!(rendered(&cycles), vec!["A -> B -> A", "A -> C -> A"]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(detect_cycles(&DependencyGraph::default()).is_empty());
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("T{}", i)).collect();
        let edges: Vec<(String, Vec<String>)> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let next = ids.get(i + 1).cloned().into_iter().collect();
                (id.clone(), next)
            })
            .collect();
        let graph = DependencyGraph::from_edges(edges);
        assert!(detect_cycles(&graph).is_empty());
    }
}
