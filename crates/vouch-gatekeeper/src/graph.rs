//! Dependency graph over claim ids

use indexmap::IndexMap;
use vouch_domain::{normalize_reference, ClaimId, Ledger, Vocabulary};

/// Directed graph of claim-to-claim dependencies
///
/// Nodes are exactly the ledger's claim ids, in ledger order. An edge
/// `claim -> dep` exists only when the normalized reference names another
/// claim of the ledger that is not an axiom; references to axioms and
/// externals are sinks and are dropped. Repeated references collapse to a
/// single edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    adjacency: IndexMap<ClaimId, Vec<ClaimId>>,
}

impl DependencyGraph {
    /// Build the graph for a ledger
    pub fn build(ledger: &Ledger, vocabulary: &Vocabulary) -> Self {
        let mut adjacency = IndexMap::with_capacity(ledger.len());

        for record in ledger.records() {
            let mut edges: Vec<ClaimId> = Vec::new();
            for reference in record.dependencies() {
                let target = normalize_reference(reference);
                if !ledger.contains(target) || vocabulary.is_axiom(target) {
                    continue;
                }
                if edges.iter().all(|existing| existing.as_str() != target) {
                    edges.push(ClaimId::new(target));
                }
            }
            adjacency.insert(record.id().clone(), edges);
        }

        Self { adjacency }
    }

    /// Build a graph directly from an adjacency list
    ///
    /// Targets that are not themselves nodes are dropped.
    pub fn from_edges<I, N, E>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, Vec<E>)>,
        N: Into<ClaimId>,
        E: Into<ClaimId>,
    {
        let raw: Vec<(ClaimId, Vec<ClaimId>)> = edges
            .into_iter()
            .map(|(node, targets)| (node.into(), targets.into_iter().map(Into::into).collect()))
            .collect();
        let mut adjacency: IndexMap<ClaimId, Vec<ClaimId>> = IndexMap::with_capacity(raw.len());
        for (node, _) in &raw {
            adjacency.insert(node.clone(), Vec::new());
        }
        for (node, targets) in raw {
            let kept: Vec<ClaimId> = targets
                .into_iter()
                .filter(|target| adjacency.contains_key(target))
                .collect();
            if let Some(slot) = adjacency.get_mut(&node) {
                for target in kept {
                    if !slot.contains(&target) {
                        slot.push(target);
                    }
                }
            }
        }
        Self { adjacency }
    }

    /// Nodes in stable order
    pub fn nodes(&self) -> impl Iterator<Item = &ClaimId> {
        self.adjacency.keys()
    }

    /// Outgoing edges of a node (empty for unknown nodes)
    pub fn edges(&self, node: &str) -> &[ClaimId] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Position of a node in iteration order
    pub(crate) fn index_of(&self, node: &str) -> Option<usize> {
        self.adjacency.get_index_of(node)
    }

    /// Node at a position in iteration order
    pub(crate) fn node_at(&self, index: usize) -> Option<(&ClaimId, &Vec<ClaimId>)> {
        self.adjacency.get_index(index)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}
