//! Typed relation graphs over petgraph.
//!
//! # Canonical Form
//!
//! A [`RelationGraph`] is a simple graph: no self-loops, no parallel edges.
//! Nodes are inserted in identifier order and edges in lexicographic
//! `(source, target)` order, so iterating nodes or edges yields the same
//! sequence no matter in which order the relations were read. Undirected
//! edges are stored with the smaller identifier as source.
//!
//! Graphs are values: every transformation returns a new graph and leaves
//! its input untouched.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction, EdgeType, Undirected};
use relgraph_core::NodeId;

/// Directed containment: edge `u → v` means `u` contains `v`.
pub type ContainmentGraph = RelationGraph<Directed>;
/// Undirected equivalence between nodes denoting the same entity.
pub type EquivalenceGraph = RelationGraph<Undirected>;
/// Undirected partial overlap.
pub type OverlapGraph = RelationGraph<Undirected>;

// ---------------------------------------------------------------------------
// RelationGraph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RelationGraph<Ty: EdgeType> {
    graph: Graph<NodeId, (), Ty>,
    node_map: HashMap<NodeId, NodeIndex>,
}

impl<Ty: EdgeType> Default for RelationGraph<Ty> {
    fn default() -> Self {
        Self {
            graph: Graph::default(),
            node_map: HashMap::new(),
        }
    }
}

impl<Ty: EdgeType> RelationGraph<Ty> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from explicit nodes plus edges.
    ///
    /// Edge endpoints are added as nodes. Self-loops are dropped and parallel
    /// edges collapse into one.
    pub fn from_parts<N, E>(nodes: N, edges: E) -> Self
    where
        N: IntoIterator<Item = NodeId>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut node_set: BTreeSet<NodeId> = nodes.into_iter().collect();
        let mut edge_set: BTreeSet<(NodeId, NodeId)> = BTreeSet::new();

        for (source, target) in edges {
            if source == target {
                node_set.insert(source);
                continue;
            }
            node_set.insert(source.clone());
            node_set.insert(target.clone());
            if Ty::is_directed() || source < target {
                edge_set.insert((source, target));
            } else {
                edge_set.insert((target, source));
            }
        }

        let mut graph = Graph::with_capacity(node_set.len(), edge_set.len());
        let mut node_map = HashMap::with_capacity(node_set.len());
        for id in node_set {
            let idx = graph.add_node(id.clone());
            node_map.insert(id, idx);
        }
        for (source, target) in &edge_set {
            graph.add_edge(node_map[source], node_map[target], ());
        }

        Self { graph, node_map }
    }

    /// Build a graph from edges alone.
    pub fn from_edges<E>(edges: E) -> Self
    where
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        Self::from_parts(std::iter::empty(), edges)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_map.contains_key(id)
    }

    /// Whether the edge exists. Undirected graphs ignore operand order.
    #[must_use]
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Nodes in identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Edges in edge-set order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    /// Owned copy of the edge list, in edge-set order.
    #[must_use]
    pub fn edge_pairs(&self) -> Vec<(NodeId, NodeId)> {
        self.edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    /// Direct neighbors; successors for directed graphs.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> BTreeSet<&str> {
        self.node_index(id)
            .map(|idx| {
                self.graph
                    .neighbors(idx)
                    .map(|n| self.graph[n].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn degree(&self, id: &str) -> usize {
        self.node_index(id).map_or(0, |idx| {
            self.graph
                .neighbors_undirected(idx)
                .filter(|&n| n != idx)
                .count()
        })
    }

    /// Rename every node through `rename`, merging nodes that map to the
    /// same identifier.
    #[must_use]
    pub fn relabel<'a, F>(&'a self, rename: F) -> Self
    where
        F: Fn(&'a str) -> &'a str,
    {
        Self::from_parts(
            self.nodes().map(|n| rename(n).to_string()),
            self.edges()
                .map(|(a, b)| (rename(a).to_string(), rename(b).to_string())),
        )
    }

    /// The subgraph induced by `keep`: nodes outside it are dropped together
    /// with every edge touching them.
    #[must_use]
    pub fn induced_subgraph(&self, keep: &BTreeSet<NodeId>) -> Self {
        Self::from_parts(
            self.nodes()
                .filter(|n| keep.contains(*n))
                .map(str::to_string),
            self.edges()
                .filter(|(a, b)| keep.contains(*a) && keep.contains(*b))
                .map(|(a, b)| (a.to_string(), b.to_string())),
        )
    }

    /// The same graph without the listed edges. Nodes are kept.
    #[must_use]
    pub fn without_edges(&self, remove: &HashSet<(NodeId, NodeId)>) -> Self {
        let is_removed = |a: &str, b: &str| {
            let key = (a.to_string(), b.to_string());
            remove.contains(&key) || (!Ty::is_directed() && remove.contains(&(key.1, key.0)))
        };
        Self::from_parts(
            self.nodes().map(str::to_string),
            self.edges()
                .filter(|(a, b)| !is_removed(a, b))
                .map(|(a, b)| (a.to_string(), b.to_string())),
        )
    }

    /// The same graph minus nodes that have no edges.
    #[must_use]
    pub fn without_isolates(&self) -> Self {
        Self::from_edges(self.edge_pairs())
    }

    fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    /// Every node reachable from `start` following `direction`, excluding
    /// `start` itself unless it lies on a cycle.
    fn walk(&self, start: NodeIndex, direction: Direction) -> HashSet<NodeIndex> {
        let mut queue: VecDeque<NodeIndex> = VecDeque::from([start]);
        let mut seen: HashSet<NodeIndex> = HashSet::new();

        while let Some(current) = queue.pop_front() {
            for next in self.graph.neighbors_directed(current, direction) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    fn names(&self, indices: HashSet<NodeIndex>) -> BTreeSet<NodeId> {
        indices
            .into_iter()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    pub(crate) const fn inner(&self) -> &Graph<NodeId, (), Ty> {
        &self.graph
    }
}

// ---------------------------------------------------------------------------
// Directed queries
// ---------------------------------------------------------------------------

impl RelationGraph<Directed> {
    /// All nodes with a directed path to `id` (its containers).
    #[must_use]
    pub fn ancestors(&self, id: &str) -> BTreeSet<NodeId> {
        self.node_index(id)
            .map(|idx| self.names(self.walk(idx, Direction::Incoming)))
            .unwrap_or_default()
    }

    /// All nodes reachable from `id` (what it contains).
    #[must_use]
    pub fn descendants(&self, id: &str) -> BTreeSet<NodeId> {
        self.node_index(id)
            .map(|idx| self.names(self.walk(idx, Direction::Outgoing)))
            .unwrap_or_default()
    }

    /// Whether a non-empty directed path leads from `source` to `target`.
    #[must_use]
    pub fn reaches(&self, source: &str, target: &str) -> bool {
        match (self.node_index(source), self.node_index(target)) {
            (Some(s), Some(t)) => self.walk(s, Direction::Outgoing).contains(&t),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Undirected queries
// ---------------------------------------------------------------------------

impl RelationGraph<Undirected> {
    /// The connected component containing `id`, including `id` itself.
    ///
    /// Empty if `id` is not in the graph.
    #[must_use]
    pub fn component_of(&self, id: &str) -> BTreeSet<NodeId> {
        self.node_index(id)
            .map(|idx| {
                let mut members = self.walk(idx, Direction::Outgoing);
                members.insert(idx);
                self.names(members)
            })
            .unwrap_or_default()
    }

    /// All connected components, ordered by their smallest member.
    #[must_use]
    pub fn connected_components(&self) -> Vec<BTreeSet<NodeId>> {
        let mut assigned: HashSet<&str> = HashSet::new();
        let mut components = Vec::new();

        for id in self.nodes() {
            if assigned.contains(id) {
                continue;
            }
            let component = self.component_of(id);
            for member in &component {
                if let Some(idx) = self.node_index(member) {
                    assigned.insert(self.graph[idx].as_str());
                }
            }
            components.push(component);
        }

        components
    }
}

/// Order two nodes for output as an undirected pair: descending by
/// identifier.
///
/// Every undirected edge is written through this function so the same two
/// nodes always print in the same order.
#[must_use]
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a >= b { (a, b) } else { (b, a) }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
