//! In-memory graph storage implementation
//!
//! Adjacency is kept as one ordered set per node id. Every undirected edge is
//! present in both endpoint sets, so `num_edges` is half the total set size.

use super::types::{AdjacencyMatrix, Count, EdgeList, NodeId};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ops::Range;
use thiserror::Error;

/// Errors that can occur during graph mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge ({0}, {1}) not found")]
    EdgeNotFound(NodeId, NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Undirected simple graph over dense node ids.
///
/// Removing a node clears its adjacency and decrements `num_nodes`, but ids are
/// never renumbered: the slot stays allocated and the id is never handed out
/// again. Operations on a removed id report [`GraphError::NodeNotFound`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    /// Number of live nodes
    num_nodes: Count,

    /// Number of undirected edges
    num_edges: Count,

    /// Neighbor set per node id slot
    adjacency: Vec<BTreeSet<NodeId>>,

    /// Ids of removed nodes
    removed: BTreeSet<NodeId>,
}

impl Graph {
    /// Create a graph with `num_nodes` isolated nodes
    pub fn new(num_nodes: Count) -> Self {
        Graph {
            num_nodes,
            num_edges: 0,
            adjacency: vec![BTreeSet::new(); num_nodes],
            removed: BTreeSet::new(),
        }
    }

    /// Rebuild a graph from an edge list. Duplicate pairs and self loops are absorbed.
    pub fn from_edge_list(num_nodes: Count, edges: &[(NodeId, NodeId)]) -> GraphResult<Self> {
        let mut graph = Graph::new(num_nodes);
        for &(node1, node2) in edges {
            graph.add_edge(node1, node2)?;
        }
        Ok(graph)
    }

    /// Fully connected graph: every pair of distinct nodes shares an edge
    pub fn complete(num_nodes: Count) -> Self {
        let mut graph = Graph::new(num_nodes);
        for node in 0..num_nodes {
            graph.adjacency[node] = (0..num_nodes).filter(|&other| other != node).collect();
        }
        graph.num_edges = num_nodes * num_nodes.saturating_sub(1) / 2;
        graph
    }

    /// Number of live nodes
    pub fn node_count(&self) -> Count {
        self.num_nodes
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> Count {
        self.num_edges
    }

    /// Number of id slots, including removed ones. Valid ids are `0..node_slots()`.
    pub fn node_slots(&self) -> Count {
        self.adjacency.len()
    }

    /// Check if a node id is live
    pub fn has_node(&self, node: NodeId) -> bool {
        node < self.adjacency.len() && !self.removed.contains(&node)
    }

    /// Iterate live node ids in increasing order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len()).filter(move |node| !self.removed.contains(node))
    }

    fn check_node(&self, node: NodeId) -> GraphResult<()> {
        if self.has_node(node) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(node))
        }
    }

    /// Append `count` isolated nodes and return their ids
    pub fn add_node(&mut self, count: Count) -> Range<NodeId> {
        let start = self.adjacency.len();
        self.adjacency.extend((0..count).map(|_| BTreeSet::new()));
        self.num_nodes += count;
        start..self.adjacency.len()
    }

    /// Remove a node and every edge incident to it
    pub fn remove_node(&mut self, node: NodeId) -> GraphResult<()> {
        self.check_node(node)?;

        let neighbors = std::mem::take(&mut self.adjacency[node]);
        for neighbor in &neighbors {
            self.adjacency[*neighbor].remove(&node);
        }
        self.num_edges -= neighbors.len();
        self.num_nodes -= 1;
        self.removed.insert(node);
        Ok(())
    }

    /// Check if two nodes are connected.
    ///
    /// A node is always considered connected to itself, although no edge record
    /// is ever stored for it. Unknown ids are never connected.
    pub fn has_edge(&self, node1: NodeId, node2: NodeId) -> bool {
        if node1 == node2 {
            return true;
        }
        let (Some(set1), Some(set2)) = (self.adjacency.get(node1), self.adjacency.get(node2)) else {
            return false;
        };

        // Search the smaller neighbor set
        if set1.len() <= set2.len() {
            set1.contains(&node2)
        } else {
            set2.contains(&node1)
        }
    }

    /// Connect two nodes.
    ///
    /// Returns `false` without changing anything when the edge already exists or
    /// both ends are the same node.
    pub fn add_edge(&mut self, node1: NodeId, node2: NodeId) -> GraphResult<bool> {
        self.check_node(node1)?;
        self.check_node(node2)?;
        if self.has_edge(node1, node2) {
            return Ok(false);
        }

        self.num_edges += 1;
        self.adjacency[node1].insert(node2);
        self.adjacency[node2].insert(node1);
        Ok(true)
    }

    /// Disconnect two nodes
    pub fn remove_edge(&mut self, node1: NodeId, node2: NodeId) -> GraphResult<()> {
        if node1 == node2
            || !self.has_node(node1)
            || !self.has_node(node2)
            || !self.has_edge(node1, node2)
        {
            return Err(GraphError::EdgeNotFound(node1, node2));
        }

        self.num_edges -= 1;
        self.adjacency[node1].remove(&node2);
        self.adjacency[node2].remove(&node1);
        Ok(())
    }

    /// Neighbor set of a node
    pub fn neighbors(&self, node: NodeId) -> GraphResult<&BTreeSet<NodeId>> {
        self.check_node(node)?;
        Ok(&self.adjacency[node])
    }

    /// Degree of every id slot (removed slots report 0)
    pub fn get_degrees(&self) -> Vec<Count> {
        self.adjacency.iter().map(BTreeSet::len).collect()
    }

    /// Arithmetic mean of the live node degrees, 0 for an empty graph
    pub fn get_mean_degree(&self) -> f64 {
        if self.num_nodes == 0 {
            return 0.0;
        }
        2.0 * self.num_edges as f64 / self.num_nodes as f64
    }

    /// Degree -> number of live nodes with that degree
    pub fn get_degree_distribution(&self) -> BTreeMap<Count, Count> {
        let mut distribution = BTreeMap::new();
        for node in self.nodes() {
            *distribution.entry(self.adjacency[node].len()).or_insert(0) += 1;
        }
        distribution
    }

    /// Every undirected edge exactly once, as `(node, neighbor)` with `node < neighbor`
    pub fn get_edge_list(&self) -> EdgeList {
        let mut edge_list = Vec::with_capacity(self.num_edges);
        for (node, neighbors) in self.adjacency.iter().enumerate() {
            // Sets are ordered, so everything after `node` is a larger id
            edge_list.extend(neighbors.range(node + 1..).map(|&neighbor| (node, neighbor)));
        }
        edge_list
    }

    /// Connected components of the live nodes.
    ///
    /// Each component lists its ids in increasing order; components are ordered
    /// by their smallest id.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let mut visited = vec![false; self.adjacency.len()];
        let mut components = Vec::new();

        for start in self.nodes() {
            if visited[start] {
                continue;
            }
            visited[start] = true;

            // BFS
            let mut component = vec![start];
            let mut queue = VecDeque::from([start]);
            while let Some(node) = queue.pop_front() {
                for &neighbor in &self.adjacency[node] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        component.push(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// Largest connected component as a new graph with compacted ids.
    ///
    /// Surviving nodes are renumbered `0..k` in increasing order of their old
    /// ids, so the relative order is kept and no dangling slots remain. Ties
    /// between equally large components go to the one with the smallest id.
    /// Returns the new graph and, for every new id, the old one.
    pub fn giant_component(&self) -> (Graph, Vec<NodeId>) {
        let mut largest: Vec<NodeId> = Vec::new();
        for component in self.connected_components() {
            if component.len() > largest.len() {
                largest = component;
            }
        }

        let mut new_id = vec![None; self.adjacency.len()];
        for (index, &old) in largest.iter().enumerate() {
            new_id[old] = Some(index);
        }

        let mut giant = Graph::new(largest.len());
        for (index, &old) in largest.iter().enumerate() {
            giant.adjacency[index] =
                self.adjacency[old].iter().filter_map(|&n| new_id[n]).collect();
        }
        giant.num_edges = giant.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2;
        (giant, largest)
    }

    /// Dense adjacency matrix over all id slots
    pub fn get_adjacency_matrix(&self) -> AdjacencyMatrix {
        let slots = self.adjacency.len();
        let mut matrix = AdjacencyMatrix::from_elem((slots, slots), false);
        for (node, neighbors) in self.adjacency.iter().enumerate() {
            for &neighbor in neighbors {
                matrix[[node, neighbor]] = true;
            }
        }
        matrix
    }
}
