//! [`Graph`], the adjacency structure underlying a [`Dungeon`](crate::Dungeon).

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// An insertion-ordered graph whose nodes are identified by value.
///
/// Every node has an ordered list of neighbors. Undirected edges are stored as a pair of
/// directed entries, one in each endpoint's list, and are always added and kept together.
///
/// The node type should be a small key with stable identity; the dungeon uses the grid
/// coordinate of each chunk.
#[derive(Clone)]
pub struct Graph<N> {
    /// All nodes, in the order they were added.
    nodes: Vec<N>,
    adjacency: HashMap<N, Vec<N>>,
    /// Edges in the order they were first added, one entry per call that changed anything.
    edges: Vec<(N, N)>,
}

/// Error from mutating a [`Graph`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GraphError<N: fmt::Debug> {
    /// The node was already present.
    #[error("node {0:?} is already in the graph")]
    DuplicateNode(N),
}

impl<N: Copy + Eq + Hash> Graph<N> {
    /// Constructs an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            adjacency: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Adds a node with no neighbors.
    ///
    /// Returns an error if the node is already present.
    pub fn add_node(&mut self, node: N) -> Result<(), GraphError<N>>
    where
        N: fmt::Debug,
    {
        if self.adjacency.contains_key(&node) {
            return Err(GraphError::DuplicateNode(node));
        }
        self.adjacency.insert(node, Vec::new());
        self.nodes.push(node);
        Ok(())
    }

    /// Connects `a` to `b`, adding either node if it is missing.
    ///
    /// Unless `directed` is true, `b` is also connected to `a`. Adding an edge that already
    /// exists has no effect. Returns whether anything changed.
    ///
    /// ```
    /// use dungen::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// assert!(graph.add_edge('a', 'b', false));
    /// assert!(!graph.add_edge('a', 'b', false));
    /// assert!(!graph.add_edge('b', 'a', false));
    /// assert_eq!(graph.neighbors(&'a'), ['b']);
    /// assert_eq!(graph.neighbors(&'b'), ['a']);
    /// ```
    pub fn add_edge(&mut self, a: N, b: N, directed: bool) -> bool {
        self.insert_if_absent(a);
        self.insert_if_absent(b);
        let known_pair = self.neighbors(&a).contains(&b) || self.neighbors(&b).contains(&a);

        let mut changed = self.push_neighbor(a, b);
        if !directed {
            changed |= self.push_neighbor(b, a);
        }
        if !known_pair {
            self.edges.push((a, b));
        }
        changed
    }

    fn insert_if_absent(&mut self, node: N) {
        if !self.adjacency.contains_key(&node) {
            self.adjacency.insert(node, Vec::new());
            self.nodes.push(node);
        }
    }

    fn push_neighbor(&mut self, from: N, to: N) -> bool {
        let neighbors = self.adjacency.entry(from).or_default();
        if neighbors.contains(&to) {
            false
        } else {
            neighbors.push(to);
            true
        }
    }

    /// All nodes, in the order they were added.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Edges in the order they were first added.
    ///
    /// Each pair of nodes appears once, in the orientation it was first added, however many
    /// directed or undirected edges join them.
    pub fn edges(&self) -> &[(N, N)] {
        &self.edges
    }

    /// Returns the neighbors of `node` in the order they were connected.
    ///
    /// Returns an empty slice if the node is absent.
    pub fn neighbors(&self, node: &N) -> &[N] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns whether `node` is in the graph.
    pub fn has_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Returns whether `node` has at least one outgoing edge.
    pub fn has_neighbors(&self, node: &N) -> bool {
        !self.neighbors(node).is_empty()
    }

    /// Returns the position of `node` in insertion order, or [`None`] if it is absent.
    ///
    /// This is a linear search.
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.nodes.iter().position(|n| n == node)
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns every node reachable from `start`, each exactly once, in breadth-first
    /// visitation order (beginning with `start`).
    ///
    /// Returns an empty list if `start` is not in the graph.
    pub fn bfs(&self, start: N) -> Vec<N> {
        if !self.has_node(&start) {
            return Vec::new();
        }

        let mut visited: HashSet<N> = HashSet::with_capacity(self.nodes.len());
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &neighbor in self.neighbors(&node) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        order
    }

    /// Breadth-first traversal starting from the node at position `index` in insertion order.
    ///
    /// Returns an empty list if there is no such node.
    pub fn bfs_at_index(&self, index: usize) -> Vec<N> {
        match self.nodes.get(index) {
            Some(&start) => self.bfs(start),
            None => Vec::new(),
        }
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adjacency.clear();
        self.edges.clear();
    }
}

impl<N: Copy + Eq + Hash> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: fmt::Debug + Copy + Eq + Hash> fmt::Debug for Graph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.nodes.iter().map(|node| (node, self.neighbors(node))))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn line(n: u8) -> Graph<u8> {
        let mut graph = Graph::new();
        for i in 1..n {
            graph.add_edge(i - 1, i, false);
        }
        graph
    }

    #[test]
    fn add_node_rejects_duplicates() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_node(1), Ok(()));
        assert_eq!(graph.add_node(1), Err(GraphError::DuplicateNode(1)));
        assert_eq!(graph.node_count(), 1);
        assert!(!graph.has_neighbors(&1));
    }

    #[test]
    fn add_edge_twice_keeps_one_entry_each_way() {
        let mut graph = Graph::new();
        assert!(graph.add_edge(1, 2, false));
        assert!(!graph.add_edge(1, 2, false));
        assert_eq!(graph.neighbors(&1), [2]);
        assert_eq!(graph.neighbors(&2), [1]);
        assert_eq!(graph.edges(), [(1, 2)]);
    }

    #[test]
    fn directed_edge_is_one_way() {
        let mut graph = Graph::new();
        assert!(graph.add_edge(1, 2, true));
        assert_eq!(graph.neighbors(&1), [2]);
        assert!(graph.neighbors(&2).is_empty());
        assert!(graph.has_node(&2));

        // Completing the pair later counts as a change.
        assert!(graph.add_edge(2, 1, false));
        assert_eq!(graph.neighbors(&2), [1]);
        assert_eq!(graph.neighbors(&1), [2]);
        assert_eq!(graph.edges(), [(1, 2)]);
    }

    #[test]
    fn reverse_directed_edge_is_same_pair() {
        let mut graph = Graph::new();
        assert!(graph.add_edge(3, 4, true));
        assert!(graph.add_edge(4, 3, true));
        assert_eq!(graph.edges(), [(3, 4)]);
        assert_eq!(graph.neighbors(&4), [3]);
    }

    #[test]
    fn add_edge_inserts_endpoints_in_order() {
        let mut graph = Graph::new();
        graph.add_edge(5, 3, false);
        graph.add_node(9).unwrap();
        assert_eq!(graph.nodes(), [5, 3, 9]);
        assert_eq!(graph.index_of(&3), Some(1));
        assert_eq!(graph.index_of(&4), None);
    }

    #[test]
    fn bfs_visits_each_reachable_node_once() {
        let mut graph = Graph::new();
        // A square with a diagonal, plus a disconnected pair.
        graph.add_edge(0, 1, false);
        graph.add_edge(1, 2, false);
        graph.add_edge(2, 3, false);
        graph.add_edge(3, 0, false);
        graph.add_edge(0, 2, false);
        graph.add_edge(10, 11, false);

        assert_eq!(graph.bfs(0), [0, 1, 3, 2]);
        assert_eq!(graph.bfs(11), [11, 10]);
        assert_eq!(graph.bfs(99), Vec::<u8>::new());
    }

    #[rstest]
    #[case(0, vec![0, 1, 2, 3])]
    #[case(2, vec![2, 1, 3, 0])]
    #[case(4, vec![])]
    fn bfs_at_index(#[case] index: usize, #[case] expected: Vec<u8>) {
        assert_eq!(line(4).bfs_at_index(index), expected);
    }

    #[test]
    fn clear() {
        let mut graph = line(3);
        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.edges().is_empty());
        assert!(!graph.has_node(&0));
    }
}
