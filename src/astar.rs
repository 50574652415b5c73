use crate::frontier::{Frontier, Priority};
use crate::{Graph, NodeId, Path, Weight};

use std::collections::HashMap;

/// Per-vertex bookkeeping for one search. The estimate is computed when the
/// vertex is first seen and never again; g only decreases after that.
struct SearchNode<V, E> {
    vertex: V,
    h: Weight,
    g: Weight,
    prev: Option<NodeId>,
    via: Option<E>,
    order: u64,
}

impl<V, E> SearchNode<V, E> {
    fn f(&self) -> Weight {
        self.g + self.h
    }
}

struct Search<'a, G: Graph> {
    graph: &'a G,
    goal: G::Vertex,
    nodes: Vec<SearchNode<G::Vertex, G::Edge>>,
    index: HashMap<G::Vertex, NodeId>,
    open: Frontier,
    closed: Vec<bool>,
    order: u64,
}

impl<'a, G: Graph> Search<'a, G> {
    fn new(graph: &'a G, goal: G::Vertex) -> Self {
        Self {
            graph,
            goal,
            nodes: Vec::new(),
            index: HashMap::new(),
            open: Frontier::new(),
            closed: Vec::new(),
            order: 0,
        }
    }

    /// Look up the record for a vertex, creating it on first sight. The
    /// heuristic runs at most once per distinct vertex.
    fn intern(&mut self, vertex: &G::Vertex) -> NodeId {
        if let Some(&id) = self.index.get(vertex) {
            return id;
        }
        let h = self.graph.heuristic().estimate(vertex, &self.goal);
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(SearchNode {
            vertex: vertex.clone(),
            h,
            g: 0.0,
            prev: None,
            via: None,
            order: 0,
        });
        self.index.insert(vertex.clone(), id);
        id
    }

    fn next_order(&mut self) -> u64 {
        let order = self.order;
        self.order += 1;
        order
    }

    fn is_closed(&self, id: NodeId) -> bool {
        self.closed.get(id.index()).copied().unwrap_or(false)
    }

    fn close(&mut self, id: NodeId) {
        let i = id.index();
        if i >= self.closed.len() {
            self.closed.resize(i + 1, false);
        }
        self.closed[i] = true;
    }

    fn run(&mut self, start: &G::Vertex) -> Option<NodeId> {
        let start_id = self.intern(start);
        let order = self.next_order();
        let n = &mut self.nodes[start_id.index()];
        n.g = 0.0;
        n.order = order;
        let priority = Priority::new(n.f(), n.h, n.order);
        self.open.push(start_id, priority);

        while let Some(current) = self.open.pop() {
            if self.nodes[current.index()].vertex == self.goal {
                return Some(current);
            }
            self.close(current);

            let graph = self.graph;
            let current_vertex = self.nodes[current.index()].vertex.clone();
            let current_g = self.nodes[current.index()].g;
            for edge in graph.outbound_edges(&current_vertex) {
                let id = self.intern(&graph.target(&edge));
                let g = current_g + graph.weight(&edge);
                let (h, old_f) = {
                    let n = &self.nodes[id.index()];
                    (n.h, n.f())
                };
                let f = g + h;

                // a better path to this vertex is already final
                if self.is_closed(id) && f >= old_f {
                    continue;
                }

                if !self.open.contains(id) || f < old_f {
                    self.open.remove(id);
                    let order = self.next_order();
                    let n = &mut self.nodes[id.index()];
                    n.prev = Some(current);
                    n.via = Some(edge);
                    n.g = g;
                    n.order = order;
                    let priority = Priority::new(n.f(), n.h, n.order);
                    self.open.push(id, priority);
                }
            }
        }
        None
    }

    fn reconstruct(&self, goal: NodeId) -> Path<G::Edge> {
        let mut path = Path::new();
        let mut id = goal;
        loop {
            let n = &self.nodes[id.index()];
            match (&n.via, n.prev) {
                (Some(edge), Some(prev)) => {
                    path.push(edge.clone());
                    id = prev;
                }
                _ => break,
            }
        }
        path.reverse();
        path
    }
}

/// Find the least-cost path between two vertices.
///
/// Returns the edges from `start` to `end` in traversal order. The result is
/// empty when no path exists, or when `start == end`; neither is an error.
pub fn route<G: Graph>(graph: &G, start: &G::Vertex, end: &G::Vertex) -> Path<G::Edge> {
    let mut search = Search::new(graph, end.clone());
    match search.run(start) {
        Some(goal) => search.reconstruct(goal),
        None => Path::new(),
    }
}

/// Total weight of an edge sequence, as priced by the graph.
pub fn path_cost<G: Graph>(graph: &G, path: &[G::Edge]) -> Weight {
    path.iter().map(|e| graph.weight(e)).sum()
}
