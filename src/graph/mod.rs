//! Undirected graphs over vertices `0..V` and the searches built on them.

mod components;
mod paths;

pub use components::ConnectedComponents;
pub use paths::{DepthFirstPaths, Paths};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {vertex} is outside graph with {vertices} vertices")]
    VertexOutOfRange { vertex: usize, vertices: usize },
}

pub type Result<T> = core::result::Result<T, GraphError>;

/// Adjacency-list view of a graph with a fixed vertex set.
pub trait Graph {
    fn vertices(&self) -> usize;
    fn edges(&self) -> usize;
    fn add_edge(&mut self, v: usize, w: usize) -> Result<()>;
    /// Neighbours of `v`. Panics if `v` is not a vertex.
    fn adj(&self, v: usize) -> &[usize];

    fn check_vertex(&self, v: usize) -> Result<()> {
        if v < self.vertices() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex: v,
                vertices: self.vertices(),
            })
        }
    }
}

/// Undirected graph; parallel edges and self-loops are kept. A self-loop
/// on `v` appears twice in `adj(v)`.
#[derive(Debug, Clone, Default)]
pub struct Undirected {
    adj: Vec<Vec<usize>>,
    edges: usize,
}

impl Undirected {
    pub fn new(vertices: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertices],
            edges: 0,
        }
    }
}

impl Graph for Undirected {
    fn vertices(&self) -> usize {
        self.adj.len()
    }

    fn edges(&self) -> usize {
        self.edges
    }

    fn add_edge(&mut self, v: usize, w: usize) -> Result<()> {
        self.check_vertex(v)?;
        self.check_vertex(w)?;
        self.adj[v].push(w);
        self.adj[w].push(v);
        self.edges += 1;
        Ok(())
    }

    fn adj(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }
}

pub fn degree<G: Graph + ?Sized>(g: &G, v: usize) -> Result<usize> {
    g.check_vertex(v)?;
    Ok(g.adj(v).len())
}

pub fn max_degree<G: Graph + ?Sized>(g: &G) -> usize {
    (0..g.vertices()).map(|v| g.adj(v).len()).max().unwrap_or(0)
}

/// `2E / V`, or zero for a graph without vertices.
pub fn average_degree<G: Graph + ?Sized>(g: &G) -> f64 {
    if g.vertices() == 0 {
        return 0.0;
    }
    2.0 * g.edges() as f64 / g.vertices() as f64
}

pub fn self_loops<G: Graph + ?Sized>(g: &G) -> usize {
    let twice: usize = (0..g.vertices())
        .map(|v| g.adj(v).iter().filter(|&&w| w == v).count())
        .sum();
    twice / 2
}
