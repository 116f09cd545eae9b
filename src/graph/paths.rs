use super::{Graph, Result};

/// Path queries from a fixed source vertex.
pub trait Paths {
    fn has_path_to(&self, v: usize) -> bool;

    /// Vertices from the source to `v` inclusive, or `None` if `v` is
    /// unreachable or not a vertex.
    fn path_to(&self, v: usize) -> Option<Vec<usize>>;
}

/// Depth-first search tree rooted at a source vertex.
#[derive(Debug, Clone)]
pub struct DepthFirstPaths {
    source: usize,
    marked: Vec<bool>,
    edge_to: Vec<Option<usize>>,
}

impl DepthFirstPaths {
    pub fn new<G: Graph + ?Sized>(g: &G, source: usize) -> Result<Self> {
        g.check_vertex(source)?;
        let n = g.vertices();
        let mut marked = vec![false; n];
        let mut edge_to = vec![None; n];

        // (vertex, next neighbour index): the explicit stack visits vertices
        // in the same order a recursive search would.
        let mut stack = vec![(source, 0usize)];
        marked[source] = true;
        while let Some(top) = stack.last_mut() {
            let (v, i) = *top;
            match g.adj(v).get(i) {
                Some(&w) => {
                    top.1 += 1;
                    if !marked[w] {
                        marked[w] = true;
                        edge_to[w] = Some(v);
                        stack.push((w, 0));
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }

        Ok(Self {
            source,
            marked,
            edge_to,
        })
    }

    pub fn source(&self) -> usize {
        self.source
    }
}

impl Paths for DepthFirstPaths {
    fn has_path_to(&self, v: usize) -> bool {
        self.marked.get(v).copied().unwrap_or(false)
    }

    fn path_to(&self, v: usize) -> Option<Vec<usize>> {
        if !self.has_path_to(v) {
            return None;
        }
        let mut path = vec![v];
        let mut cur = v;
        while let Some(prev) = self.edge_to[cur] {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        Some(path)
    }
}
