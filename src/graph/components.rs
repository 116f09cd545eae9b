use super::Graph;
use log::debug;

/// Connected-component labelling by depth-first search from every
/// unmarked vertex. Component ids are dense, in order of their lowest
/// vertex.
#[derive(Debug, Clone)]
pub struct ConnectedComponents {
    id: Vec<usize>,
    count: usize,
}

impl ConnectedComponents {
    pub fn new<G: Graph + ?Sized>(g: &G) -> Self {
        let n = g.vertices();
        let mut marked = vec![false; n];
        let mut id = vec![0; n];
        let mut count = 0;
        let mut stack = Vec::new();

        for s in 0..n {
            if marked[s] {
                continue;
            }
            marked[s] = true;
            stack.push(s);
            while let Some(v) = stack.pop() {
                id[v] = count;
                for &w in g.adj(v) {
                    if !marked[w] {
                        marked[w] = true;
                        stack.push(w);
                    }
                }
            }
            count += 1;
        }

        debug!("connected components: vertices={} components={}", n, count);
        Self { id, count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Component of `v`, or `None` if `v` is not a vertex.
    pub fn id(&self, v: usize) -> Option<usize> {
        self.id.get(v).copied()
    }

    pub fn connected(&self, v: usize, w: usize) -> bool {
        match (self.id(v), self.id(w)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
