//! Disjoint-set forest over the ids `0..N`
//!
//! `join(x, y)` always makes the root of `y` the representative of the
//! merged class. The solver relies on this to keep ground types as roots.

/// Union-find with full path compression
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    /// Every id starts out as its own class
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representative of `x`'s class. Relinks every node on the walked
    /// path directly to the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the classes of `x` and `y`; `y`'s root survives.
    pub fn join(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        self.parent[root_x] = root_y;
    }

    pub fn same_class(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Canonical view of the partition: each id mapped to its root
    pub fn roots(&mut self) -> Vec<usize> {
        (0..self.parent.len()).map(|id| self.find(id)).collect()
    }
}
