//! The nested interval tree (§4.6, §9 "equivalent designs: a single
//! multi-dimensional R-tree"). One level per continuous dimension, each a
//! `Vec` of `(Interval, child)` pairs scanned linearly — dimensions are few,
//! per §9, so a linear scan per level beats the bookkeeping of a balanced
//! structure.

use verse_core::Interval;

#[derive(Clone, Debug)]
enum Node<T> {
    Branch(Vec<(Interval, Node<T>)>),
    Leaf(T),
}

/// A nested interval tree with a fixed number of dimensions, storing one
/// value of type `T` per distinct key path.
#[derive(Clone, Debug)]
pub struct IntervalTree<T> {
    root: Node<T>,
    dims: usize,
}

impl<T> IntervalTree<T> {
    pub fn new(dims: usize) -> Self {
        Self { root: Node::Branch(Vec::new()), dims }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Insert `value` at `key`, creating missing levels as needed (§4.6
    /// "add_* inserts along the same path, creating missing levels"). A key
    /// that already exists (same intervals at every level) overwrites the
    /// prior leaf.
    pub fn insert(&mut self, key: &[Interval], value: T) {
        assert_eq!(key.len(), self.dims, "interval tree key dimension mismatch");
        Self::insert_rec(&mut self.root, key, value);
    }

    fn insert_rec(node: &mut Node<T>, key: &[Interval], value: T) {
        match key.split_first() {
            None => *node = Node::Leaf(value),
            Some((first, rest)) => {
                let children = match node {
                    Node::Branch(children) => children,
                    Node::Leaf(_) => unreachable!("interval tree depth mismatch"),
                };
                match children.iter_mut().find(|(iv, _)| iv == first) {
                    Some((_, child)) => Self::insert_rec(child, rest, value),
                    None => {
                        let mut child = Node::Branch(Vec::new());
                        Self::insert_rec(&mut child, rest, value);
                        children.push((*first, child));
                    }
                }
            }
        }
    }

    /// Walk the tree, at each level keeping only candidates for which
    /// `matches(stored_interval, query_interval)` holds, descending into the
    /// candidate whose midpoint is closest to the query's (§4.6 "ties broken
    /// by proximity of centers"). Returns the leaf reached at depth `dims`,
    /// or `None` if any level has no matching candidate.
    pub fn check_hit<F>(&self, query: &[Interval], matches: F) -> Option<&T>
    where
        F: Fn(Interval, Interval) -> bool,
    {
        assert_eq!(query.len(), self.dims, "interval tree query dimension mismatch");
        Self::walk(&self.root, query, &matches)
    }

    fn walk<'a, F>(node: &'a Node<T>, query: &[Interval], matches: &F) -> Option<&'a T>
    where
        F: Fn(Interval, Interval) -> bool,
    {
        match (node, query.split_first()) {
            (Node::Leaf(v), None) => Some(v),
            (Node::Leaf(_), Some(_)) | (Node::Branch(_), None) => None,
            (Node::Branch(children), Some((q, rest))) => {
                let mut best: Option<(&Node<T>, f64)> = None;
                for (iv, child) in children {
                    if matches(*iv, *q) {
                        let dist = (iv.midpoint() - q.midpoint()).abs();
                        if best.map_or(true, |(_, d)| dist < d) {
                            best = Some((child, dist));
                        }
                    }
                }
                best.and_then(|(child, _)| Self::walk(child, rest, matches))
            }
        }
    }

    /// `true` if the stored interval contains the query's scalar value
    /// (point-indexed caches, §4.6 "a hit requires all dimensions to
    /// contain the query scalar").
    pub fn contains_scalar(stored: Interval, query: Interval) -> bool {
        stored.contains_value(query.low)
    }

    /// `true` if the query rectangle's interval is contained in the stored
    /// interval (reach-tube / reach-transition caches, §4.6 "contained in
    /// the cached rectangle at every level").
    pub fn contains_rect(stored: Interval, query: Interval) -> bool {
        stored.contains(query)
    }

    /// Visit every leaf, depth-first. Used by controller diffing to patch
    /// every cached segment under an agent regardless of which init it was
    /// indexed at (§4.6 "Produce a new cache that drops invalidated
    /// transitions but keeps still-valid segments").
    pub fn for_each_mut<F: FnMut(&mut T)>(&mut self, f: &mut F) {
        Self::visit_mut(&mut self.root, f);
    }

    fn visit_mut<F: FnMut(&mut T)>(node: &mut Node<T>, f: &mut F) {
        match node {
            Node::Leaf(v) => f(v),
            Node::Branch(children) => {
                for (_, child) in children {
                    Self::visit_mut(child, f);
                }
            }
        }
    }
}
