//! Generic tree traversal driven by per-node callbacks
//!
//! A [`Traversal`] is a configuration of callbacks, not a tree type. Node
//! handles `N` are whatever the caller wants to walk: borrowed nodes for a
//! read-only pass, or arena ids when `expand` creates nodes on the fly. Every
//! callback receives the caller's build context `C` mutably, so builders keep
//! their scratch tables in one value instead of sharing them between closures.
//!
//! # Callback order
//!
//! For every node taken from the pending list:
//!
//! 1. `visit(node)`
//! 2. `expand(node)`; `None` or an empty list ends processing of the node
//! 3. for each child, left to right: `attach(child, node)`, then
//!    `should_descend(child)` decides whether the child is queued
//!
//! Filtered children are still attached; only descent is gated.
//!
//! # Examples
//!
//! ```
//! use pen_router::traversal::Traversal;
//! use std::convert::Infallible;
//!
//! struct Node {
//!     name: &'static str,
//!     children: Vec<Node>,
//! }
//!
//! let tree = Node {
//!     name: "a",
//!     children: vec![
//!         Node { name: "b", children: vec![Node { name: "d", children: vec![] }] },
//!         Node { name: "c", children: vec![] },
//!     ],
//! };
//!
//! let mut order: Vec<&str> = Vec::new();
//! let mut walk = Traversal::<&Node, Vec<&str>, Infallible>::new(|_, node| {
//!     Ok(Some(node.children.iter().collect()))
//! })
//! .visit(|order, node| {
//!     order.push(node.name);
//!     Ok(())
//! });
//!
//! walk.depth_first(&tree, &mut order).unwrap();
//! assert_eq!(order, vec!["a", "b", "d", "c"]);
//! ```

use std::collections::VecDeque;
use std::convert::Infallible;

type ExpandFn<'a, N, C, E> = Box<dyn FnMut(&mut C, &N) -> Result<Option<Vec<N>>, E> + 'a>;
type VisitFn<'a, N, C, E> = Box<dyn FnMut(&mut C, &N) -> Result<(), E> + 'a>;
type AttachFn<'a, N, C> = Box<dyn FnMut(&mut C, &N, &N) + 'a>;
type DescendFn<'a, N, C> = Box<dyn FnMut(&C, &N) -> bool + 'a>;

/// Callback set for a depth-first or breadth-first walk
pub struct Traversal<'a, N, C, E = Infallible> {
    expand: ExpandFn<'a, N, C, E>,
    visit: Option<VisitFn<'a, N, C, E>>,
    attach: Option<AttachFn<'a, N, C>>,
    should_descend: Option<DescendFn<'a, N, C>>,
}

impl<'a, N, C, E> Traversal<'a, N, C, E> {
    /// Creates a traversal that only expands nodes
    ///
    /// `expand` returns the children of a node, or `None` for a leaf.
    pub fn new<F>(expand: F) -> Self
    where
        F: FnMut(&mut C, &N) -> Result<Option<Vec<N>>, E> + 'a,
    {
        Self {
            expand: Box::new(expand),
            visit: None,
            attach: None,
            should_descend: None,
        }
    }

    /// Inspects each node before it is expanded
    pub fn visit<F>(mut self, visit: F) -> Self
    where
        F: FnMut(&mut C, &N) -> Result<(), E> + 'a,
    {
        self.visit = Some(Box::new(visit));
        self
    }

    /// Links each child to its parent, called as `attach(ctx, child, parent)`
    pub fn attach<F>(mut self, attach: F) -> Self
    where
        F: FnMut(&mut C, &N, &N) + 'a,
    {
        self.attach = Some(Box::new(attach));
        self
    }

    /// Gates descent into a child; children are attached either way
    pub fn should_descend<F>(mut self, should_descend: F) -> Self
    where
        F: FnMut(&C, &N) -> bool + 'a,
    {
        self.should_descend = Some(Box::new(should_descend));
        self
    }

    /// Walks the tree in preorder, going deep before wide
    ///
    /// Uses an explicit stack, so deep trees do not grow the call stack.
    /// Returns the root handle once every reachable node has been processed,
    /// or the first error a callback produced.
    pub fn depth_first(&mut self, root: N, ctx: &mut C) -> Result<N, E>
    where
        N: Clone,
    {
        let mut stack = vec![root.clone()];

        while let Some(node) = stack.pop() {
            let children = self.process(ctx, &node)?;

            // Reverse so the first child is popped first
            stack.extend(children.into_iter().rev());
        }

        Ok(root)
    }

    /// Walks the tree level by level, processing all siblings before any children
    pub fn breadth_first(&mut self, root: N, ctx: &mut C) -> Result<N, E>
    where
        N: Clone,
    {
        let mut queue = VecDeque::from([root.clone()]);

        while let Some(node) = queue.pop_front() {
            let children = self.process(ctx, &node)?;
            queue.extend(children);
        }

        Ok(root)
    }

    /// Runs the callbacks for one node and returns the children to descend into
    fn process(&mut self, ctx: &mut C, node: &N) -> Result<Vec<N>, E> {
        if let Some(visit) = self.visit.as_mut() {
            visit(ctx, node)?;
        }

        let Some(children) = (self.expand)(ctx, node)? else {
            return Ok(Vec::new());
        };

        let mut descend = Vec::with_capacity(children.len());
        for child in children {
            if let Some(attach) = self.attach.as_mut() {
                attach(ctx, &child, node);
            }

            let allowed = match self.should_descend.as_mut() {
                Some(should_descend) => should_descend(ctx, &child),
                None => true,
            };
            if allowed {
                descend.push(child);
            }
        }

        Ok(descend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Adjacency-list tree: node i has children `edges[i]`
    struct Graph {
        edges: Vec<Vec<usize>>,
        log: Vec<String>,
    }

    impl Graph {
        //        0
        //      / | \
        //     1  2  3
        //    / \     \
        //   4   5     6
        fn sample() -> Self {
            Self {
                edges: vec![vec![1, 2, 3], vec![4, 5], vec![], vec![6], vec![], vec![], vec![]],
                log: Vec::new(),
            }
        }
    }

    fn logging_walk<'a>() -> Traversal<'a, usize, Graph> {
        Traversal::new(|graph: &mut Graph, node: &usize| {
            graph.log.push(format!("expand {node}"));
            let children = graph.edges[*node].clone();
            Ok(if children.is_empty() { None } else { Some(children) })
        })
        .visit(|graph: &mut Graph, node: &usize| {
            graph.log.push(format!("visit {node}"));
            Ok(())
        })
        .attach(|graph: &mut Graph, child: &usize, parent: &usize| {
            graph.log.push(format!("attach {child}->{parent}"));
        })
    }

    fn visited(log: &[String]) -> Vec<usize> {
        log.iter()
            .filter_map(|line| line.strip_prefix("visit "))
            .map(|n| n.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_depth_first_is_preorder() {
        let mut graph = Graph::sample();
        let root = logging_walk().depth_first(0, &mut graph).unwrap();

        assert_eq!(root, 0);
        assert_eq!(visited(&graph.log), vec![0, 1, 4, 5, 2, 3, 6]);
    }

    #[test]
    fn test_breadth_first_is_level_order() {
        let mut graph = Graph::sample();
        logging_walk().breadth_first(0, &mut graph).unwrap();

        assert_eq!(visited(&graph.log), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_visit_precedes_expand_and_attach() {
        let mut graph = Graph::sample();
        logging_walk().depth_first(0, &mut graph).unwrap();

        assert_eq!(
            &graph.log[..5],
            &["visit 0", "expand 0", "attach 1->0", "attach 2->0", "attach 3->0"]
        );
    }

    #[test]
    fn test_filtered_children_are_attached_but_not_visited() {
        let mut graph = Graph::sample();
        let mut walk = logging_walk().should_descend(|_: &Graph, child: &usize| *child != 1);
        walk.depth_first(0, &mut graph).unwrap();

        assert!(graph.log.contains(&"attach 1->0".to_string()));
        assert_eq!(visited(&graph.log), vec![0, 2, 3, 6]);
    }

    #[test]
    fn test_first_error_stops_the_walk() {
        let mut seen = Vec::new();
        let mut walk = Traversal::<u32, Vec<u32>, String>::new(|_, node| {
            Ok(if *node < 5 { Some(vec![node + 1]) } else { None })
        })
        .visit(|seen, node| {
            seen.push(*node);
            if *node == 3 {
                Err(format!("stopped at {node}"))
            } else {
                Ok(())
            }
        });

        let err = walk.depth_first(0, &mut seen).unwrap_err();
        assert_eq!(err, "stopped at 3");
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_expand_only_walk_returns_root() {
        let mut count = 0usize;
        let mut walk = Traversal::<u8, usize, Infallible>::new(|count, node| {
            *count += 1;
            Ok((*node == 0).then(|| vec![1, 2]))
        });

        assert_eq!(walk.breadth_first(0, &mut count).unwrap(), 0);
        assert_eq!(count, 3);
    }
}
