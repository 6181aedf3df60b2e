use std::collections::HashMap;

use tracing::{trace, warn};

/// A directed `source -> target` edge of a dependency graph dump.
pub trait GraphEdge {
    fn source(&self) -> &str;
    fn target(&self) -> &str;

    /// Whether the closure may follow this edge at all.
    fn is_followed(&self) -> bool {
        true
    }
}

/// Collect every edge reachable from `root`, depth first, in discovery order.
///
/// Each target is reported at most once per call, so cyclic graphs terminate.
/// Direct dependencies sit at depth 0; with `max_depth = Some(n)` exactly the
/// nodes within `n` hops of `root` are collected. A node first reached at the
/// limit is explored again if a shorter path to it turns up later.
///
/// Uses an explicit stack of `(node, cursor, depth)` frames instead of
/// recursion. The cursor resumes the scan of `edges` where the frame left off,
/// which reproduces the order of a recursive walk exactly.
pub fn transitive_closure<'a, E: GraphEdge>(
    edges: &'a [E],
    root: &'a str,
    max_depth: Option<usize>,
) -> Vec<&'a E> {
    let mut found = Vec::new();
    if max_depth == Some(0) {
        return found;
    }

    // Shallowest depth each node has been reached at.
    let mut shallowest: HashMap<&'a str, usize> = HashMap::from([(root, 0)]);
    let mut stack: Vec<(&'a str, usize, usize)> = vec![(root, 0, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, cursor, depth) = *frame;
        let child_depth = depth + 1;

        let next = edges[cursor..].iter().enumerate().find(|(_, edge)| {
            edge.is_followed()
                && edge.source() == node
                && match shallowest.get(edge.target()) {
                    None => true,
                    Some(&seen) => max_depth.is_some() && child_depth < seen,
                }
        });

        let Some((offset, edge)) = next else {
            stack.pop();
            continue;
        };

        frame.1 = cursor + offset + 1;
        if shallowest.insert(edge.target(), child_depth).is_none() {
            found.push(edge);
            trace!(source = node, target = edge.target(), depth = child_depth, "closure edge");
        }

        match max_depth {
            Some(limit) if child_depth >= limit => {
                if edges.iter().any(|e| e.is_followed() && e.source() == edge.target()) {
                    warn!(
                        node = edge.target(),
                        limit, "depth limit reached, closure truncated"
                    );
                }
            }
            _ => stack.push((edge.target(), 0, child_depth)),
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Edge(&'static str, &'static str, bool);

    impl GraphEdge for Edge {
        fn source(&self) -> &str {
            self.0
        }
        fn target(&self) -> &str {
            self.1
        }
        fn is_followed(&self) -> bool {
            self.2
        }
    }

    fn targets(found: Vec<&Edge>) -> Vec<&'static str> {
        found.into_iter().map(|e| e.1).collect()
    }

    #[test]
    fn test_depth_first_discovery_order() {
        let edges = [
            Edge("a", "b", true),
            Edge("a", "c", true),
            Edge("b", "d", true),
            Edge("c", "e", true),
        ];
        assert_eq!(targets(transitive_closure(&edges, "a", None)), vec!["b", "d", "c", "e"]);
    }

    #[test]
    fn test_shared_target_reported_once() {
        let edges = [
            Edge("a", "b", true),
            Edge("a", "c", true),
            Edge("b", "d", true),
            Edge("c", "d", true),
        ];
        assert_eq!(targets(transitive_closure(&edges, "a", None)), vec!["b", "d", "c"]);
    }

    #[test]
    fn test_cycle_terminates() {
        let edges = [
            Edge("a", "b", true),
            Edge("b", "c", true),
            Edge("c", "a", true),
            Edge("c", "b", true),
        ];
        assert_eq!(targets(transitive_closure(&edges, "a", None)), vec!["b", "c"]);
    }

    #[test]
    fn test_unfollowed_edges_are_skipped() {
        let edges = [Edge("a", "b", false), Edge("a", "c", true), Edge("b", "d", true)];
        assert_eq!(targets(transitive_closure(&edges, "a", None)), vec!["c"]);
    }

    #[test]
    fn test_max_depth_limits_collection() {
        let edges = [
            Edge("a", "b", true),
            Edge("b", "c", true),
            Edge("c", "d", true),
        ];
        assert!(transitive_closure(&edges, "a", Some(0)).is_empty());
        assert_eq!(targets(transitive_closure(&edges, "a", Some(1))), vec!["b"]);
        assert_eq!(targets(transitive_closure(&edges, "a", Some(2))), vec!["b", "c"]);
        assert_eq!(targets(transitive_closure(&edges, "a", None)), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_shorter_path_reopens_node_cut_at_limit() {
        let edges = [
            Edge("r", "x", true),
            Edge("x", "y", true),
            Edge("r", "y", true),
            Edge("y", "z", true),
        ];
        assert_eq!(targets(transitive_closure(&edges, "r", Some(2))), vec!["x", "y", "z"]);
        assert_eq!(targets(transitive_closure(&edges, "r", Some(1))), vec!["x", "y"]);
        assert_eq!(targets(transitive_closure(&edges, "r", None)), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_reopened_node_reported_once() {
        let edges = [
            Edge("r", "a", true),
            Edge("a", "b", true),
            Edge("b", "c", true),
            Edge("r", "b", true),
            Edge("c", "d", true),
            Edge("d", "b", true),
        ];
        assert_eq!(
            targets(transitive_closure(&edges, "r", Some(3))),
            vec!["a", "b", "c", "d"]
        );
    }
}
