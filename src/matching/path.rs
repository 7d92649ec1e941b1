use anyhow::{Result, bail};

use crate::graph::NodeId;
use crate::matching::forest::{ForestState, NodeKind};

/// Alternating path from an outer node back to the root of its tree:
/// `v, mate(v), attach(mate(v)), mate(attach(mate(v))), ...` until a step stays put.
///
/// Fails when `start` is not outer or when the walk outgrows the node count;
/// both mean the forest state is corrupt.
pub fn trace_path(state: &ForestState, start: NodeId) -> Result<Vec<NodeId>> {
    let kind = state.classify(start);
    if kind != NodeKind::Outer {
        bail!(
            "Cannot trace alternating path from node {} classified {:?}",
            start,
            kind
        );
    }

    let limit = state.len();
    let mut path = Vec::new();
    let mut current = start;
    let mut via_mate = true;
    loop {
        path.push(current);
        if path.len() > limit {
            bail!(
                "Alternating path from node {} exceeds {} nodes: {:?}",
                start,
                limit,
                path
            );
        }
        let next = if via_mate {
            state.mate(current)
        } else {
            state.attach(current)
        };
        if next == current {
            return Ok(path);
        }
        current = next;
        via_mate = !via_mate;
    }
}

/// First node of `path_y` that also lies on `path_x`.
pub fn first_common(path_x: &[NodeId], path_y: &[NodeId], node_count: usize) -> Option<NodeId> {
    let mut on_x = vec![false; node_count];
    for &node in path_x {
        on_x[node] = true;
    }
    path_y.iter().copied().find(|&node| on_x[node])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root 0 grows 1, whose partner 2 grows 3, whose partner is 4.
    fn two_level_tree() -> ForestState {
        let mut state = ForestState::new(6);
        state.pair(1, 2);
        state.pair(3, 4);
        state.attach[1] = 0;
        state.attach[3] = 2;
        state
    }

    #[test]
    fn exposed_root_is_its_own_path() {
        let state = two_level_tree();
        assert_eq!(trace_path(&state, 0).unwrap(), vec![0]);
        assert_eq!(trace_path(&state, 5).unwrap(), vec![5]);
    }

    #[test]
    fn path_alternates_back_to_root() {
        let state = two_level_tree();
        assert_eq!(trace_path(&state, 4).unwrap(), vec![4, 3, 2, 1, 0]);
        assert_eq!(trace_path(&state, 2).unwrap(), vec![2, 1, 0]);
    }

    #[test]
    fn tracing_inner_node_is_rejected() {
        let state = two_level_tree();
        assert!(trace_path(&state, 1).is_err());
        assert!(trace_path(&state, 3).is_err());
    }

    #[test]
    fn corrupted_cycle_is_detected() {
        let mut state = ForestState::new(4);
        state.pair(0, 1);
        state.pair(2, 3);
        // 1 hangs off 2 and 3 hangs off 0: the walk never reaches a root
        state.attach[1] = 2;
        state.attach[3] = 0;
        let err = trace_path(&state, 0).unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn first_common_scans_in_second_path_order() {
        assert_eq!(first_common(&[4, 3, 2, 1, 0], &[5, 2, 1, 0], 6), Some(2));
        assert_eq!(first_common(&[4, 3, 2], &[5, 1, 0], 6), None);
        assert_eq!(first_common(&[], &[0], 1), None);
    }
}
