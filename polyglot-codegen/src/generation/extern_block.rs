//! Grouping of consecutive functions into extern blocks.

use polyglot_ir::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Outside,
    Inside,
}

/// What the emitter must do before appending a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Open,
    Close,
    Stay,
}

/// Two-state machine that wraps contiguous runs of functions in one block.
///
/// A block opens on the first function after a non-function and closes on
/// the first non-function after a run. Only successfully rendered nodes are
/// fed in, so an omitted declaration never opens or closes a block.
#[derive(Debug, Clone, Default)]
pub struct ExternBlockTracker {
    state: BlockState,
}

impl ExternBlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BlockState {
        self.state
    }

    pub fn is_inside(&self) -> bool {
        self.state == BlockState::Inside
    }

    /// Advance with the kind of the next node.
    pub fn transition(&mut self, kind: NodeKind) -> Transition {
        match (self.state, kind == NodeKind::Function) {
            (BlockState::Outside, true) => {
                self.state = BlockState::Inside;
                Transition::Open
            }
            (BlockState::Inside, false) => {
                self.state = BlockState::Outside;
                Transition::Close
            }
            _ => Transition::Stay,
        }
    }

    /// Close an open block early. Returns whether one was open.
    pub fn close(&mut self) -> bool {
        std::mem::take(&mut self.state) == BlockState::Inside
    }

    /// End of input: whether a block is still open and must be closed.
    pub fn finish(mut self) -> bool {
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_sequence() {
        let mut tracker = ExternBlockTracker::new();
        let transitions: Vec<_> = [
            NodeKind::Enum,
            NodeKind::Function,
            NodeKind::Function,
            NodeKind::Class,
            NodeKind::Function,
        ]
        .into_iter()
        .map(|kind| tracker.transition(kind))
        .collect();

        assert_eq!(
            transitions,
            vec![
                Transition::Stay,
                Transition::Open,
                Transition::Stay,
                Transition::Close,
                Transition::Open,
            ]
        );
        assert!(tracker.finish());
    }

    #[test]
    fn test_finish_outside() {
        let mut tracker = ExternBlockTracker::new();
        tracker.transition(NodeKind::Enum);
        assert_eq!(tracker.state(), BlockState::Outside);
        assert!(!tracker.finish());
    }

    #[test]
    fn test_early_close_resets_state() {
        let mut tracker = ExternBlockTracker::new();
        tracker.transition(NodeKind::Function);
        assert!(tracker.close());
        assert!(!tracker.is_inside());
        assert_eq!(tracker.transition(NodeKind::Function), Transition::Open);
    }
}
