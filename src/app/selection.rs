use log::debug;
use thiserror::Error;

use crate::geo::{Graph, Node, NodeId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Empty,
    FirstPicked {
        first: NodeId,
    },
    BothPicked {
        first: NodeId,
        second: NodeId,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("two nodes must be picked first")]
    Incomplete,
    #[error("picked node {0} is not in the graph")]
    NotFound(NodeId),
}

/// Two-slot pick protocol feeding the distance calculation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Feeds one pick into the state machine, returns whether it changed.
    pub fn pick(&mut self, node: NodeId) -> bool {
        let next = match self.state {
            SelectionState::Empty => SelectionState::FirstPicked { first: node },
            SelectionState::FirstPicked { first } if first == node => return false,
            SelectionState::FirstPicked { first } => SelectionState::BothPicked {
                first,
                second: node,
            },
            SelectionState::BothPicked { .. } => SelectionState::FirstPicked { first: node },
        };

        debug!("selection {:?} -> {:?}", self.state, next);
        self.state = next;
        true
    }

    pub fn clear(&mut self) {
        self.state = SelectionState::Empty;
    }

    pub fn first(&self) -> Option<NodeId> {
        match self.state {
            SelectionState::Empty => None,
            SelectionState::FirstPicked { first } | SelectionState::BothPicked { first, .. } => {
                Some(first)
            }
        }
    }

    pub fn second(&self) -> Option<NodeId> {
        match self.state {
            SelectionState::BothPicked { second, .. } => Some(second),
            _ => None,
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.first() == Some(node) || self.second() == Some(node)
    }

    pub fn pair(&self) -> Option<(NodeId, NodeId)> {
        match self.state {
            SelectionState::BothPicked { first, second } => Some((first, second)),
            _ => None,
        }
    }

    pub fn current_pair<'g>(&self, graph: &'g Graph) -> Result<(&'g Node, &'g Node), SelectionError> {
        let (first, second) = self.pair().ok_or(SelectionError::Incomplete)?;
        let first = graph
            .node_by_id(first)
            .map_err(|_| SelectionError::NotFound(first))?;
        let second = graph
            .node_by_id(second)
            .map_err(|_| SelectionError::NotFound(second))?;
        Ok((first, second))
    }
}
