//! Arena-allocated search tree.
//!
//! Using a Vec of nodes with indices provides better cache locality
//! and simpler ownership compared to Rc<RefCell<Node>>. Parent links are
//! plain indices, so walking upward during backup never touches ownership.

use std::collections::VecDeque;
use std::fmt;

use drafter_core::Game;
use rand::Rng;

use crate::node::{NodeId, SearchNode};
use crate::stats::{Statistics, Totals};
use crate::{Result, SearchError};

/// A child of the root as shown to a human drafter.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation<A> {
    pub node: NodeId,
    pub action: A,
    pub mean_reward: f64,
    pub visits: u32,
}

/// Summary counters for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub max_depth: usize,
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} root visits, depth {}",
            self.total_nodes, self.root_visits, self.max_depth
        )
    }
}

/// Search tree over game `G` with per-node statistics slot `T`.
///
/// The root always lives at [`NodeId::ROOT`].
pub struct SearchTree<G: Game, T> {
    nodes: Vec<SearchNode<G, T>>,
}

impl<G: Game, T: Default> SearchTree<G, T> {
    /// Create a tree holding only a root for `state`.
    pub fn new(game: &G, state: G::State) -> Self {
        Self {
            nodes: vec![SearchNode::new(game, state, None, None)],
        }
    }

    /// Expand one untried action of `id`, chosen uniformly at random.
    ///
    /// # Errors
    /// `InternalInvariant` if every action already has a child, or if the
    /// game rejects an action taken from the node's own untried list.
    pub fn expand<R: Rng>(&mut self, game: &G, id: NodeId, rng: &mut R) -> Result<NodeId> {
        let node = self.get(id);
        if node.untried.is_empty() {
            return Err(SearchError::InternalInvariant(format!(
                "expand called on {} with no untried actions",
                id
            )));
        }
        let index = rng.gen_range(0..node.untried.len());
        let state = game.apply(&node.state, &node.untried[index]).map_err(|err| {
            SearchError::InternalInvariant(format!(
                "untried action of {} was rejected by the game: {}",
                id, err
            ))
        })?;

        let action = self.nodes[id.0].untried.swap_remove(index);
        let child = NodeId(self.nodes.len());
        self.nodes
            .push(SearchNode::new(game, state, Some(id), Some(action)));
        self.nodes[id.0].children.push(child);
        Ok(child)
    }

    /// Re-root the tree at `id`, dropping everything outside its subtree.
    ///
    /// Node ids are renumbered; the promoted node becomes [`NodeId::ROOT`]
    /// with no parent and no incoming action. Statistics are kept.
    ///
    /// # Panics
    /// Panics if the id does not belong to this tree.
    pub fn promote(self, id: NodeId) -> Self {
        if id == NodeId::ROOT {
            return self;
        }

        // Breadth-first from the new root gives every kept node its new index
        let mut remap: Vec<Option<usize>> = vec![None; self.nodes.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            remap[current.0] = Some(order.len());
            order.push(current);
            queue.extend(self.nodes[current.0].children.iter().copied());
        }

        let mut slots: Vec<Option<SearchNode<G, T>>> = self.nodes.into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for old in order {
            let Some(mut node) = slots[old.0].take() else {
                continue;
            };
            node.parent = node.parent.and_then(|p| remap[p.0]).map(NodeId);
            for child in node.children.iter_mut() {
                // Children are always inside the kept subtree
                if let Some(new) = remap[child.0] {
                    *child = NodeId(new);
                }
            }
            nodes.push(node);
        }
        nodes[0].parent = None;
        nodes[0].action = None;
        Self { nodes }
    }

    /// Commit to a real `action` at the root.
    ///
    /// Reuses the matching child's subtree if it was expanded, otherwise
    /// starts a fresh root from the successor state.
    ///
    /// # Errors
    /// `InvalidAction` if `action` is not legal at the root.
    pub fn advance(self, game: &G, action: &G::Action) -> Result<Self> {
        let existing = self
            .root()
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].action.as_ref() == Some(action));
        match existing {
            Some(child) => Ok(self.promote(child)),
            None => {
                let state = game.apply(&self.root().state, action)?;
                Ok(Self::new(game, state))
            }
        }
    }
}

impl<G: Game, T> SearchTree<G, T> {
    pub fn root(&self) -> &SearchNode<G, T> {
        self.get(NodeId::ROOT)
    }

    /// Get a node by id.
    ///
    /// # Panics
    /// Panics if the id does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &SearchNode<G, T> {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; the root always exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Undo the most recent [`expand`](Self::expand).
    ///
    /// The child is removed and its action returned to the parent's
    /// untried list, leaving the tree as it was before expansion.
    ///
    /// # Errors
    /// `InternalInvariant` if `child` is not the last node added.
    pub fn retract(&mut self, child: NodeId) -> Result<()> {
        if child == NodeId::ROOT || child.0 + 1 != self.nodes.len() {
            return Err(SearchError::InternalInvariant(format!(
                "cannot retract {}: not the most recent expansion",
                child
            )));
        }
        let last_visited = self.nodes[child.0].visit_count;
        if last_visited != 0 {
            return Err(SearchError::InternalInvariant(format!(
                "cannot retract {}: already backed up",
                child
            )));
        }
        let node = self.nodes.pop().ok_or_else(|| {
            SearchError::InternalInvariant("retract on an empty tree".to_string())
        })?;
        if let (Some(parent), Some(action)) = (node.parent, node.action) {
            let parent = &mut self.nodes[parent.0];
            parent.children.retain(|&c| c != child);
            parent.untried.push(action);
        }
        Ok(())
    }

    /// Propagate `reward` from `leaf` up to the root.
    ///
    /// `reward` is from the point of view of the side that moved into
    /// `leaf`; it is flipped to `1 - reward` at each level.
    pub fn backup<S>(&mut self, game: &G, stats: &mut S, leaf: NodeId, reward: f64)
    where
        S: Statistics<G::Key, Slot = T>,
    {
        let mut reward = reward;
        let mut current = Some(leaf);
        while let Some(id) = current {
            let SearchNode {
                state,
                parent,
                visit_count,
                slot,
                ..
            } = &mut self.nodes[id.0];
            *visit_count += 1;
            stats.record(slot, game.position_key(state), reward);
            reward = 1.0 - reward;
            current = *parent;
        }
    }

    /// Visit count and reward sum used for `id`'s value term.
    pub fn totals<S>(&self, game: &G, stats: &S, id: NodeId) -> Option<Totals>
    where
        S: Statistics<G::Key, Slot = T>,
    {
        let node = self.get(id);
        stats.totals(&node.slot, game.position_key(&node.state), node.visit_count)
    }

    /// Mean backed-up reward of `id`, or `None` before its first visit.
    pub fn mean_reward<S>(&self, game: &G, stats: &S, id: NodeId) -> Option<f64>
    where
        S: Statistics<G::Key, Slot = T>,
    {
        self.totals(game, stats, id).and_then(|t| t.mean())
    }

    /// UCB1 selection among the children of `id`.
    ///
    /// Maximizes `mean + cp * sqrt(ln(N) / n)` where `N` is `id`'s visit
    /// count and `n` the child's. The first maximum in child order wins.
    ///
    /// # Errors
    /// `InternalInvariant` if `id` has no children or has not been visited,
    /// or if a child has no visits or no statistics.
    pub fn best_child<S>(&self, game: &G, id: NodeId, cp: f64, stats: &S) -> Result<NodeId>
    where
        S: Statistics<G::Key, Slot = T>,
    {
        let node = self.get(id);
        if node.children.is_empty() {
            return Err(SearchError::InternalInvariant(format!(
                "best_child called on {} with no children",
                id
            )));
        }
        if node.visit_count == 0 {
            return Err(SearchError::InternalInvariant(format!(
                "best_child called on unvisited {}",
                id
            )));
        }

        let log_visits = (node.visit_count as f64).ln();
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &node.children {
            let child_visits = self.get(child).visit_count;
            let mean = self
                .totals(game, stats, child)
                .and_then(|t| t.mean())
                .filter(|_| child_visits > 0)
                .ok_or_else(|| {
                    SearchError::InternalInvariant(format!(
                        "child {} of {} has no statistics",
                        child, id
                    ))
                })?;
            let score = mean + cp * (log_visits / child_visits as f64).sqrt();
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((child, score)),
            }
        }
        best.map(|(child, _)| child).ok_or_else(|| {
            SearchError::InternalInvariant(format!("no child of {} could be scored", id))
        })
    }

    /// Root children sorted by mean reward, best first.
    ///
    /// Unvisited children are skipped; ties keep child order.
    pub fn recommendations<S>(&self, game: &G, stats: &S) -> Vec<Recommendation<G::Action>>
    where
        S: Statistics<G::Key, Slot = T>,
    {
        let mut out: Vec<Recommendation<G::Action>> = self
            .root()
            .children
            .iter()
            .filter_map(|&child| {
                let node = self.get(child);
                let mean_reward = self.mean_reward(game, stats, child)?;
                let action = node.action.clone()?;
                Some(Recommendation {
                    node: child,
                    action,
                    mean_reward,
                    visits: node.visit_count,
                })
            })
            .collect();
        out.sort_by(|a, b| b.mean_reward.total_cmp(&a.mean_reward));
        out
    }

    /// Node count, root visits and deepest level reached.
    pub fn stats(&self) -> TreeStats {
        let mut depth = vec![0usize; self.nodes.len()];
        let mut max_depth = 0;
        // Children are always pushed after their parent, so a forward pass works
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                depth[index] = depth[parent.0] + 1;
                max_depth = max_depth.max(depth[index]);
            }
        }
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: self.root().visit_count,
            max_depth,
        }
    }
}
