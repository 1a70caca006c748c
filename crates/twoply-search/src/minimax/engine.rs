// Copyright © TwoPly Contributors 2026

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at

//    https://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::atomic::{AtomicBool, Ordering};

use twoply_core::rule::evaluate_for_side;
use twoply_core::{Evaluator, Player, Rule};

use crate::reorder::Reorder;

use super::recursion::RecursionPolicy;
use super::root_chooser::RootChooser;
use super::vertex::Vertex;

/// Same game-theoretic result as [crate::negamax::Negamax], but records the
/// whole explored tree as a flat vector of [Vertex] values, uses a pluggable
/// [RecursionPolicy] instead of a fixed depth bound, and defers the choice
/// of which root move to actually play to a pluggable [RootChooser].
pub struct Minimax<R: Rule, O: Reorder<R>, E: Evaluator<R>, P: RecursionPolicy> {
    rule: R,
    reorder: O,
    evaluator: E,
    policy: P,
    moves: Vec<R::Move>,
    vertices: Vec<Vertex<R::Move>>,
    node_count: u64,
}

impl<R: Rule, O: Reorder<R>, E: Evaluator<R>, P: RecursionPolicy> Minimax<R, O, E, P> {
    pub fn new(rule: R, reorder: O, evaluator: E, policy: P) -> Self {
        Self { rule, reorder, evaluator, policy, moves: Vec::new(), vertices: Vec::new(), node_count: 0 }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn rule_mut(&mut self) -> &mut R {
        &mut self.rule
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// The recorded tree from the most recent search, in preorder. Index 0
    /// is always the root.
    pub fn vertices(&self) -> &[Vertex<R::Move>] {
        &self.vertices
    }

    /// Runs the search from the current rule state, recording a tree rooted
    /// at `vertices()[0]`. Returns the root's value from `side`'s
    /// perspective.
    pub fn search(&mut self, initial_depth: usize, side: Player, cancel: &AtomicBool) -> f64 {
        self.node_count = 0;
        self.moves.clear();
        self.vertices.clear();
        self.vertices.push(Vertex::new(None));
        self.rec(0, initial_depth, f64::NEG_INFINITY, f64::INFINITY, side, cancel)
    }

    /// Asks `chooser` to pick among the root's immediate children and
    /// returns the corresponding move, or `None` if the root has no
    /// recorded children (no legal moves from the initial state).
    ///
    /// The children are presented front-first-is-best, mirroring the
    /// negamax engine's move-buffer front-swap: alpha-beta has already
    /// determined `vertices()[0].best_move`, so that child is moved to the
    /// front of the slice handed to `chooser` before it ever sees the list.
    pub fn root_move(&self, chooser: &mut dyn RootChooser<R::Move>) -> Option<R::Move> {
        let child_indices = self.children_of(0);
        if child_indices.is_empty() {
            return None;
        }
        let mut child_vertices: Vec<Vertex<R::Move>> = child_indices.iter().map(|&i| self.vertices[i]).collect();
        if let Some(best) = self.vertices[0].best_move {
            if let Some(pos) = child_vertices.iter().position(|v| v.mv == Some(best)) {
                child_vertices.swap(0, pos);
            }
        }
        let chosen = chooser.choose(&child_vertices);
        child_vertices[chosen].mv
    }

    /// Reconstructs the indices of `vertex_idx`'s immediate children.
    ///
    /// Vertices are recorded depth-first, preorder, with only a
    /// `child_count` per node (no stored child indices) — the same
    /// representation a flat, externally-walked recorded tree uses. The
    /// indices are recovered the way any preorder-plus-arity encoding is
    /// deserialized: walk forward from `vertex_idx + 1`, and after reading
    /// each child, skip over that child's own subtree (recursively) before
    /// reading the next sibling.
    fn children_of(&self, vertex_idx: usize) -> Vec<usize> {
        let mut indices = Vec::with_capacity(self.vertices[vertex_idx].child_count);
        let mut cursor = vertex_idx + 1;
        for _ in 0..self.vertices[vertex_idx].child_count {
            indices.push(cursor);
            cursor = self.skip_subtree(cursor);
        }
        indices
    }

    fn skip_subtree(&self, vertex_idx: usize) -> usize {
        let mut cursor = vertex_idx + 1;
        for _ in 0..self.vertices[vertex_idx].child_count {
            cursor = self.skip_subtree(cursor);
        }
        cursor
    }

    fn rec(
        &mut self,
        vertex_idx: usize,
        depth_remaining: usize,
        alpha: f64,
        beta: f64,
        side: Player,
        cancel: &AtomicBool,
    ) -> f64 {
        self.node_count += 1;
        if cancel.load(Ordering::Acquire) {
            return 0.0;
        }

        let winner = self.rule.winner();
        if winner != Player::None {
            let value = side.sign() * winner.sign() * f64::INFINITY;
            self.vertices[vertex_idx].value = value;
            return value;
        }

        let prev_size = self.moves.len();
        self.rule.generate_moves(&mut self.moves);
        let new_size = self.moves.len();
        if new_size == prev_size {
            self.vertices[vertex_idx].value = 0.0;
            return 0.0;
        }

        if self.policy.should_terminate(depth_remaining, self.vertices.len()) {
            self.moves.truncate(new_size);
            let value = evaluate_for_side(&self.evaluator, &self.rule, side);
            self.vertices[vertex_idx].value = value;
            return value;
        }

        self.reorder.reorder(&mut self.rule, side, &mut self.moves[prev_size..new_size]);

        let child_depth = self.policy.child_depth(depth_remaining);
        let mut value = f64::NEG_INFINITY;
        let mut best_move = None;
        let mut alpha = alpha;
        let mut child_count = 0usize;
        for i in prev_size..new_size {
            let mv = self.moves[i];
            let child_idx = self.vertices.len();
            self.vertices.push(Vertex::new(Some(mv)));
            child_count += 1;

            self.rule.apply_move(mv, side);
            let new_value = -self.rec(child_idx, child_depth, -beta, -alpha, -side, cancel);
            self.rule.undo_move(mv, side);
            self.moves.truncate(new_size);

            // Overwrite the child's self-recorded value (in its own
            // side-to-move's perspective) with the negated value from the
            // perspective of whoever is choosing among these children —
            // `side`, the parent. `RootChooser`/visualisation compare
            // sibling values directly, so they must share one perspective.
            self.vertices[child_idx].value = new_value;

            if new_value > value {
                value = new_value;
                best_move = Some(mv);
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        self.vertices[vertex_idx].value = value;
        self.vertices[vertex_idx].child_count = child_count;
        self.vertices[vertex_idx].best_move = best_move;
        value
    }
}
