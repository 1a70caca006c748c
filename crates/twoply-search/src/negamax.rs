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

/// Tunable knobs for a negamax search, decoupled from any particular
/// `Reorder`/`Evaluator` pair so a caller can construct one independent of
/// the engine's type parameters (e.g. from parsed CLI arguments).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegamaxConfig {
    pub depth: usize,
}

impl Default for NegamaxConfig {
    /// Depth 7, the midpoint of the recommended `[1, 15]` range.
    fn default() -> Self {
        Self { depth: 7 }
    }
}

/// Depth-bounded alpha-beta search in negamax form, with externally
/// pluggable move reordering and cooperative cancellation.
///
/// Owns the rule state it searches and a single reusable move buffer, so a
/// whole search tree is explored without per-level allocation: moves are
/// appended by `generate_moves` and truncated back after each child is
/// explored.
pub struct Negamax<R: Rule, O: Reorder<R>, E: Evaluator<R>> {
    rule: R,
    reorder: O,
    evaluator: E,
    moves: Vec<R::Move>,
    node_count: u64,
}

impl<R: Rule, O: Reorder<R>, E: Evaluator<R>> Negamax<R, O, E> {
    pub fn new(rule: R, reorder: O, evaluator: E) -> Self {
        Self { rule, reorder, evaluator, moves: Vec::new(), node_count: 0 }
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

    /// Explores the tree to at most `depth` plies from the current rule
    /// state. Returns the negamax value from `side`'s perspective and
    /// leaves the chosen move at the front of the internal move buffer
    /// (retrievable via [Negamax::best_move]).
    pub fn search(&mut self, depth: usize, side: Player, cancel: &AtomicBool) -> f64 {
        self.node_count = 0;
        self.moves.clear();
        self.rec(depth, f64::NEG_INFINITY, f64::INFINITY, side, cancel)
    }

    /// The move the most recent [Negamax::search] selected at the root, if
    /// any legal move existed.
    pub fn best_move(&self) -> Option<R::Move> {
        self.moves.first().copied()
    }

    fn rec(&mut self, depth: usize, alpha: f64, beta: f64, side: Player, cancel: &AtomicBool) -> f64 {
        self.node_count += 1;
        if cancel.load(Ordering::Acquire) {
            return 0.0;
        }

        let winner = self.rule.winner();
        if winner != Player::None {
            return side.sign() * winner.sign() * f64::INFINITY;
        }

        let prev_size = self.moves.len();
        self.rule.generate_moves(&mut self.moves);
        let new_size = self.moves.len();
        if new_size == prev_size {
            return 0.0;
        }

        if depth == 0 {
            self.moves.truncate(new_size);
            return evaluate_for_side(&self.evaluator, &self.rule, side);
        }

        self.reorder.reorder(&mut self.rule, side, &mut self.moves[prev_size..new_size]);

        let mut value = f64::NEG_INFINITY;
        let mut best = prev_size;
        let mut alpha = alpha;
        for i in prev_size..new_size {
            let mv = self.moves[i];
            self.rule.apply_move(mv, side);
            let new_value = -self.rec(depth - 1, -beta, -alpha, -side, cancel);
            self.rule.undo_move(mv, side);
            self.moves.truncate(new_size);

            if new_value > value {
                value = new_value;
                best = i;
            }
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }

        self.moves.swap(prev_size, best);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reorder::Shuffle;
    use twoply_testkit::tic_tac_toe::TicTacToe;

    fn engine(rule: TicTacToe) -> Negamax<TicTacToe, Shuffle, fn(&TicTacToe, Player) -> f64> {
        Negamax::new(rule, Shuffle::from_seed(1), TicTacToe::trivial_estimate)
    }

    #[test]
    fn default_config_is_depth_seven() {
        assert_eq!(NegamaxConfig::default(), NegamaxConfig { depth: 7 });
    }

    #[test]
    fn immediate_win_detection() {
        let mut rule = TicTacToe::new();
        for mv in [0u8, 3, 1, 4] {
            let side = rule.side_to_move();
            rule.apply_move(mv, side);
        }
        let mut negamax = engine(rule);
        let cancel = AtomicBool::new(false);
        let value = negamax.search(1, Player::P1, &cancel);
        assert_eq!(value, f64::INFINITY);
        assert_eq!(negamax.best_move(), Some(2));
    }

    #[test]
    fn block_forced_loss() {
        let mut rule = TicTacToe::new();
        rule.apply_move(0, Player::P2);
        rule.apply_move(4, Player::P1);
        rule.apply_move(1, Player::P2);
        let mut negamax = engine(rule);
        let cancel = AtomicBool::new(false);
        negamax.search(2, Player::P1, &cancel);
        assert_eq!(negamax.best_move(), Some(2));
    }

    #[test]
    fn terminal_value_matches_win_score_regardless_of_depth() {
        let mut rule = TicTacToe::new();
        for mv in [0u8, 3, 1, 4, 2] {
            let side = rule.side_to_move();
            rule.apply_move(mv, side);
        }
        assert_eq!(rule.winner(), Player::P1);
        for depth in 0..4 {
            let mut negamax = engine(rule.clone());
            let cancel = AtomicBool::new(false);
            assert_eq!(negamax.search(depth, Player::P1, &cancel), f64::INFINITY);
            let mut negamax2 = engine(rule.clone());
            assert_eq!(negamax2.search(depth, Player::P2, &cancel), f64::NEG_INFINITY);
        }
    }

    #[test]
    fn cancellation_returns_immediately() {
        let mut negamax = engine(TicTacToe::new());
        let cancel = AtomicBool::new(true);
        let value = negamax.search(5, Player::P1, &cancel);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn negamax_value_is_antisymmetric_between_sides() {
        let rule = TicTacToe::new();
        let cancel = AtomicBool::new(false);
        for depth in 0..3 {
            let mut for_p1 = engine(rule.clone());
            let v1 = for_p1.search(depth, Player::P1, &cancel);
            let mut for_p2 = engine(rule.clone());
            let v2 = for_p2.search(depth, Player::P2, &cancel);
            assert_eq!(v1, -v2);
        }
    }
}
