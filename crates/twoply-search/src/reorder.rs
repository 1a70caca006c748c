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

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use twoply_core::{Evaluator, Player, Rule};

/// Permutes a candidate-move range in place, given the state it was
/// generated from and the side about to choose among them.
pub trait Reorder<R: Rule> {
    fn reorder(&mut self, rule: &mut R, side: Player, moves: &mut [R::Move]);
}

/// Uniform random permutation using a persistent PRNG.
///
/// Seeded non-deterministically by default ([Shuffle::new]); [Shuffle::from_seed]
/// is exposed so tests can reproduce a particular ordering.
pub struct Shuffle {
    rng: StdRng,
}

impl Shuffle {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for Shuffle {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rule> Reorder<R> for Shuffle {
    fn reorder(&mut self, _rule: &mut R, _side: Player, moves: &mut [R::Move]) {
        moves.shuffle(&mut self.rng);
    }
}

/// Shuffles first (to tie-break), then scores every move by applying it,
/// calling the evaluator, and undoing it, and sorts descending for `P1` or
/// ascending for `P2`. Leaves the rule state exactly as found.
pub struct ReorderByScore<E> {
    shuffle: Shuffle,
    evaluator: E,
}

impl<E> ReorderByScore<E> {
    pub fn new(evaluator: E) -> Self {
        Self { shuffle: Shuffle::new(), evaluator }
    }

    pub fn with_seed(evaluator: E, seed: u64) -> Self {
        Self { shuffle: Shuffle::from_seed(seed), evaluator }
    }
}

impl<R: Rule, E: Evaluator<R>> Reorder<R> for ReorderByScore<E> {
    fn reorder(&mut self, rule: &mut R, side: Player, moves: &mut [R::Move]) {
        self.shuffle.reorder(rule, side, moves);

        let mut scored: Vec<(R::Move, f64)> = moves
            .iter()
            .map(|&mv| {
                rule.apply_move(mv, side);
                let score = self.evaluator.eval(rule, side);
                rule.undo_move(mv, side);
                (mv, score)
            })
            .collect();

        if side == Player::P1 {
            scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        } else {
            scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        }

        for (slot, (mv, _)) in moves.iter_mut().zip(scored.into_iter()) {
            *slot = mv;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twoply_testkit::tic_tac_toe::TicTacToe;

    #[test]
    fn shuffle_preserves_multiset_of_moves() {
        let mut rule = TicTacToe::new();
        let mut moves = Vec::new();
        rule.generate_moves(&mut moves);
        let mut original = moves.clone();
        let mut shuffle = Shuffle::from_seed(7);
        shuffle.reorder(&mut rule, Player::P1, &mut moves);

        original.sort();
        let mut after = moves.clone();
        after.sort();
        assert_eq!(original, after);
    }

    #[test]
    fn reorder_by_score_preserves_multiset_and_state() {
        let mut rule = TicTacToe::new();
        rule.apply_move(0, Player::P1);
        let before = rule.clone();

        let mut moves = Vec::new();
        rule.generate_moves(&mut moves);
        let mut original = moves.clone();

        let mut reorder = ReorderByScore::with_seed(TicTacToe::trivial_estimate, 3);
        reorder.reorder(&mut rule, Player::P2, &mut moves);

        original.sort();
        let mut after = moves.clone();
        after.sort();
        assert_eq!(original, after);
        assert_eq!(rule.board(), before.board());
    }
}
