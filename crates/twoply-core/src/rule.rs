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

use crate::player::Player;

/// A mutable, cloneable two-player game position.
///
/// Implementors own their own board representation; the only contract the
/// search engines rely on is this trait. `generate_moves` appends to a
/// caller-owned buffer rather than allocating, so the engines can reuse one
/// buffer across an entire search.
///
/// # Invariants
/// - (I1) For any sequence `apply_move(m, p); undo_move(m, p)`, the rule's
///   observable state is unchanged.
/// - (I2) `generate_moves` may return no moves even when `winner()` is
///   `None` (a draw); engines must still treat `winner() != None` as
///   terminal regardless of what `generate_moves` would produce.
/// - (I3) `clone`, then mutating either the original or the clone, never
///   affects the other.
pub trait Rule: Clone {
    /// Opaque, copyable, equality-comparable move representation.
    type Move: Copy + Eq;

    /// Overwrites `self` with `other`'s state, without allocating a new
    /// value. Equivalent to `*self = other.clone()` but lets implementors
    /// reuse existing buffers.
    fn copy_from(&mut self, other: &Self);

    /// Appends every legal move for the side to move to `moves`. Must not
    /// clear `moves` first — callers rely on appending to track a
    /// `[prev_len, new_len)` window.
    fn generate_moves(&self, moves: &mut Vec<Self::Move>);

    /// Applies `mv` as a move by `side`.
    fn apply_move(&mut self, mv: Self::Move, side: Player);

    /// Reverses a preceding `apply_move(mv, side)` exactly.
    fn undo_move(&mut self, mv: Self::Move, side: Player);

    /// The winner of the game in its current state, or `Player::None` if
    /// undecided or drawn.
    fn winner(&self) -> Player;
}

/// A pure positional evaluator: `eval(&rule, side)` estimates how good the
/// current position is. May return `±infinity` for already-decided
/// positions. Used only by the alpha-beta engines (negamax, minimax); MCTS
/// evaluates purely via random playouts and never calls an `Evaluator`.
pub trait Evaluator<R: Rule> {
    fn eval(&self, rule: &R, side: Player) -> f64;
}

impl<R: Rule, F: Fn(&R, Player) -> f64> Evaluator<R> for F {
    fn eval(&self, rule: &R, side: Player) -> f64 {
        self(rule, side)
    }
}

/// Evaluates `rule` from `side`'s perspective using `evaluator`, applying
/// the `side · eval(state, side)` convention and guarding against a
/// degenerate evaluator returning `NaN` by treating `NaN` as the worst
/// possible score for `side` (comparisons require a total order).
pub fn evaluate_for_side<R: Rule, E: Evaluator<R>>(evaluator: &E, rule: &R, side: Player) -> f64 {
    let value = side.sign() * evaluator.eval(rule, side);
    if value.is_nan() {
        f64::NEG_INFINITY
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Counter {
        value: i32,
    }

    impl Rule for Counter {
        type Move = i32;

        fn copy_from(&mut self, other: &Self) {
            self.value = other.value;
        }

        fn generate_moves(&self, moves: &mut Vec<Self::Move>) {
            if self.value < 3 {
                moves.push(1);
            }
        }

        fn apply_move(&mut self, mv: Self::Move, _side: Player) {
            self.value += mv;
        }

        fn undo_move(&mut self, mv: Self::Move, _side: Player) {
            self.value -= mv;
        }

        fn winner(&self) -> Player {
            if self.value >= 3 {
                Player::P1
            } else {
                Player::None
            }
        }
    }

    #[test]
    fn apply_then_undo_restores_state() {
        let mut rule = Counter { value: 0 };
        rule.apply_move(1, Player::P1);
        rule.undo_move(1, Player::P1);
        assert_eq!(rule.value, 0);
    }

    #[test]
    fn degenerate_evaluator_is_worst_score() {
        let nan_eval = |_: &Counter, _: Player| f64::NAN;
        let rule = Counter { value: 0 };
        assert_eq!(evaluate_for_side(&nan_eval, &rule, Player::P1), f64::NEG_INFINITY);
        assert_eq!(evaluate_for_side(&nan_eval, &rule, Player::P2), f64::NEG_INFINITY);
    }

    #[test]
    fn evaluator_closure_blanket_impl() {
        let eval = |rule: &Counter, side: Player| side.sign() * rule.value as f64;
        let rule = Counter { value: 2 };
        assert_eq!(evaluate_for_side(&eval, &rule, Player::P1), 2.0);
        assert_eq!(evaluate_for_side(&eval, &rule, Player::P2), 2.0);
    }
}
