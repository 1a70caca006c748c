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

use twoply_core::{Player, Rule};

use crate::LINES;

/// 3×3 Tic-Tac-Toe. Board indices are row-major, 0..9; `Player::None` marks
/// an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    board: [Player; 9],
    marks_placed: u8,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self { board: [Player::None; 9], marks_placed: 0 }
    }

    pub fn board(&self) -> [Player; 9] {
        self.board
    }

    /// `P1` to move on an even number of marks placed so far, `P2`
    /// otherwise. Meaningless once the game has ended, but harmless to call.
    pub fn side_to_move(&self) -> Player {
        if self.marks_placed % 2 == 0 {
            Player::P1
        } else {
            Player::P2
        }
    }

    /// Own-marks-minus-opponent-marks count, from a fixed `P1`-favours
    /// -positive frame (the `side` argument is part of the `Evaluator`
    /// contract but unused here; [twoply_core::rule::evaluate_for_side]
    /// reconciles the frame with whichever side is asking).
    pub fn trivial_estimate(rule: &TicTacToe, _side: Player) -> f64 {
        rule.count(Player::P1) as f64 - rule.count(Player::P2) as f64
    }

    /// For every winning line not yet blocked by the opponent, credits a
    /// side proportionally to how many of its marks already occupy that
    /// line. Same `P1`-favours-positive frame as [TicTacToe::trivial_estimate].
    pub fn simple_estimate(rule: &TicTacToe, _side: Player) -> f64 {
        let mut score = 0.0;
        for line in LINES {
            let marks = line.map(|i| rule.board[i]);
            let p1 = marks.iter().filter(|&&p| p == Player::P1).count();
            let p2 = marks.iter().filter(|&&p| p == Player::P2).count();
            if p2 == 0 {
                score += p1 as f64;
            }
            if p1 == 0 {
                score -= p2 as f64;
            }
        }
        score
    }

    fn count(&self, player: Player) -> usize {
        self.board.iter().filter(|&&p| p == player).count()
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for TicTacToe {
    type Move = u8;

    fn copy_from(&mut self, other: &Self) {
        *self = *other;
    }

    fn generate_moves(&self, moves: &mut Vec<Self::Move>) {
        if self.winner() != Player::None {
            return;
        }
        for (i, &cell) in self.board.iter().enumerate() {
            if cell == Player::None {
                moves.push(i as u8);
            }
        }
    }

    fn apply_move(&mut self, mv: Self::Move, side: Player) {
        self.board[mv as usize] = side;
        self.marks_placed += 1;
    }

    fn undo_move(&mut self, mv: Self::Move, _side: Player) {
        self.board[mv as usize] = Player::None;
        self.marks_placed -= 1;
    }

    fn winner(&self) -> Player {
        for line in LINES {
            let a = self.board[line[0]];
            if a != Player::None && a == self.board[line[1]] && a == self.board[line[2]] {
                return a;
            }
        }
        Player::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_then_undo_restores_board() {
        let mut rule = TicTacToe::new();
        let before = rule;
        rule.apply_move(4, Player::P1);
        rule.undo_move(4, Player::P1);
        assert_eq!(rule, before);
    }

    #[test]
    fn detects_a_row_win() {
        let mut rule = TicTacToe::new();
        rule.apply_move(0, Player::P1);
        rule.apply_move(3, Player::P2);
        rule.apply_move(1, Player::P1);
        rule.apply_move(4, Player::P2);
        rule.apply_move(2, Player::P1);
        assert_eq!(rule.winner(), Player::P1);
    }

    #[test]
    fn terminal_board_generates_no_moves_even_with_empty_cells() {
        let mut rule = TicTacToe::new();
        for mv in [0u8, 3, 1, 4, 2] {
            let side = rule.side_to_move();
            rule.apply_move(mv, side);
        }
        assert_eq!(rule.winner(), Player::P1);
        let mut moves = Vec::new();
        rule.generate_moves(&mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn full_draw_board_has_no_winner() {
        // X O X / X O O / O X X
        let mut rule = TicTacToe::new();
        let xs = [0u8, 2, 3, 7, 8];
        let os = [1u8, 4, 5, 6];
        for mv in xs {
            rule.apply_move(mv, Player::P1);
        }
        for mv in os {
            rule.apply_move(mv, Player::P2);
        }
        assert_eq!(rule.winner(), Player::None);
        let mut moves = Vec::new();
        rule.generate_moves(&mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn trivial_estimate_favours_the_side_with_more_marks() {
        let mut rule = TicTacToe::new();
        rule.apply_move(0, Player::P1);
        rule.apply_move(1, Player::P2);
        rule.apply_move(2, Player::P1);
        assert_eq!(TicTacToe::trivial_estimate(&rule, Player::P1), 1.0);
    }
}
