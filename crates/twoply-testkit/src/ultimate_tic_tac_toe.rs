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

use crate::tic_tac_toe::TicTacToe;
use crate::LINES;

#[derive(Debug, Clone, Copy)]
struct UndoEntry {
    prev_forced: Option<usize>,
    sub_was_decided: bool,
    sub_prev_winner: Player,
}

/// A 3×3 grid of [TicTacToe] boards. Playing in cell `c` of a sub-board
/// routes the opponent's next move to sub-board `c`, unless that sub-board
/// is already decided (won or drawn), in which case the opponent may play
/// in any undecided sub-board. The outer winner is derived from the
/// sub-boards' decided winners using the same line check as a plain board.
#[derive(Debug, Clone)]
pub struct UltimateTicTacToe {
    sub_boards: [TicTacToe; 9],
    decided: [bool; 9],
    sub_winner: [Player; 9],
    forced_next: Option<usize>,
    history: Vec<UndoEntry>,
}

impl UltimateTicTacToe {
    pub fn new() -> Self {
        Self {
            sub_boards: [TicTacToe::new(); 9],
            decided: [false; 9],
            sub_winner: [Player::None; 9],
            forced_next: None,
            history: Vec::new(),
        }
    }

    /// Encodes a (sub-board, cell) pair into the `u8` move representation.
    pub fn encode(sub: usize, cell: usize) -> u8 {
        (sub * 9 + cell) as u8
    }

    /// Decodes a move into its (sub-board, cell) pair.
    pub fn decode(mv: u8) -> (usize, usize) {
        (mv as usize / 9, mv as usize % 9)
    }

    fn playable_sub_boards(&self) -> Vec<usize> {
        match self.forced_next {
            Some(sub) if !self.decided[sub] => vec![sub],
            _ => (0..9).filter(|&i| !self.decided[i]).collect(),
        }
    }

    fn decide_if_finished(&mut self, sub: usize) {
        let board = self.sub_boards[sub];
        let winner = board.winner();
        if winner != Player::None {
            self.decided[sub] = true;
            self.sub_winner[sub] = winner;
            return;
        }
        let mut moves = Vec::new();
        board.generate_moves(&mut moves);
        if moves.is_empty() {
            self.decided[sub] = true;
            self.sub_winner[sub] = Player::None;
        }
    }
}

impl Default for UltimateTicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for UltimateTicTacToe {
    type Move = u8;

    fn copy_from(&mut self, other: &Self) {
        self.sub_boards = other.sub_boards;
        self.decided = other.decided;
        self.sub_winner = other.sub_winner;
        self.forced_next = other.forced_next;
        self.history = other.history.clone();
    }

    fn generate_moves(&self, moves: &mut Vec<Self::Move>) {
        if self.winner() != Player::None {
            return;
        }
        for sub in self.playable_sub_boards() {
            let mut cells = Vec::new();
            self.sub_boards[sub].generate_moves(&mut cells);
            for cell in cells {
                moves.push(Self::encode(sub, cell as usize));
            }
        }
    }

    fn apply_move(&mut self, mv: Self::Move, side: Player) {
        let (sub, cell) = Self::decode(mv);
        self.history.push(UndoEntry {
            prev_forced: self.forced_next,
            sub_was_decided: self.decided[sub],
            sub_prev_winner: self.sub_winner[sub],
        });
        self.sub_boards[sub].apply_move(cell as u8, side);
        self.decide_if_finished(sub);
        self.forced_next = Some(cell);
    }

    fn undo_move(&mut self, mv: Self::Move, side: Player) {
        let (sub, cell) = Self::decode(mv);
        self.sub_boards[sub].undo_move(cell as u8, side);
        let entry = self.history.pop().expect("undo_move without matching apply_move");
        self.forced_next = entry.prev_forced;
        self.decided[sub] = entry.sub_was_decided;
        self.sub_winner[sub] = entry.sub_prev_winner;
    }

    fn winner(&self) -> Player {
        for line in LINES {
            let a = self.sub_winner[line[0]];
            if a != Player::None && a == self.sub_winner[line[1]] && a == self.sub_winner[line[2]] {
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
    fn apply_then_undo_restores_state() {
        let mut rule = UltimateTicTacToe::new();
        let before = rule.clone();
        rule.apply_move(UltimateTicTacToe::encode(0, 4), Player::P1);
        rule.undo_move(UltimateTicTacToe::encode(0, 4), Player::P1);
        assert_eq!(rule.sub_boards, before.sub_boards);
        assert_eq!(rule.decided, before.decided);
        assert_eq!(rule.forced_next, before.forced_next);
    }

    #[test]
    fn playing_a_cell_routes_opponent_to_matching_sub_board() {
        let mut rule = UltimateTicTacToe::new();
        rule.apply_move(UltimateTicTacToe::encode(0, 4), Player::P1);
        assert_eq!(rule.forced_next, Some(4));
        let mut moves = Vec::new();
        rule.generate_moves(&mut moves);
        assert!(moves.iter().all(|&mv| UltimateTicTacToe::decode(mv).0 == 4));
    }

    #[test]
    fn routing_to_a_decided_sub_board_frees_the_choice() {
        // Decide sub-board 0 fully for P1, forcing moves with `forced_next`
        // overridden directly so the whole sequence stays inside sub-board 0.
        let mut direct = UltimateTicTacToe::new();
        direct.apply_move(UltimateTicTacToe::encode(0, 0), Player::P1);
        direct.apply_move(UltimateTicTacToe::encode(0, 3), Player::P2);
        direct.forced_next = Some(0);
        direct.apply_move(UltimateTicTacToe::encode(0, 1), Player::P1);
        direct.forced_next = Some(0);
        direct.apply_move(UltimateTicTacToe::encode(0, 4), Player::P2);
        direct.forced_next = Some(0);
        direct.apply_move(UltimateTicTacToe::encode(0, 2), Player::P1);
        assert!(direct.decided[0]);
        assert_eq!(direct.sub_winner[0], Player::P1);
        // forced_next now points at cell 2, and sub-board 2 is not yet
        // decided, so the router should NOT free the choice here.
        assert_eq!(direct.forced_next, Some(2));

        // Force-route into the now-decided sub-board 0 to confirm the
        // choice frees up across the rest of the grid.
        direct.forced_next = Some(0);
        let mut moves = Vec::new();
        direct.generate_moves(&mut moves);
        let subs: std::collections::HashSet<usize> =
            moves.iter().map(|&mv| UltimateTicTacToe::decode(mv).0).collect();
        assert!(subs.len() > 1, "expected free choice across undecided sub-boards");
        assert!(!subs.contains(&0), "decided sub-board must not be offered");
    }

    #[test]
    fn outer_winner_follows_decided_sub_boards() {
        let mut rule = UltimateTicTacToe::new();
        rule.sub_winner = [
            Player::P1,
            Player::P1,
            Player::P1,
            Player::None,
            Player::None,
            Player::None,
            Player::None,
            Player::None,
            Player::None,
        ];
        rule.decided = [true, true, true, false, false, false, false, false, false];
        assert_eq!(rule.winner(), Player::P1);
    }
}
