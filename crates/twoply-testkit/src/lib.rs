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

//! Minimal, test-only `Rule` implementations for Tic-Tac-Toe and the
//! nested "ultimate" variant. Neither game is part of the search engine's
//! public contract; they exist so the generic engines in `twoply-search`,
//! `twoply-mcts`, `twoply-runtime`, and `twoply-arena` have something
//! concrete to search over, the way a simpler game like Nim is used to
//! exercise generic game-tree code elsewhere.

pub mod tic_tac_toe;
pub mod ultimate_tic_tac_toe;

pub use tic_tac_toe::TicTacToe;
pub use ultimate_tic_tac_toe::UltimateTicTacToe;

/// The eight winning lines of any 3×3 Tic-Tac-Toe board, as cell indices.
pub const LINES: [[usize; 3]; 8] =
    [[0, 1, 2], [3, 4, 5], [6, 7, 8], [0, 3, 6], [1, 4, 7], [2, 5, 8], [0, 4, 8], [2, 4, 6]];
