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

use std::fmt;
use std::ops::Neg;

/// The side to move, or the winner of a finished game. `None` means "nobody"
/// — either a draw, or (when used as a side-to-move) a position where no
/// side is yet on the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
    None,
}

impl Player {
    /// +1 for P1, -1 for P2, 0 for None. Used only where an explicit sign
    /// multiplication is the clearest way to express a convention (see
    /// [Player::terminal_value] and `Evaluator`'s `side · eval(..)` rule);
    /// prefer `match`ing on `Player` directly elsewhere.
    pub fn sign(self) -> f64 {
        match self {
            Player::P1 => 1.0,
            Player::P2 => -1.0,
            Player::None => 0.0,
        }
    }

    /// The value a terminal position with the given `winner` has from
    /// `perspective`'s point of view: `+infinity` if `perspective` won,
    /// `-infinity` if the other side won, `0.0` for a draw or for a
    /// perspective of `None`.
    pub fn terminal_value(winner: Player, perspective: Player) -> f64 {
        match winner {
            Player::None => 0.0,
            w if perspective == Player::None => {
                let _ = w;
                0.0
            }
            w if w == perspective => f64::INFINITY,
            _ => f64::NEG_INFINITY,
        }
    }
}

impl Neg for Player {
    type Output = Player;

    /// An involution: negating P1 gives P2 and vice versa; `None` is fixed.
    fn neg(self) -> Player {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
            Player::None => Player::None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Player::P1 => 'X',
            Player::P2 => 'O',
            Player::None => '.',
        };
        write!(f, "{c}")
    }
}
