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

use twoply_core::Player;

/// Arena configuration (§6's "Arena configuration" external interface).
///
/// `starting_side` is which `Player` tag makes the first move of the very
/// first round. `alternate`, if set, swaps which runner is assigned to
/// `Player::P1` versus `Player::P2` between rounds, so that across `rounds`
/// games each runner experiences the first-move advantage equally, the way
/// a tournament replays each pairing with sides swapped rather than fixed.
/// `starting_side` cannot toggle move order within a round — side-to-move
/// is a pure function of moves already played for these rule
/// implementations — so it is read as which tag makes the first move, with
/// `alternate` controlling which runner wears that tag each round.
#[derive(Debug, Clone, Copy)]
pub struct ArenaConfig {
    pub rounds: usize,
    pub starting_side: Player,
    pub alternate: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self { rounds: 1, starting_side: Player::P1, alternate: true }
    }
}
