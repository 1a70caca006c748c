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

use std::time::Duration;

use twoply_core::{EngineError, Player};

/// Per-runner running totals accumulated across a whole arena run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunnerTotals {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Node count (negamax/minimax) or simulation count (MCTS) from this
    /// runner's most recently completed search, not summed across rounds —
    /// matching §2's "aggregate node counts ... or simulation counts" being
    /// a point-in-time figure a caller samples after the match, the way the
    /// original `Algorithm::duration` accumulates but per-search counters
    /// reset every search.
    pub last_node_count: u64,
}

/// What happened in one round, reported to the caller's callback (§6's
/// "Arena configuration ... callback for per-round reporting").
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub round: usize,
    /// The side that won the round, or `Player::None` for a draw.
    pub winner: Player,
    pub plies: u32,
    /// Set when the round ended in a fatal fault (§7)  rather than a normal
    /// terminal position: the offending side and the error kind.
    pub fault: Option<(Player, EngineError)>,
}

/// The outcome of a whole arena run: final totals and wall-clock durations
/// for both runners.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArenaResult {
    pub runner_a: RunnerTotals,
    pub runner_b: RunnerTotals,
    pub duration_a: Duration,
    pub duration_b: Duration,
}
