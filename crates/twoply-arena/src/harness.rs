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

use tracing::{info, warn};
use twoply_core::{EngineError, Player, Rule};
use twoply_runtime::EngineRunner;

use crate::config::ArenaConfig;
use crate::report::{ArenaResult, RoundReport, RunnerTotals};

fn spin_until_ready<R: Rule>(runner: &mut impl EngineRunner<R>, side: Player) -> R::Move {
    runner.suggest_move(side);
    loop {
        if let Some(mv) = runner.poll() {
            return mv;
        }
        std::thread::yield_now();
    }
}

fn tally(totals: &mut RunnerTotals, outcome: Player, own_side: Player, node_count: u64) {
    totals.last_node_count = node_count;
    match outcome {
        Player::None => totals.draws += 1,
        w if w == own_side => totals.wins += 1,
        _ => totals.losses += 1,
    }
}

/// Plays `config.rounds` games of `initial_rule` between `runner_a` and
/// `runner_b` to completion, reporting each finished round through
/// `on_round` as it happens (§4.H).
///
/// When `config.alternate` is set, which runner holds `Player::P1` swaps
/// every round so neither side's first-move advantage is baked into the
/// totals. A runner that proposes a move outside the current legal-move set
/// ends the round immediately as a loss for that runner, recorded in the
/// round's `fault`.
pub fn play_match<R, A, B>(
    initial_rule: &R,
    runner_a: &mut A,
    runner_b: &mut B,
    config: &ArenaConfig,
    mut on_round: impl FnMut(&RoundReport),
) -> ArenaResult
where
    R: Rule,
    A: EngineRunner<R>,
    B: EngineRunner<R>,
{
    let mut result = ArenaResult::default();
    let mut moves = Vec::new();

    for round in 0..config.rounds {
        let a_is_p1 = !config.alternate || round % 2 == 0;
        let mut rule = initial_rule.clone();
        let mut side = config.starting_side;
        let mut plies = 0u32;
        let mut fault = None;

        let winner = loop {
            let decided = rule.winner();
            if decided != Player::None {
                break decided;
            }
            moves.clear();
            rule.generate_moves(&mut moves);
            if moves.is_empty() {
                break Player::None;
            }

            let a_active = (side == Player::P1) == a_is_p1;
            let mv =
                if a_active { spin_until_ready(runner_a, side) } else { spin_until_ready(runner_b, side) };

            if !moves.contains(&mv) {
                warn!(round, ?side, "runner proposed an illegal move, forfeiting the round");
                fault = Some((
                    side,
                    EngineError::IllegalMoveFromEngine {
                        side: format!("{side:?}"),
                        description: "chosen move was not a member of the legal-move set".to_string(),
                    },
                ));
                break -side;
            }

            if a_active {
                runner_a.apply_move(mv);
                runner_b.opponent_move(mv);
            } else {
                runner_b.apply_move(mv);
                runner_a.opponent_move(mv);
            }
            rule.apply_move(mv, side);
            plies += 1;
            side = -side;
        };

        let own_side_a = if a_is_p1 { Player::P1 } else { Player::P2 };
        let own_side_b = -own_side_a;
        tally(&mut result.runner_a, winner, own_side_a, runner_a.node_count());
        tally(&mut result.runner_b, winner, own_side_b, runner_b.node_count());
        result.duration_a += runner_a.accumulated_duration();
        result.duration_b += runner_b.accumulated_duration();

        info!(round, ?winner, plies, "round finished");
        on_round(&RoundReport { round, winner, plies, fault });

        runner_a.reset();
        runner_b.reset();
    }

    result
}

#[cfg(test)]
mod tests {
    use twoply_runtime::{Algorithm, Runner};
    use twoply_search::minimax::{First, MaxDepth};
    use twoply_search::reorder::Shuffle;
    use twoply_testkit::tic_tac_toe::TicTacToe;

    use super::*;

    type NegamaxRunner =
        Runner<TicTacToe, Shuffle, fn(&TicTacToe, Player) -> f64, MaxDepth, First, twoply_mcts::MostRobust>;

    fn perfect_runner(seed: u64) -> NegamaxRunner {
        let rule = TicTacToe::new();
        let alg = Algorithm::negamax(rule.clone(), 9, Shuffle::from_seed(seed), TicTacToe::trivial_estimate);
        Runner::new(rule, alg)
    }

    #[test]
    fn two_perfect_players_always_draw() {
        let rule = TicTacToe::new();
        let mut a = perfect_runner(1);
        let mut b = perfect_runner(2);
        let config = ArenaConfig { rounds: 4, starting_side: Player::P1, alternate: true };

        let mut reports = Vec::new();
        let result = play_match(&rule, &mut a, &mut b, &config, |r| reports.push(r.clone()));

        assert_eq!(reports.len(), 4);
        for report in &reports {
            assert_eq!(report.winner, Player::None);
            assert!(report.fault.is_none());
        }
        assert_eq!(result.runner_a.draws, 4);
        assert_eq!(result.runner_b.draws, 4);
        assert_eq!(result.runner_a.wins, 0);
        assert_eq!(result.runner_b.losses, 0);
    }

    #[test]
    fn alternating_still_draws_with_both_runners_searching_both_sides() {
        let rule = TicTacToe::new();
        let mut a = perfect_runner(3);
        let mut b = perfect_runner(4);
        let config = ArenaConfig { rounds: 2, starting_side: Player::P1, alternate: true };

        let result = play_match(&rule, &mut a, &mut b, &config, |_| {});

        assert_eq!(result.runner_a.draws, 2);
        assert_eq!(result.runner_b.draws, 2);
        assert!(a.node_count() > 0);
        assert!(b.node_count() > 0);
    }
}
