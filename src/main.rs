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

use anyhow::Result;
use clap::{ArgEnum, Parser};
use tracing::info;
use twoply_arena::{play_match, ArenaConfig};
use twoply_core::Player;
use twoply_mcts::{Mcts, MostRobust};
use twoply_runtime::{Algorithm, Runner};
use twoply_search::minimax::{First, MaxDepth};
use twoply_search::reorder::Shuffle;
use twoply_testkit::tic_tac_toe::TicTacToe;

type DemoRunner = Runner<TicTacToe, Shuffle, fn(&TicTacToe, Player) -> f64, MaxDepth, First, MostRobust>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ArgEnum)]
enum AlgorithmKind {
    Negamax,
    Minimax,
    Mcts,
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm for the side that moves first.
    #[clap(long, arg_enum, value_parser, default_value = "negamax")]
    player_one: AlgorithmKind,
    /// Search algorithm for the second side.
    #[clap(long, arg_enum, value_parser, default_value = "mcts")]
    player_two: AlgorithmKind,
    /// Search depth for negamax and the minimax recursion cutoff.
    #[clap(long, value_parser, default_value_t = 4)]
    depth: usize,
    /// Simulation budget per move for the MCTS algorithm.
    #[clap(long, value_parser, default_value_t = 200)]
    simulations: u32,
    /// Number of games to play, alternating which side moves first.
    #[clap(long, value_parser, default_value_t = 10)]
    rounds: usize,
    /// RNG seed for the move-reordering and MCTS algorithms.
    #[clap(long, value_parser, default_value_t = 1)]
    seed: u64,
}

fn build_runner(kind: AlgorithmKind, rule: TicTacToe, seed: u64, depth: usize, simulations: u32) -> DemoRunner {
    let algorithm = match kind {
        AlgorithmKind::Negamax => {
            Algorithm::negamax(rule, depth, Shuffle::from_seed(seed), TicTacToe::trivial_estimate)
        }
        AlgorithmKind::Minimax => Algorithm::minimax(
            rule,
            depth,
            MaxDepth(depth),
            Shuffle::from_seed(seed),
            TicTacToe::trivial_estimate,
            First,
        ),
        AlgorithmKind::Mcts => Algorithm::mcts(simulations, Mcts::from_seed(rule, seed)),
    };
    Runner::new(rule, algorithm)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let rule = TicTacToe::new();
    let mut runner_a = build_runner(args.player_one, rule, args.seed, args.depth, args.simulations);
    let mut runner_b = build_runner(args.player_two, rule, args.seed.wrapping_add(1), args.depth, args.simulations);
    let config = ArenaConfig { rounds: args.rounds, starting_side: Player::P1, alternate: true };

    println!("Playing {} rounds: {:?} (P1 first) vs {:?}", args.rounds, args.player_one, args.player_two);

    let result = play_match(&rule, &mut runner_a, &mut runner_b, &config, |report| {
        info!(round = report.round, winner = ?report.winner, plies = report.plies, "round finished");
    });

    println!(
        "{:?}: {} wins, {} draws, {} losses ({:?} elapsed)",
        args.player_one, result.runner_a.wins, result.runner_a.draws, result.runner_a.losses, result.duration_a
    );
    println!(
        "{:?}: {} wins, {} draws, {} losses ({:?} elapsed)",
        args.player_two, result.runner_b.wins, result.runner_b.draws, result.runner_b.losses, result.duration_b
    );

    Ok(())
}
