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

use std::sync::atomic::{AtomicBool, Ordering};

use twoply_core::{Evaluator, Player, Rule};
use twoply_mcts::{Chooser, Mcts};
use twoply_search::minimax::{Minimax, RecursionPolicy, RootChooser};
use twoply_search::negamax::Negamax;
use twoply_search::reorder::Reorder;

use crate::interactive::Interactive;

/// Tagged union over the three search families plus the interactive human
/// variant. Each kind is a concrete, owned engine behind one `match`, so
/// dispatch between algorithm *kinds* costs a tag check rather than a vtable
/// call, while each engine's own hot loop (the part that actually runs
/// millions of times per search) stays fully monomorphic.
pub enum Algorithm<R, O, E, P, RC, C>
where
    R: Rule,
    O: Reorder<R>,
    E: Evaluator<R>,
    P: RecursionPolicy,
    RC: RootChooser<R::Move>,
    C: Chooser<R::Move>,
{
    Negamax { depth: usize, engine: Negamax<R, O, E> },
    Minimax { initial_depth: usize, engine: Minimax<R, O, E, P>, chooser: RC },
    Mcts { simulations: u32, engine: Mcts<R, C> },
    Interactive(Interactive<R>),
}

impl<R, O, E, P, RC, C> Algorithm<R, O, E, P, RC, C>
where
    R: Rule,
    O: Reorder<R>,
    E: Evaluator<R>,
    P: RecursionPolicy,
    RC: RootChooser<R::Move>,
    C: Chooser<R::Move>,
{
    pub fn negamax(rule: R, depth: usize, reorder: O, evaluator: E) -> Self {
        Algorithm::Negamax { depth, engine: Negamax::new(rule, reorder, evaluator) }
    }

    pub fn minimax(rule: R, initial_depth: usize, policy: P, reorder: O, evaluator: E, chooser: RC) -> Self {
        Algorithm::Minimax { initial_depth, engine: Minimax::new(rule, reorder, evaluator, policy), chooser }
    }

    pub fn mcts(simulations: u32, engine: Mcts<R, C>) -> Self {
        Algorithm::Mcts { simulations, engine }
    }

    pub fn interactive(rule: R) -> Self {
        Algorithm::Interactive(Interactive::new(rule))
    }

    /// A cloneable handle to supply moves to an `Interactive` algorithm, or
    /// `None` for any other kind.
    pub fn interactive_sender(&self) -> Option<std::sync::mpsc::SyncSender<Option<R::Move>>> {
        match self {
            Algorithm::Interactive(i) => Some(i.sender()),
            _ => None,
        }
    }

    pub fn rule(&self) -> &R {
        match self {
            Algorithm::Negamax { engine, .. } => engine.rule(),
            Algorithm::Minimax { engine, .. } => engine.rule(),
            Algorithm::Mcts { engine, .. } => engine.rule(),
            Algorithm::Interactive(interactive) => interactive.rule(),
        }
    }

    /// Runs the configured search (or, for `Interactive`, blocks on the
    /// pending-move channel) and returns the chosen move, or `None` if no
    /// legal move exists from the current state, or the search was
    /// cancelled before a move was decided.
    ///
    /// Callers (the [crate::Runner] worker) are expected to have already
    /// applied any queued opponent/own moves via [Algorithm::apply_move]
    /// before calling this.
    pub fn search(&mut self, side: Player, cancel: &AtomicBool) -> Option<R::Move> {
        match self {
            Algorithm::Negamax { depth, engine } => {
                engine.search(*depth, side, cancel);
                if cancel.load(Ordering::Acquire) {
                    None
                } else {
                    engine.best_move()
                }
            }
            Algorithm::Minimax { initial_depth, engine, chooser } => {
                engine.search(*initial_depth, side, cancel);
                if cancel.load(Ordering::Acquire) {
                    None
                } else {
                    engine.root_move(chooser)
                }
            }
            Algorithm::Mcts { simulations, engine } => {
                let mut legal = Vec::new();
                engine.rule().generate_moves(&mut legal);
                if legal.is_empty() {
                    return None;
                }
                let mv = engine.run(*simulations, side, cancel);
                if cancel.load(Ordering::Acquire) {
                    None
                } else {
                    Some(mv)
                }
            }
            Algorithm::Interactive(interactive) => interactive.search(),
        }
    }

    /// Advances the algorithm's own rule copy by `mv` played by `side`,
    /// rebasing the MCTS tree onto the matching child where one exists
    /// (§4.F tree reuse). Negamax/minimax have no persistent tree to
    /// rebase; they simply replay the move on their owned rule.
    pub fn apply_move(&mut self, mv: R::Move, side: Player) {
        match self {
            Algorithm::Negamax { engine, .. } => engine.rule_mut().apply_move(mv, side),
            Algorithm::Minimax { engine, .. } => engine.rule_mut().apply_move(mv, side),
            Algorithm::Mcts { engine, .. } => engine.apply_move(mv, side),
            Algorithm::Interactive(interactive) => interactive.rule_mut().apply_move(mv, side),
        }
    }

    /// Aggregate node count (negamax/minimax) or simulation/visit count
    /// (MCTS, via the root's visit count) from the most recent search.
    /// Zero for the interactive variant, which performs no search.
    pub fn node_count(&self) -> u64 {
        match self {
            Algorithm::Negamax { engine, .. } => engine.node_count(),
            Algorithm::Minimax { engine, .. } => engine.node_count(),
            Algorithm::Mcts { engine, .. } => u64::from(engine.root_visit_count()),
            Algorithm::Interactive(_) => 0,
        }
    }

    /// Restores the algorithm's owned rule (and, for MCTS, its persistent
    /// tree) to `initial_rule`.
    pub fn reset(&mut self, initial_rule: &R) {
        match self {
            Algorithm::Negamax { engine, .. } => engine.rule_mut().copy_from(initial_rule),
            Algorithm::Minimax { engine, .. } => engine.rule_mut().copy_from(initial_rule),
            Algorithm::Mcts { engine, .. } => engine.reset(initial_rule.clone()),
            Algorithm::Interactive(interactive) => interactive.reset(initial_rule.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twoply_search::minimax::{First, MaxDepth};
    use twoply_search::reorder::Shuffle;
    use twoply_testkit::tic_tac_toe::TicTacToe;

    type NegamaxAlg = Algorithm<TicTacToe, Shuffle, fn(&TicTacToe, Player) -> f64, MaxDepth, First, twoply_mcts::MostRobust>;

    #[test]
    fn negamax_search_front_places_the_winning_move() {
        let mut rule = TicTacToe::new();
        for mv in [0u8, 3, 1, 4] {
            let side = rule.side_to_move();
            rule.apply_move(mv, side);
        }
        let mut alg: NegamaxAlg =
            Algorithm::negamax(rule, 2, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        let cancel = AtomicBool::new(false);
        assert_eq!(alg.search(Player::P1, &cancel), Some(2));
    }

    #[test]
    fn terminal_position_yields_no_move() {
        let mut rule = TicTacToe::new();
        for mv in [0u8, 3, 1, 4, 2] {
            let side = rule.side_to_move();
            rule.apply_move(mv, side);
        }
        let mut alg: NegamaxAlg =
            Algorithm::negamax(rule, 3, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        let cancel = AtomicBool::new(false);
        assert_eq!(alg.search(Player::P1, &cancel), None);
    }

    #[test]
    fn cancelled_search_discards_any_chosen_move() {
        let rule = TicTacToe::new();
        let mut alg: NegamaxAlg =
            Algorithm::negamax(rule, 4, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        let cancel = AtomicBool::new(true);
        assert_eq!(alg.search(Player::P1, &cancel), None);
    }

    #[test]
    fn apply_move_advances_the_owned_rule() {
        let rule = TicTacToe::new();
        let mut alg: NegamaxAlg =
            Algorithm::negamax(rule, 1, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        alg.apply_move(4, Player::P1);
        assert_eq!(alg.rule().board()[4], Player::P1);
    }

    #[test]
    fn reset_restores_the_initial_rule() {
        let initial = TicTacToe::new();
        let mut alg: NegamaxAlg =
            Algorithm::negamax(initial, 1, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        alg.apply_move(4, Player::P1);
        alg.reset(&TicTacToe::new());
        assert_eq!(alg.rule().board()[4], Player::None);
    }
}
