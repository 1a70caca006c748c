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

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use twoply_core::{Player, Rule};

use crate::chooser::{Chooser, MostRobust};
use crate::node::Node;

/// Default UCB1 exploration constant, `sqrt(2)`, as suggested by Kocsis and
/// Szepesvári.
pub const DEFAULT_EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Tunable knobs for an MCTS search, decoupled from the concrete `Chooser`
/// an engine is built with. `simulations` has no sensible default across the
/// whole recommended `[1, 10^6]` range, so — unlike the negamax and minimax
/// configuration structs — this has no `Default` impl; callers must supply
/// it via [MctsConfig::new].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsConfig {
    pub simulations: u32,
    pub exploration: f64,
}

impl MctsConfig {
    pub fn new(simulations: u32) -> Self {
        Self { simulations, exploration: DEFAULT_EXPLORATION_CONSTANT }
    }
}

/// Monte Carlo Tree Search over an abstract [Rule], with a single persistent
/// root reused across moves.
///
/// Unlike the alpha-beta engines, a single rollout never threads apply/undo
/// pairs back up through the whole tree: each simulation clones the root
/// rule once, mutates the clone freely while descending and playing out,
/// and discards it at the end of the iteration.
pub struct Mcts<R: Rule, C: Chooser<R::Move> = MostRobust> {
    rule: R,
    root: Node<R::Move>,
    exploration_constant: f64,
    rng: StdRng,
    chooser: C,
}

impl<R: Rule> Mcts<R, MostRobust> {
    pub fn new(rule: R) -> Self {
        Self::with_chooser(rule, MostRobust)
    }

    pub fn from_seed(rule: R, seed: u64) -> Self {
        Self {
            rule,
            root: Node::root(),
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            rng: StdRng::seed_from_u64(seed),
            chooser: MostRobust,
        }
    }
}

impl<R: Rule, C: Chooser<R::Move>> Mcts<R, C> {
    pub fn with_chooser(rule: R, chooser: C) -> Self {
        Self {
            rule,
            root: Node::root(),
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            rng: StdRng::from_entropy(),
            chooser,
        }
    }

    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn root_visit_count(&self) -> u32 {
        self.root.denominator
    }

    /// Runs up to `simulations` select-expand-simulate-backpropagate
    /// iterations, or stops early once `cancel` is observed set, then
    /// returns the chosen root move. `side` is the side to move at the
    /// engine's current rule state.
    ///
    /// Panics if the current position has no legal moves (callers must
    /// check `rule().winner()` and legality before calling).
    pub fn run(&mut self, simulations: u32, side: Player, cancel: &AtomicBool) -> R::Move {
        // The first iteration always runs regardless of `cancel` so the root
        // ends up expanded (and therefore has a child to choose) even under
        // immediate cancellation; later iterations check the flag up front.
        for i in 0..simulations {
            if i > 0 && cancel.load(Ordering::Acquire) {
                break;
            }
            let mut state = self.rule.clone();
            visit(&mut self.root, &mut state, side, Player::None, self.exploration_constant, &mut self.rng);
        }

        let idx = self.chooser.choose(&self.root.children);
        self.root.children[idx].mv.expect("a non-root node always carries a move")
    }

    /// Discards the persistent tree and restarts the root from `rule`,
    /// keeping the configured exploration constant and chooser. Used by the
    /// engine runner's `reset` operation; normal tree reuse goes through
    /// [Mcts::apply_move] instead.
    pub fn reset(&mut self, rule: R) {
        self.rule = rule;
        self.root = Node::root();
    }

    /// Tells the engine that `mv` was played by `side` from the current
    /// rule state. Promotes the matching root child (dropping its
    /// siblings), or creates a fresh root if the child was never expanded.
    /// Must be called for both the engine's own chosen move and the
    /// opponent's reply, in order, to keep tree reuse valid (§4.F, M3).
    pub fn apply_move(&mut self, mv: R::Move, side: Player) {
        self.rule.apply_move(mv, side);

        if let Some(pos) = self.root.children.iter().position(|child| child.mv == Some(mv)) {
            self.root = self.root.children.swap_remove(pos);
        } else {
            self.root = Node::root();
        }
    }
}

/// Reward for `winner` from `mover`'s perspective: `1.0` if `mover` won,
/// `-1.0` if `mover` lost, `0.0` for a draw or when `mover` is `Player::None`
/// (the root, which nobody moved into).
fn reward_for(winner: Player, mover: Player) -> f64 {
    if winner == Player::None || mover == Player::None {
        0.0
    } else if winner == mover {
        1.0
    } else {
        -1.0
    }
}

/// One select/expand/simulate/backpropagate pass, rooted at `node`.
/// `side_to_move` is whoever is to move in `state`; `mover` is whoever
/// played the move that led to `node` (`Player::None` at the true root).
/// Returns the reward recorded into `node`'s own statistics, i.e. from
/// `mover`'s perspective, so the caller can negate it once per level on the
/// way back up, mirroring negamax.
fn visit<R: Rule>(
    node: &mut Node<R::Move>,
    state: &mut R,
    side_to_move: Player,
    mover: Player,
    exploration_constant: f64,
    rng: &mut StdRng,
) -> f64 {
    let winner = state.winner();
    if winner != Player::None {
        node.expanded = true;
        let reward = reward_for(winner, mover);
        node.denominator += 1;
        node.numerator += reward;
        return reward;
    }

    if !node.expanded {
        let mut moves = Vec::new();
        state.generate_moves(&mut moves);
        node.expanded = true;
        if moves.is_empty() {
            node.denominator += 1;
            return 0.0;
        }
        node.children = moves.into_iter().map(Node::new).collect();
    }

    let idx = select_child(node, exploration_constant, rng);
    let mv = node.children[idx].mv.expect("non-root node always carries a move");

    let reward_child = if node.children[idx].denominator == 0 {
        state.apply_move(mv, side_to_move);
        let reward = simulate(state, side_to_move, -side_to_move, rng);
        node.children[idx].denominator += 1;
        node.children[idx].numerator += reward;
        reward
    } else {
        state.apply_move(mv, side_to_move);
        visit(&mut node.children[idx], state, -side_to_move, side_to_move, exploration_constant, rng)
    };

    node.denominator += 1;
    let reward_here = -reward_child;
    node.numerator += reward_here;
    reward_here
}

/// Picks an unvisited child uniformly at random if one exists, otherwise
/// the child maximising UCB1.
fn select_child<M>(node: &Node<M>, exploration_constant: f64, rng: &mut StdRng) -> usize {
    let unvisited: Vec<usize> =
        node.children.iter().enumerate().filter(|(_, c)| c.denominator == 0).map(|(i, _)| i).collect();
    if !unvisited.is_empty() {
        return *unvisited.choose(rng).expect("unvisited is non-empty");
    }

    let parent_denominator = f64::from(node.denominator.max(1));
    node.children
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| {
            ucb1(a, parent_denominator, exploration_constant)
                .partial_cmp(&ucb1(b, parent_denominator, exploration_constant))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .expect("select_child is only called with at least one child")
}

fn ucb1<M>(child: &Node<M>, parent_denominator: f64, c: f64) -> f64 {
    let denominator = f64::from(child.denominator);
    child.numerator / denominator + c * (parent_denominator.ln() / denominator).sqrt()
}

/// Plays uniformly random legal moves, alternating sides starting from
/// `side_to_move`, until the game ends, then returns the reward from
/// `mover`'s perspective. `state` is left at the terminal position reached;
/// callers never need it back, since the whole clone made at the start of
/// the iteration is discarded once the iteration finishes.
fn simulate<R: Rule>(state: &mut R, mover: Player, mut side_to_move: Player, rng: &mut StdRng) -> f64 {
    let mut moves = Vec::new();

    loop {
        if state.winner() != Player::None {
            break;
        }
        moves.clear();
        state.generate_moves(&mut moves);
        let Some(&mv) = moves.choose(rng) else {
            break;
        };
        state.apply_move(mv, side_to_move);
        side_to_move = -side_to_move;
    }

    reward_for(state.winner(), mover)
}

#[cfg(test)]
mod tests {
    use super::*;
    use twoply_testkit::tic_tac_toe::TicTacToe;

    #[test]
    fn new_config_uses_the_default_exploration_constant() {
        let config = MctsConfig::new(500);
        assert_eq!(config.simulations, 500);
        assert_eq!(config.exploration, DEFAULT_EXPLORATION_CONSTANT);
    }

    #[test]
    fn immediate_win_is_found_given_enough_simulations() {
        let mut rule = TicTacToe::new();
        for mv in [0u8, 3, 1, 4] {
            let side = rule.side_to_move();
            rule.apply_move(mv, side);
        }
        let mut mcts = Mcts::from_seed(rule, 42);
        let cancel = AtomicBool::new(false);
        let mv = mcts.run(2000, Player::P1, &cancel);
        assert_eq!(mv, 2);
    }

    #[test]
    fn cancellation_still_yields_a_legal_move() {
        let rule = TicTacToe::new();
        let mut mcts = Mcts::from_seed(rule, 1);
        let cancel = AtomicBool::new(true);
        let mv = mcts.run(1000, Player::P1, &cancel);
        let mut moves = Vec::new();
        mcts.rule().generate_moves(&mut moves);
        assert!(moves.contains(&mv));
    }

    #[test]
    fn root_denominator_equals_sum_of_child_denominators() {
        // Every simulation bumps the root's own denominator (line ~210) and
        // exactly one direct child along the descended path (either the
        // expand branch's first visit or the recurse branch's own
        // `node.denominator += 1`), so after N simulations from a
        // non-terminal root, root.denominator == child_sum == N: the root
        // itself is never visited "for free" the way a deeper node's first
        // visit is credited only to itself and not to a child.
        let rule = TicTacToe::new();
        let mut mcts = Mcts::from_seed(rule, 9);
        let cancel = AtomicBool::new(false);
        mcts.run(200, Player::P1, &cancel);
        let child_sum: u32 = mcts.root.children.iter().map(|c| c.denominator).sum();
        assert_eq!(mcts.root.denominator, child_sum);
        assert_eq!(mcts.root.denominator, 200);
    }

    #[test]
    fn apply_move_rebases_onto_the_matching_child_preserving_its_statistics() {
        let rule = TicTacToe::new();
        let mut mcts = Mcts::from_seed(rule, 3);
        let cancel = AtomicBool::new(false);
        mcts.run(300, Player::P1, &cancel);
        let chosen = mcts.chooser.choose(&mcts.root.children);
        let mv = mcts.root.children[chosen].mv.unwrap();
        let expected_denominator = mcts.root.children[chosen].denominator;

        mcts.apply_move(mv, Player::P1);

        assert_eq!(mcts.root.denominator, expected_denominator);
        assert_eq!(mcts.root.mv, Some(mv));
    }

    #[test]
    fn apply_move_onto_an_unexpanded_child_starts_a_fresh_root() {
        let rule = TicTacToe::new();
        let mut mcts = Mcts::from_seed(rule, 5);
        // No search has run yet, so the root has no children.
        mcts.apply_move(0, Player::P1);
        assert_eq!(mcts.root.denominator, 0);
        assert_eq!(mcts.root.mv, None);
    }

    #[test]
    fn full_cancellation_still_expands_the_root_once() {
        let rule = TicTacToe::new();
        let mut mcts = Mcts::from_seed(rule, 11);
        let cancel = AtomicBool::new(true);
        let mv = mcts.run(1000, Player::P1, &cancel);
        let mut moves = Vec::new();
        mcts.rule().generate_moves(&mut moves);
        assert!(moves.contains(&mv));
    }

    #[test]
    fn reset_discards_the_tree_and_restores_the_rule() {
        let rule = TicTacToe::new();
        let mut mcts = Mcts::from_seed(rule, 6);
        let cancel = AtomicBool::new(false);
        mcts.run(200, Player::P1, &cancel);
        assert!(mcts.root.denominator > 0);

        mcts.reset(TicTacToe::new());
        assert_eq!(mcts.root.denominator, 0);
        assert!(mcts.root.children.is_empty());
    }
}
