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
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};
use twoply_core::{Evaluator, Player, Rule};
use twoply_mcts::Chooser;
use twoply_search::minimax::{RecursionPolicy, RootChooser};
use twoply_search::reorder::Reorder;

use crate::algorithm::Algorithm;

/// What crosses the worker-thread boundary on completion: the algorithm
/// (handed back so the next `suggest_move` can reuse its persistent state —
/// the MCTS tree, the negamax move buffer) and the move it chose, if any.
struct WorkerOutput<R, O, E, P, RC, C>
where
    R: Rule,
    O: Reorder<R>,
    E: Evaluator<R>,
    P: RecursionPolicy,
    RC: RootChooser<R::Move>,
    C: Chooser<R::Move>,
{
    algorithm: Algorithm<R, O, E, P, RC, C>,
    mv: Option<R::Move>,
}

/// Wraps one [Algorithm] into a stoppable, pollable asynchronous
/// computation running on a single background worker thread (§4.G).
///
/// `Idle -> Running` on [Runner::suggest_move]; `Running -> Idle` once
/// [Runner::poll] observes the worker has finished, or once [Runner::stop]
/// has blocked for it to finish. Exactly one datum crosses the thread
/// boundary while a search is in flight: `cancel`, an `Arc<AtomicBool>`
/// read with `Acquire` and written with `Release` ordering.
pub struct Runner<R, O, E, P, RC, C>
where
    R: Rule + Send + 'static,
    R::Move: Send + 'static,
    O: Reorder<R> + Send + 'static,
    E: Evaluator<R> + Send + 'static,
    P: RecursionPolicy + Send + 'static,
    RC: RootChooser<R::Move> + Send + 'static,
    C: Chooser<R::Move> + Send + 'static,
{
    initial_rule: R,
    algorithm: Option<Algorithm<R, O, E, P, RC, C>>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    result_rx: Option<Receiver<WorkerOutput<R, O, E, P, RC, C>>>,
    interactive_tx: Option<SyncSender<Option<R::Move>>>,
    pending_apply: Option<R::Move>,
    pending_opponent: Option<R::Move>,
    accumulated_duration: Duration,
    start_instant: Option<Instant>,
}

impl<R, O, E, P, RC, C> Runner<R, O, E, P, RC, C>
where
    R: Rule + Send + 'static,
    R::Move: Send + 'static,
    O: Reorder<R> + Send + 'static,
    E: Evaluator<R> + Send + 'static,
    P: RecursionPolicy + Send + 'static,
    RC: RootChooser<R::Move> + Send + 'static,
    C: Chooser<R::Move> + Send + 'static,
{
    pub fn new(initial_rule: R, algorithm: Algorithm<R, O, E, P, RC, C>) -> Self {
        let interactive_tx = algorithm.interactive_sender();
        Self {
            initial_rule,
            algorithm: Some(algorithm),
            cancel: Arc::new(AtomicBool::new(false)),
            worker: None,
            result_rx: None,
            interactive_tx,
            pending_apply: None,
            pending_opponent: None,
            accumulated_duration: Duration::ZERO,
            start_instant: None,
        }
    }

    /// `true` between construction/`poll`-returning-a-move/`stop` and the
    /// next `suggest_move` — the only window in which `apply_move`,
    /// `opponent_move`, and `reset` may be called.
    pub fn is_idle(&self) -> bool {
        self.algorithm.is_some()
    }

    /// Total wall-clock time spent actually searching, accumulated across
    /// every completed `suggest_move`/`poll` (or `stop`) cycle.
    pub fn accumulated_duration(&self) -> Duration {
        self.accumulated_duration
    }

    /// Node count (negamax/minimax) or visit count (MCTS) from the most
    /// recently completed search. `0` before any search has completed, or
    /// for the interactive variant.
    pub fn node_count(&self) -> u64 {
        self.algorithm.as_ref().map(Algorithm::node_count).unwrap_or(0)
    }

    /// A read-only snapshot of the algorithm's own rule state, valid only
    /// while `Idle` (between a `poll` that returned a move and the next
    /// `suggest_move`). Used by visualisation consumers per §6.
    pub fn rule(&self) -> Option<&R> {
        self.algorithm.as_ref().map(Algorithm::rule)
    }

    /// Queues the move we just played, to be replayed against the
    /// algorithm's own rule copy at the start of the next search cycle.
    /// Must only be called while `Idle`.
    pub fn apply_move(&mut self, mv: R::Move) {
        debug_assert!(self.is_idle(), "apply_move called while the runner is not Idle");
        self.pending_apply = Some(mv);
    }

    /// Queues the opponent's latest move similarly. Must only be called
    /// while `Idle`.
    pub fn opponent_move(&mut self, mv: R::Move) {
        debug_assert!(self.is_idle(), "opponent_move called while the runner is not Idle");
        self.pending_opponent = Some(mv);
    }

    /// Supplies a human-chosen move to an `Interactive` runner's pending
    /// search. A no-op (logged) for any other algorithm kind.
    pub fn set_move(&mut self, mv: R::Move) {
        match &self.interactive_tx {
            Some(tx) => {
                let _ = tx.send(Some(mv));
            }
            None => warn!("set_move called on a non-interactive runner; ignoring"),
        }
    }

    /// If `Idle`, dispatches a worker that applies any pending moves — in
    /// the order opponent-then-own, per §5's ordering guarantee — then runs
    /// the search to completion or cancellation. Records `start_instant` at
    /// dispatch. A no-op (logged) if already `Running`.
    pub fn suggest_move(&mut self, side: Player) {
        let Some(mut algorithm) = self.algorithm.take() else {
            warn!(?side, "suggest_move called while the runner was already Running");
            return;
        };

        self.cancel.store(false, Ordering::Release);
        let cancel = Arc::clone(&self.cancel);
        let opponent = self.pending_opponent.take();
        let own = self.pending_apply.take();
        let (tx, rx) = sync_channel(1);
        self.result_rx = Some(rx);
        self.start_instant = Some(Instant::now());

        trace!(?side, "dispatching search to worker");
        self.worker = Some(std::thread::spawn(move || {
            if let Some(opp) = opponent {
                algorithm.apply_move(opp, -side);
            }
            if let Some(own) = own {
                algorithm.apply_move(own, side);
            }
            let mv = algorithm.search(side, &cancel);
            // The receiving end only disappears if the Runner itself was
            // dropped mid-search; there is nobody left to report to.
            let _ = tx.send(WorkerOutput { algorithm, mv });
        }));
    }

    /// Returns `Some(move)` exactly once after the worker finishes,
    /// otherwise `None`. Accumulates elapsed time into
    /// `accumulated_duration` on the successful poll.
    pub fn poll(&mut self) -> Option<R::Move> {
        let rx = self.result_rx.as_ref()?;
        match rx.try_recv() {
            Ok(output) => self.finish(output),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join_worker();
                self.result_rx = None;
                None
            }
        }
    }

    /// Sets the cancellation flag and blocks until the worker observes it
    /// and returns. For the interactive variant, also sends the
    /// cancellation sentinel to unblock the pending receive. Idempotent: a
    /// no-op if the runner is already `Idle`.
    pub fn stop(&mut self) {
        if self.worker.is_none() {
            return;
        }
        self.cancel.store(true, Ordering::Release);
        if let Some(tx) = &self.interactive_tx {
            let _ = tx.send(None);
        }
        let Some(rx) = self.result_rx.take() else {
            return;
        };
        match rx.recv() {
            Ok(output) => {
                self.finish_locked(output);
            }
            Err(_) => {
                self.join_worker();
            }
        }
    }

    /// Restores the algorithm's internal state from the initial rule,
    /// clears pending moves, and zeros accumulated duration. Must only be
    /// called while `Idle`.
    pub fn reset(&mut self) {
        debug_assert!(self.is_idle(), "reset called while the runner is not Idle");
        let initial_rule = self.initial_rule.clone();
        if let Some(algorithm) = &mut self.algorithm {
            algorithm.reset(&initial_rule);
        }
        self.pending_apply = None;
        self.pending_opponent = None;
        self.accumulated_duration = Duration::ZERO;
    }

    fn finish(&mut self, output: WorkerOutput<R, O, E, P, RC, C>) -> Option<R::Move> {
        self.finish_locked(output)
    }

    fn finish_locked(&mut self, output: WorkerOutput<R, O, E, P, RC, C>) -> Option<R::Move> {
        self.join_worker();
        self.result_rx = None;
        if let Some(start) = self.start_instant.take() {
            self.accumulated_duration += start.elapsed();
        }
        let cancelled = self.cancel.load(Ordering::Acquire);
        self.algorithm = Some(output.algorithm);
        if cancelled {
            debug!("search was cancelled, discarding the chosen move");
            None
        } else {
            output.mv
        }
    }

    fn join_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twoply_search::minimax::First;
    use twoply_search::reorder::Shuffle;
    use twoply_testkit::tic_tac_toe::TicTacToe;
    use twoply_search::minimax::MaxDepth;

    type NegamaxRunner = Runner<TicTacToe, Shuffle, fn(&TicTacToe, Player) -> f64, MaxDepth, First, twoply_mcts::MostRobust>;

    fn spin<T>(mut poll: impl FnMut() -> Option<T>) -> T {
        loop {
            if let Some(v) = poll() {
                return v;
            }
            std::thread::yield_now();
        }
    }

    #[test]
    fn suggest_move_then_poll_yields_the_winning_move() {
        let mut rule = TicTacToe::new();
        for mv in [0u8, 3, 1, 4] {
            let side = rule.side_to_move();
            rule.apply_move(mv, side);
        }
        let alg = Algorithm::negamax(rule.clone(), 2, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        let mut runner: NegamaxRunner = Runner::new(rule, alg);

        assert!(runner.is_idle());
        runner.suggest_move(Player::P1);
        assert!(!runner.is_idle());
        let mv = spin(|| runner.poll());
        assert_eq!(mv, Some(2));
        assert!(runner.is_idle());
    }

    #[test]
    fn stop_unblocks_an_in_flight_search_and_returns_to_idle() {
        let rule = TicTacToe::new();
        let alg = Algorithm::negamax(rule.clone(), 9, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        let mut runner: NegamaxRunner = Runner::new(rule, alg);

        runner.suggest_move(Player::P1);
        runner.stop();
        assert!(runner.is_idle());
    }

    #[test]
    fn reset_restores_initial_rule_and_zeros_duration() {
        let rule = TicTacToe::new();
        let alg = Algorithm::negamax(rule.clone(), 1, Shuffle::from_seed(1), TicTacToe::trivial_estimate);
        let mut runner: NegamaxRunner = Runner::new(rule, alg);

        runner.apply_move(0);
        runner.suggest_move(Player::P1);
        spin(|| runner.poll());
        assert_eq!(runner.rule().unwrap().board()[0], Player::P1);

        runner.reset();
        assert_eq!(runner.rule().unwrap().board(), TicTacToe::new().board());
        assert_eq!(runner.accumulated_duration(), Duration::ZERO);
    }

    #[test]
    fn interactive_set_move_is_delivered_to_the_worker() {
        let rule = TicTacToe::new();
        let alg = Algorithm::interactive(rule.clone());
        let mut runner: Runner<TicTacToe, Shuffle, fn(&TicTacToe, Player) -> f64, MaxDepth, First, twoply_mcts::MostRobust> =
            Runner::new(rule, alg);

        runner.suggest_move(Player::P1);
        runner.set_move(5);
        let mv = spin(|| runner.poll());
        assert_eq!(mv, Some(5));
    }

    #[test]
    fn interactive_stop_unblocks_without_a_supplied_move() {
        let rule = TicTacToe::new();
        let alg = Algorithm::interactive(rule.clone());
        let mut runner: Runner<TicTacToe, Shuffle, fn(&TicTacToe, Player) -> f64, MaxDepth, First, twoply_mcts::MostRobust> =
            Runner::new(rule, alg);

        runner.suggest_move(Player::P1);
        runner.stop();
        assert!(runner.is_idle());
    }
}
