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

use twoply_core::{Player, Rule};

use crate::runner::Runner;
use twoply_core::Evaluator;
use twoply_mcts::Chooser;
use twoply_search::minimax::{RecursionPolicy, RootChooser};
use twoply_search::reorder::Reorder;

/// The subset of [Runner]'s operations the arena harness (§4.H, in
/// `twoply-arena`) needs, factored out as a trait so the arena can pair two
/// runners of *different* concrete algorithm kinds (e.g. negamax versus
/// MCTS) without threading all six of [Runner]'s type parameters through
/// its own generic signature twice over. This is the one seam in the
/// workspace where a trait stands in for what would otherwise be a very
/// wide tuple of generics; every call site is still monomorphized per
/// concrete `Runner` type, so it costs nothing at the hot path inside a
/// search — only at the one-call-per-ply granularity the arena operates at.
pub trait EngineRunner<R: Rule> {
    fn suggest_move(&mut self, side: Player);
    fn poll(&mut self) -> Option<R::Move>;
    fn apply_move(&mut self, mv: R::Move);
    fn opponent_move(&mut self, mv: R::Move);
    fn node_count(&self) -> u64;
    fn accumulated_duration(&self) -> Duration;
    fn reset(&mut self);
}

impl<R, O, E, P, RC, C> EngineRunner<R> for Runner<R, O, E, P, RC, C>
where
    R: Rule + Send + 'static,
    R::Move: Send + 'static,
    O: Reorder<R> + Send + 'static,
    E: Evaluator<R> + Send + 'static,
    P: RecursionPolicy + Send + 'static,
    RC: RootChooser<R::Move> + Send + 'static,
    C: Chooser<R::Move> + Send + 'static,
{
    fn suggest_move(&mut self, side: Player) {
        Runner::suggest_move(self, side)
    }

    fn poll(&mut self) -> Option<R::Move> {
        Runner::poll(self)
    }

    fn apply_move(&mut self, mv: R::Move) {
        Runner::apply_move(self, mv)
    }

    fn opponent_move(&mut self, mv: R::Move) {
        Runner::opponent_move(self, mv)
    }

    fn node_count(&self) -> u64 {
        Runner::node_count(self)
    }

    fn accumulated_duration(&self) -> Duration {
        Runner::accumulated_duration(self)
    }

    fn reset(&mut self) {
        Runner::reset(self)
    }
}
