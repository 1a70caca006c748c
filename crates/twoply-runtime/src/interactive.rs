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

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use twoply_core::Rule;

/// The degenerate "algorithm" whose `search` is an external human supplying
/// a move rather than a computation. A promise/future pair collapsed into a
/// bounded single-slot channel: `Interactive::sender` hands out the
/// fulfilling end, `search` is the blocking receive, and a `None` sentinel
/// (sent by [crate::Runner::stop]) is treated as cancellation rather than a
/// move.
pub struct Interactive<R: Rule> {
    rule: R,
    tx: SyncSender<Option<R::Move>>,
    rx: Receiver<Option<R::Move>>,
}

impl<R: Rule> Interactive<R> {
    pub fn new(rule: R) -> Self {
        let (tx, rx) = sync_channel(1);
        Self { rule, tx, rx }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn rule_mut(&mut self) -> &mut R {
        &mut self.rule
    }

    /// A cloneable handle external callers use to supply the human's chosen
    /// move, or to unblock a pending search with the cancellation sentinel.
    pub fn sender(&self) -> SyncSender<Option<R::Move>> {
        self.tx.clone()
    }

    /// Blocks until a move is sent, or returns `None` if the sentinel was
    /// sent or every sender was dropped.
    pub fn search(&mut self) -> Option<R::Move> {
        self.rx.recv().ok().flatten()
    }

    /// Restores the initial rule and opens a fresh channel, discarding any
    /// message left over from a prior, never-completed search.
    pub fn reset(&mut self, rule: R) {
        self.rule = rule;
        let (tx, rx) = sync_channel(1);
        self.tx = tx;
        self.rx = rx;
    }
}
