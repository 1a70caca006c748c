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

/// Decides, at each recorded-tree node, whether to stop descending and
/// evaluate the node as a leaf.
///
/// `depth_remaining` is the plies-to-go counter threaded down from the
/// initial call; `vertices_recorded` is the current length of the engine's
/// recorded-vertex vector. A policy is free to ignore either signal.
pub trait RecursionPolicy {
    fn should_terminate(&self, depth_remaining: usize, vertices_recorded: usize) -> bool;

    /// The `depth_remaining` value to pass to a child call. Defaults to
    /// decrementing by one, which is what a depth-bounded policy wants;
    /// policies that don't use depth at all may leave it unchanged.
    fn child_depth(&self, depth_remaining: usize) -> usize {
        depth_remaining.saturating_sub(1)
    }
}

/// Stop once `depth_remaining` reaches zero. Equivalent to negamax's fixed
/// depth bound.
pub struct MaxDepth(pub usize);

impl RecursionPolicy for MaxDepth {
    fn should_terminate(&self, depth_remaining: usize, _vertices_recorded: usize) -> bool {
        depth_remaining == 0
    }
}

/// Stop once the total number of recorded vertices has reached `v`. Counts
/// only vertices that actually get recorded, not every recursive call —
/// a call that returns early via the terminal/cutoff paths before recording
/// does not count against the budget.
pub struct MaxVertices(pub usize);

impl RecursionPolicy for MaxVertices {
    fn should_terminate(&self, _depth_remaining: usize, vertices_recorded: usize) -> bool {
        vertices_recorded >= self.0
    }

    fn child_depth(&self, depth_remaining: usize) -> usize {
        depth_remaining
    }
}

/// Tunable knobs for a recorded minimax search, decoupled from the concrete
/// `RecursionPolicy`/`RootChooser` pair an engine is built with so a caller
/// can hold one independent of those type parameters (e.g. from parsed CLI
/// arguments). `max_vertices` pairs with [MaxVertices]; `bucket_width` pairs
/// with [super::EpsilonBucket].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimaxConfig {
    pub max_vertices: usize,
    pub bucket_width: f64,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self { max_vertices: 280_000, bucket_width: 1.00 }
    }
}
