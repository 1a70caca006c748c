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

/// One node of a recorded minimax search tree, appended to a flat vector
/// owned by the [super::Minimax] engine and never individually freed. The
/// root has `mv = None`.
#[derive(Debug, Clone, Copy)]
pub struct Vertex<M> {
    pub mv: Option<M>,
    pub value: f64,
    pub child_count: usize,
    pub best_move: Option<M>,
}

impl<M> Vertex<M> {
    pub fn new(mv: Option<M>) -> Self {
        Self { mv, value: 0.0, child_count: 0, best_move: None }
    }
}
