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

//! Monte Carlo Tree Search over an abstract [twoply_core::Rule]: select,
//! expand, simulate, backpropagate, with a persistent root reused across
//! moves via [engine::Mcts::apply_move].

pub mod chooser;
pub mod engine;
pub mod node;

pub use chooser::{Chooser, MostRobust, MostRewarding};
pub use engine::{Mcts, MctsConfig, DEFAULT_EXPLORATION_CONSTANT};
pub use node::Node;
