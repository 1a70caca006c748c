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

//! Move reordering policies, alpha-beta negamax search, and recorded
//! minimax search over an abstract [twoply_core::Rule].

pub mod minimax;
pub mod negamax;
pub mod reorder;

pub use minimax::Minimax;
pub use negamax::Negamax;
pub use reorder::{Reorder, ReorderByScore, Shuffle};
