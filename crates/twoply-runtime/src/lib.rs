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

//! Wraps negamax, recorded minimax, MCTS, or the interactive human variant
//! into a single asynchronous, stoppable [Runner] that dispatches a search
//! on a background worker and surfaces one chosen move (§4.G).

pub mod algorithm;
pub mod engine_runner;
pub mod interactive;
pub mod runner;

pub use algorithm::Algorithm;
pub use engine_runner::EngineRunner;
pub use interactive::Interactive;
pub use runner::Runner;
