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

//! Core data types shared by every search engine: the [Player] tag, the
//! [Rule] and [Evaluator] contracts a concrete game implements, and the
//! error kinds the rest of the workspace surfaces.

pub mod error;
pub mod player;
pub mod rule;

pub use error::EngineError;
pub use player::Player;
pub use rule::{Evaluator, Rule};
