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

//! Pairs two [twoply_runtime::EngineRunner]s over a shared rule and plays a
//! configurable number of rounds to completion, accumulating win/draw/loss
//! totals and per-round reports.

mod config;
mod harness;
mod report;

pub use config::ArenaConfig;
pub use harness::play_match;
pub use report::{ArenaResult, RoundReport, RunnerTotals};
