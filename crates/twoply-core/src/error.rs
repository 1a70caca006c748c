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

use thiserror::Error;

/// Abstract error kinds surfaced by the engine runner and arena harness.
///
/// `SearchCancelled` is deliberately absent: a cancelled search is not an
/// error, it is represented structurally as `poll()` returning `None`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A runner returned a move that was not a member of the current
    /// legal-move set. Fatal for the game in progress.
    #[error("engine returned an illegal move for {side:?}: {description}")]
    IllegalMoveFromEngine { side: String, description: String },

    /// A runner was misconfigured, e.g. two runners declared the same side,
    /// or a runner was asked to move for a side it does not own.
    #[error("engine misconfigured: {0}")]
    EngineMisconfigured(String),

    /// An evaluator returned `NaN`. Search engines recover from this
    /// automatically (see [crate::rule::evaluate_for_side]); this variant
    /// exists so callers that bypass that helper can still report it.
    #[error("evaluator returned NaN for the side to move")]
    DegenerateEvaluator,
}
