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

use crate::node::Node;

/// Picks a root move from the root's expanded children once the search
/// budget is spent.
pub trait Chooser<M> {
    /// Returns the index into `children` of the chosen move. Only called
    /// with a non-empty slice.
    fn choose(&self, children: &[Node<M>]) -> usize;
}

/// The "most-robust" move: the child with the greatest visit count,
/// breaking ties in favour of the earlier child. This is the only chooser
/// the contract mandates.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostRobust;

impl<M> Chooser<M> for MostRobust {
    fn choose(&self, children: &[Node<M>]) -> usize {
        children
            .iter()
            .enumerate()
            .max_by_key(|(_, child)| child.denominator)
            .map(|(i, _)| i)
            .expect("choose is only called with at least one child")
    }
}

/// The child with the greatest mean reward, regardless of visit count.
/// Permitted by the contract as an alternative to [MostRobust] but not
/// mandatory; exposed for callers who want it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostRewarding;

impl<M> Chooser<M> for MostRewarding {
    fn choose(&self, children: &[Node<M>]) -> usize {
        children
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.mean().partial_cmp(&b.mean()).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .expect("choose is only called with at least one child")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_robust_picks_highest_visit_count() {
        let mut a = Node::new(1u8);
        a.denominator = 3;
        let mut b = Node::new(2u8);
        b.denominator = 9;
        let c = Node::new(3u8);
        let children = [a, b, c];
        assert_eq!(MostRobust.choose(&children), 1);
    }

    #[test]
    fn most_rewarding_picks_highest_mean() {
        let mut a = Node::new(1u8);
        a.denominator = 10;
        a.numerator = 1.0;
        let mut b = Node::new(2u8);
        b.denominator = 2;
        b.numerator = 1.8;
        let children = [a, b];
        assert_eq!(MostRewarding.choose(&children), 1);
    }
}
