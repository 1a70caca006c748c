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

/// One node of the search tree. `mv` is the move that was played to reach
/// this node from its parent; the root's is `None` (Rust has no
/// default-constructed `Move`, so `Option` stands in for the sentinel the
/// original tree used).
///
/// `numerator`/`denominator` are kept relative to the side that moved into
/// this node: higher is better for that side. A node is `expanded` once its
/// children have been generated, even if some of them are still unvisited.
#[derive(Debug, Clone)]
pub struct Node<M> {
    pub mv: Option<M>,
    pub numerator: f64,
    pub denominator: u32,
    pub children: Vec<Node<M>>,
    pub expanded: bool,
}

impl<M> Node<M> {
    pub fn new(mv: M) -> Self {
        Self { mv: Some(mv), numerator: 0.0, denominator: 0, children: Vec::new(), expanded: false }
    }

    pub fn root() -> Self {
        Self { mv: None, numerator: 0.0, denominator: 0, children: Vec::new(), expanded: false }
    }

    /// The mean reward per visit, from this node's own perspective. `0.0`
    /// for an unvisited node.
    pub fn mean(&self) -> f64 {
        if self.denominator == 0 {
            0.0
        } else {
            self.numerator / f64::from(self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_node_has_zero_mean() {
        let node: Node<u8> = Node::new(4);
        assert_eq!(node.mean(), 0.0);
        assert!(!node.expanded);
    }

    #[test]
    fn root_carries_no_move() {
        let root: Node<u8> = Node::root();
        assert_eq!(root.mv, None);
    }
}
