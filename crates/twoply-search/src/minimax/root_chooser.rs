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

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::vertex::Vertex;

/// Picks which of the root's immediate children to actually play, given the
/// recorded vertices for those children. `children` is never empty when
/// called (the engine only calls a chooser once at least one root move was
/// explored).
pub trait RootChooser<M> {
    fn choose(&mut self, children: &[Vertex<M>]) -> usize;
}

/// Takes the front child — the one alpha-beta has already placed first as
/// the best move.
pub struct First;

impl<M> RootChooser<M> for First {
    fn choose(&mut self, _children: &[Vertex<M>]) -> usize {
        0
    }
}

/// Among children within `epsilon` of the best child's value, picks
/// uniformly at random. Bucket membership is `best_value - child.value <=
/// epsilon`; ties are broken stochastically using an owned PRNG.
pub struct EpsilonBucket {
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonBucket {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon, rng: StdRng::from_entropy() }
    }

    pub fn with_seed(epsilon: f64, seed: u64) -> Self {
        Self { epsilon, rng: StdRng::seed_from_u64(seed) }
    }
}

impl<M> RootChooser<M> for EpsilonBucket {
    fn choose(&mut self, children: &[Vertex<M>]) -> usize {
        let best_value = children.iter().map(|v| v.value).fold(f64::NEG_INFINITY, f64::max);
        let bucket: Vec<usize> = children
            .iter()
            .enumerate()
            .filter(|(_, v)| best_value - v.value <= self.epsilon)
            .map(|(i, _)| i)
            .collect();
        bucket[self.rng.gen_range(0..bucket.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(value: f64) -> Vertex<u8> {
        Vertex { mv: Some(0), value, child_count: 0, best_move: None }
    }

    #[test]
    fn first_always_takes_front_child() {
        let children = vec![vertex(5.0), vertex(9.0)];
        assert_eq!(First.choose(&children), 0);
    }

    #[test]
    fn epsilon_bucket_only_picks_near_best() {
        let children = vec![vertex(1.0), vertex(10.0), vertex(9.5)];
        let mut chooser = EpsilonBucket::with_seed(1.0, 42);
        for _ in 0..20 {
            let idx = chooser.choose(&children);
            assert!(idx == 1 || idx == 2, "picked far-from-best child {idx}");
        }
    }

    #[test]
    fn epsilon_bucket_zero_degenerates_to_argmax() {
        let children = vec![vertex(1.0), vertex(10.0), vertex(9.5)];
        let mut chooser = EpsilonBucket::with_seed(0.0, 1);
        assert_eq!(chooser.choose(&children), 1);
    }
}
