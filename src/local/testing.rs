//! One-dimensional landscape used by the local search unit tests.

use crate::core::{GeneticProblem, HeuristicProblem, SearchProblem, SearchRng};

/// Positions `0..heights.len()`, moves of one step left or right, goal where
/// the height is zero.
pub(crate) struct Landscape {
    pub heights: Vec<f64>,
    pub start: usize,
}

impl Landscape {
    pub fn new(heights: &[f64], start: usize) -> Self {
        Self {
            heights: heights.to_vec(),
            start,
        }
    }
}

impl SearchProblem for Landscape {
    type State = usize;
    type Action = isize;

    fn initial_state(&self) -> usize {
        self.start
    }

    fn actions(&self, state: &usize) -> Vec<isize> {
        let mut moves = Vec::new();
        if *state > 0 {
            moves.push(-1);
        }
        if state + 1 < self.heights.len() {
            moves.push(1);
        }
        moves
    }

    fn result(&self, state: &usize, action: &isize) -> usize {
        state.saturating_add_signed(*action)
    }

    fn is_goal(&self, state: &usize) -> bool {
        self.heights[*state] == 0.0
    }
}

impl HeuristicProblem for Landscape {
    fn heuristic(&self, state: &usize) -> f64 {
        self.heights[*state]
    }

    fn sample_state(&self, rng: &mut SearchRng) -> usize {
        rng.gen_range(0..self.heights.len())
    }
}

impl GeneticProblem for Landscape {
    fn crossover(&self, a: &usize, b: &usize, _rng: &mut SearchRng) -> usize {
        (a + b) / 2
    }

    fn mutate(&self, _state: &usize, rng: &mut SearchRng) -> usize {
        rng.gen_range(0..self.heights.len())
    }
}
