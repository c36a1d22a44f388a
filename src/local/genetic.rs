//! Genetic algorithm.
//!
//! The engine only does selection and replacement. Crossover and mutation
//! are supplied by the problem through [`GeneticProblem`].

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::core::{GeneticProblem, SearchResult, SearchRng, SearchStats};

use super::config::{GeneticConfig, LocalConfig};
use super::LocalSearch;

/// Generational genetic algorithm with fitness-proportional selection.
///
/// Fitness is `1 / (1 + h)` with negative heuristics clamped to zero. Each
/// generation copies the `elitism` best members, then fills the rest of the
/// population with children of two parents drawn with replacement.
///
/// `cost()` is the number of generations run since the last reset, and
/// `state()` the best member (a goal member if there is one).
pub struct GeneticAlgorithm<'p, P: GeneticProblem> {
    problem: &'p P,
    config: LocalConfig,
    genetic: GeneticConfig,
    rng: SearchRng,
    population: Vec<(P::State, f64)>,
    best: usize,
    generations: u64,
    stats: SearchStats,
}

impl<'p, P: GeneticProblem> GeneticAlgorithm<'p, P> {
    /// Seed the population with the initial state and sampled states.
    pub fn new(problem: &'p P, config: LocalConfig, genetic: GeneticConfig) -> SearchResult<Self> {
        config
            .validate()
            .and_then(|()| genetic.validate())
            .inspect_err(|e| warn!(%e, "rejected genetic algorithm config"))?;

        let mut ga = Self {
            problem,
            rng: SearchRng::new(config.seed),
            config,
            genetic,
            population: Vec::new(),
            best: 0,
            generations: 0,
            stats: SearchStats::default(),
        };
        ga.reset(problem.initial_state());
        Ok(ga)
    }

    /// Current population in no particular order.
    pub fn population(&self) -> impl Iterator<Item = &P::State> {
        self.population.iter().map(|(state, _)| state)
    }

    #[must_use]
    pub fn generations(&self) -> u64 {
        self.generations
    }

    fn fitness(h: f64) -> f64 {
        1.0 / (1.0 + h.max(0.0))
    }

    /// Index of a goal member, else of the lowest heuristic (first on ties).
    fn select_best(&self) -> usize {
        let problem = self.problem;
        if let Some(i) = self.population.iter().position(|(s, _)| problem.is_goal(s)) {
            return i;
        }
        let mut best = 0;
        for (i, (_, h)) in self.population.iter().enumerate() {
            if *h < self.population[best].1 {
                best = i;
            }
        }
        best
    }

    fn pick_parent(&mut self, weights: &[f64]) -> usize {
        match self.rng.choose_weighted(weights) {
            Some(i) => i,
            None => self.rng.gen_range(0..weights.len()),
        }
    }

    fn next_generation(&mut self) {
        let problem = self.problem;
        let size = self.genetic.pop_size;
        let weights: Vec<f64> = self.population.iter().map(|(_, h)| Self::fitness(*h)).collect();

        let mut next = Vec::with_capacity(size);
        if self.genetic.elitism > 0 {
            let mut ranked: Vec<usize> = (0..self.population.len()).collect();
            ranked.sort_by(|&a, &b| self.population[a].1.total_cmp(&self.population[b].1));
            next.extend(
                ranked
                    .into_iter()
                    .take(self.genetic.elitism)
                    .map(|i| self.population[i].clone()),
            );
        }

        while next.len() < size {
            let a = self.pick_parent(&weights);
            let b = self.pick_parent(&weights);
            let mut child =
                problem.crossover(&self.population[a].0, &self.population[b].0, &mut self.rng);
            if self.rng.gen_bool(self.genetic.mutation_rate) {
                child = problem.mutate(&child, &mut self.rng);
            }
            let h = problem.heuristic(&child);
            next.push((child, h));
        }

        self.stats.nodes_generated += (size - self.genetic.elitism) as u64;
        self.population = next;
        self.best = self.select_best();
    }
}

impl<P: GeneticProblem> LocalSearch for GeneticAlgorithm<'_, P> {
    type Problem = P;

    fn search(&mut self) -> bool {
        let start = Instant::now();
        self.stats.reset();
        let problem = self.problem;

        for _ in 0..self.config.max_iter {
            if problem.is_goal(&self.population[self.best].0) {
                break;
            }
            self.next_generation();
            self.generations += 1;
            self.stats.iterations += 1;
            trace!(
                generation = self.generations,
                best = self.population[self.best].1,
                "generation finished"
            );
        }

        let solved = problem.is_goal(&self.population[self.best].0);
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            solved,
            generations = self.generations,
            best = self.population[self.best].1,
            pop_size = self.genetic.pop_size,
            "genetic algorithm finished"
        );
        solved
    }

    fn state(&self) -> &P::State {
        &self.population[self.best].0
    }

    fn cost(&self) -> f64 {
        self.generations as f64
    }

    /// Restart with `state` plus freshly sampled members.
    fn reset(&mut self, state: P::State) {
        let problem = self.problem;
        self.population.clear();
        let h = problem.heuristic(&state);
        self.population.push((state, h));
        while self.population.len() < self.genetic.pop_size {
            let sampled = problem.sample_state(&mut self.rng);
            let h = problem.heuristic(&sampled);
            self.population.push((sampled, h));
        }
        self.generations = 0;
        self.best = self.select_best();
    }

    fn problem(&self) -> &P {
        self.problem
    }

    fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HeuristicProblem, SearchProblem};
    use crate::local::testing::Landscape;

    fn land() -> Landscape {
        Landscape::new(&[5.0, 4.0, 3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0, 4.0], 0)
    }

    #[test]
    fn test_finds_goal() {
        let land = land();
        let mut ga = GeneticAlgorithm::new(&land, LocalConfig::default(), GeneticConfig::default())
            .unwrap();

        assert!(ga.search());
        assert!(land.is_goal(ga.state()));
        assert_eq!(ga.cost(), ga.generations() as f64);
    }

    #[test]
    fn test_population_size_constant() {
        let land = land();
        let genetic = GeneticConfig::default().with_pop_size(6);
        let config = LocalConfig::default().with_max_iter(3);
        let mut ga = GeneticAlgorithm::new(&land, config, genetic).unwrap();

        assert_eq!(ga.population().count(), 6);
        ga.search();
        assert_eq!(ga.population().count(), 6);
    }

    #[test]
    fn test_elitism_never_loses_best() {
        // Goal unreachable: the best heuristic can only stay or improve
        let land = Landscape::new(&[5.0, 4.0, 3.0, 2.0, 1.0, 2.0], 0);
        let genetic = GeneticConfig::default().with_pop_size(4).with_elitism(1);
        let config = LocalConfig::default().with_max_iter(1).with_seed(3);
        let mut ga = GeneticAlgorithm::new(&land, config, genetic).unwrap();

        let mut previous = land.heuristic(ga.state());
        for _ in 0..20 {
            assert!(!ga.search());
            let current = land.heuristic(ga.state());
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(ga.generations(), 20);
    }

    #[test]
    fn test_same_seed_same_run() {
        let land = land();
        let run = || {
            let config = LocalConfig::default().with_seed(11).with_max_iter(5);
            let mut ga = GeneticAlgorithm::new(&land, config, GeneticConfig::default().with_pop_size(4))
                .unwrap();
            ga.search();
            ga.population().copied().collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_reset_clears_generations() {
        let land = land();
        let config = LocalConfig::default().with_max_iter(2);
        let genetic = GeneticConfig::default().with_pop_size(3).with_mutation_rate(0.0);
        let mut ga = GeneticAlgorithm::new(&land, config, genetic).unwrap();
        ga.search();

        ga.reset(5);
        assert_eq!(ga.cost(), 0.0);
        assert_eq!(*ga.state(), 5);
    }
}
