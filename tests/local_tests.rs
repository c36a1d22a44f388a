//! Local search integration tests on N-Queens.

use sealgo::core::{HeuristicProblem, SearchError, SearchProblem};
use sealgo::local::{
    AnnealingConfig, BeamConfig, FirstChoiceHillClimbing, GeneticAlgorithm, GeneticConfig,
    HillClimbing, LocalBeamSearch, LocalConfig, LocalSearch, RandomRestart, RestartConfig,
    SimulatedAnnealing,
};
use sealgo::problems::NQueens;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Hill Climbing Tests
// =============================================================================

#[test]
fn test_hill_climbing_success_means_goal() {
    for seed in 0..20 {
        let queens = NQueens::new(8, seed).unwrap();
        let mut climber = HillClimbing::new(&queens, LocalConfig::default()).unwrap();
        let solved = climber.search();

        assert_eq!(solved, queens.is_goal(climber.state()), "seed {seed}");
        assert!(queens.heuristic(climber.state()) <= queens.heuristic(&queens.initial_state()));
    }
}

#[test]
fn test_hill_climbing_stops_at_local_minimum() {
    let queens = NQueens::new(8, 3).unwrap();
    let mut climber = HillClimbing::new(&queens, LocalConfig::default()).unwrap();
    climber.search();

    let state = climber.state().clone();
    let h = queens.heuristic(&state);
    for action in queens.actions(&state) {
        let next = queens.result(&state, &action);
        assert!(queens.heuristic(&next) >= h);
    }
}

#[test]
fn test_beam_of_one_matches_hill_climbing() {
    for seed in 0..10 {
        let queens = NQueens::new(8, seed).unwrap();
        let config = LocalConfig::default().with_seed(seed);

        let mut climber = HillClimbing::new(&queens, config.clone()).unwrap();
        let mut beam =
            LocalBeamSearch::new(&queens, config, BeamConfig::default().with_beam_width(1))
                .unwrap();

        assert_eq!(climber.search(), beam.search(), "seed {seed}");
        assert_eq!(climber.state(), beam.state(), "seed {seed}");
        assert_eq!(climber.cost(), beam.cost(), "seed {seed}");
    }
}

#[test]
fn test_beam_state_is_best_member() {
    let queens = NQueens::new(8, 11).unwrap();
    let mut beam = LocalBeamSearch::new(
        &queens,
        LocalConfig::default(),
        BeamConfig::default().with_beam_width(8),
    )
    .unwrap();
    let solved = beam.search();

    assert_eq!(solved, queens.is_goal(beam.state()));
    assert!(beam.members().count() <= 8);
    let best = queens.heuristic(beam.state());
    assert!(beam.members().all(|s| queens.heuristic(s) >= best));
}

// =============================================================================
// Random Restart Tests
// =============================================================================

#[test]
fn test_random_restart_solves_eight_queens() {
    init_tracing();
    let mut solved_runs = 0;
    for seed in 0..20 {
        let queens = NQueens::new(8, seed).unwrap();
        let climber = HillClimbing::new(&queens, LocalConfig::default()).unwrap();
        let config = RestartConfig::default().with_restarts(100).with_seed(seed);
        let mut restart = RandomRestart::new(&queens, climber, config).unwrap();

        let solved = restart.search();
        assert_eq!(solved, queens.is_goal(restart.state()), "seed {seed}");
        if solved {
            solved_runs += 1;
        }
    }
    assert!(solved_runs >= 18, "only {solved_runs} of 20 experiments solved");
}

#[test]
fn test_random_restart_stop_on_success() {
    let queens = NQueens::new(8, 5).unwrap();
    let config = RestartConfig::default().with_restarts(200).with_seed(5);

    let climber = HillClimbing::new(&queens, LocalConfig::default()).unwrap();
    let mut exhaustive = RandomRestart::new(&queens, climber, config.clone()).unwrap();
    let climber = HillClimbing::new(&queens, LocalConfig::default()).unwrap();
    let mut eager =
        RandomRestart::new(&queens, climber, config.with_stop_on_success(true)).unwrap();

    assert!(exhaustive.search());
    assert!(eager.search());
    assert!(eager.stats().iterations <= exhaustive.stats().iterations);
    // Keeping the cheapest success can only lower the reported cost
    assert!(exhaustive.cost() <= eager.cost());
}

#[test]
fn test_random_restart_rejects_other_problem() {
    let queens = NQueens::new(8, 1).unwrap();
    let twin = NQueens::new(8, 1).unwrap();
    let climber = HillClimbing::new(&twin, LocalConfig::default()).unwrap();

    let err = RandomRestart::new(&queens, climber, RestartConfig::default())
        .err()
        .unwrap();
    assert_eq!(err, SearchError::ProblemMismatch);
}

#[test]
fn test_random_restart_is_reproducible() {
    let queens = NQueens::new(8, 9).unwrap();
    let run = || {
        let climber = HillClimbing::new(&queens, LocalConfig::default()).unwrap();
        let config = RestartConfig::default().with_restarts(30).with_seed(77);
        let mut restart = RandomRestart::new(&queens, climber, config).unwrap();
        let solved = restart.search();
        (solved, restart.state().clone(), restart.cost())
    };
    assert_eq!(run(), run());
}

// =============================================================================
// Stochastic Tests
// =============================================================================

#[test]
fn test_simulated_annealing_solves_some_boards() {
    let mut solved_runs = 0;
    for seed in 0..10 {
        let queens = NQueens::new(8, seed).unwrap();
        let config = LocalConfig::default().with_max_iter(20_000).with_seed(seed);
        let mut annealer =
            SimulatedAnnealing::annealing(&queens, config, AnnealingConfig::default()).unwrap();

        let solved = annealer.search();
        assert_eq!(solved, queens.is_goal(annealer.state()), "seed {seed}");
        if solved {
            solved_runs += 1;
        }
    }
    assert!(solved_runs >= 1);
}

#[test]
fn test_simulated_annealing_cools_down() {
    let queens = NQueens::new(8, 2).unwrap();
    let config = LocalConfig::default().with_max_iter(50);
    let schedule = AnnealingConfig::default().with_alpha(0.5);
    let mut annealer = SimulatedAnnealing::annealing(&queens, config, schedule).unwrap();

    let before = annealer.temperature();
    annealer.search();
    assert!(annealer.temperature() < before);

    annealer.reset(queens.initial_state());
    assert_eq!(annealer.temperature(), before);
    assert_eq!(annealer.cost(), 0.0);
}

#[test]
fn test_first_choice_never_moves_uphill() {
    let queens = NQueens::new(8, 4).unwrap();
    let mut climber = FirstChoiceHillClimbing::first_choice(
        &queens,
        LocalConfig::default().with_max_iter(5_000),
    )
    .unwrap();
    climber.search();

    assert!(queens.heuristic(climber.state()) <= queens.heuristic(&queens.initial_state()));
    assert_eq!(climber.stats().accepted + climber.stats().rejected, climber.stats().iterations);
}

#[test]
fn test_stochastic_runs_are_seeded() {
    let queens = NQueens::new(8, 6).unwrap();
    let run = |seed| {
        let config = LocalConfig::default().with_seed(seed);
        let mut climber = FirstChoiceHillClimbing::first_choice(&queens, config).unwrap();
        climber.search();
        climber.state().clone()
    };
    assert_eq!(run(1), run(1));
}

// =============================================================================
// Genetic Algorithm Tests
// =============================================================================

#[test]
fn test_genetic_algorithm_solves_four_queens() {
    let mut solved_runs = 0;
    for seed in 0..5 {
        let queens = NQueens::new(4, seed).unwrap();
        let config = LocalConfig::default().with_max_iter(200).with_seed(seed);
        let genetic = GeneticConfig::default().with_mutation_rate(0.2);
        let mut ga = GeneticAlgorithm::new(&queens, config, genetic).unwrap();

        let solved = ga.search();
        assert_eq!(solved, queens.is_goal(ga.state()));
        assert_eq!(ga.cost(), ga.generations() as f64);
        if solved {
            solved_runs += 1;
        }
    }
    assert!(solved_runs >= 1);
}

#[test]
fn test_elitism_never_loses_the_best() {
    let queens = NQueens::new(8, 12).unwrap();
    let config = LocalConfig::default().with_max_iter(1);
    let genetic = GeneticConfig::default().with_elitism(2);
    let mut ga = GeneticAlgorithm::new(&queens, config, genetic).unwrap();

    let mut best = queens.heuristic(ga.state());
    for _ in 0..20 {
        ga.search();
        let h = queens.heuristic(ga.state());
        assert!(h <= best);
        best = h;
    }
}

#[test]
fn test_genetic_population_size() {
    let queens = NQueens::new(6, 0).unwrap();
    let genetic = GeneticConfig::default().with_pop_size(12);
    let mut ga = GeneticAlgorithm::new(&queens, LocalConfig::default().with_max_iter(5), genetic)
        .unwrap();
    ga.search();
    assert_eq!(ga.population().count(), 12);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let queens = NQueens::new(8, 0).unwrap();
    assert!(HillClimbing::new(&queens, LocalConfig::default().with_max_iter(0)).is_err());
    assert!(LocalBeamSearch::new(
        &queens,
        LocalConfig::default(),
        BeamConfig::default().with_beam_width(0)
    )
    .is_err());
    assert!(GeneticAlgorithm::new(
        &queens,
        LocalConfig::default(),
        GeneticConfig::default().with_mutation_rate(1.5)
    )
    .is_err());
    assert!(SimulatedAnnealing::annealing(
        &queens,
        LocalConfig::default(),
        AnnealingConfig::default().with_alpha(0.0)
    )
    .is_err());
}
