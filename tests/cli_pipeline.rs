//! End-to-end: generate an instance on disk, validate it, solve it, check the ranking.

use mas::prelude::*;
use mas::validate::{diagnose_file, load_solution_file};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use std::fs;
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mas_it_{}_{name}", std::process::id()))
}

#[test]
fn generated_instance_round_trips_and_solves_to_known_optimum() {
    let instance = scratch("instance.txt");
    let solution = scratch("solution.txt");
    let mut rng = XorShiftRng::seed_from_u64(2024);
    let inst = generate_ranked_instance(7, &mut rng);
    inst.save(&instance, &solution).unwrap();

    assert_eq!(diagnose_file(&instance), "instance ok");
    let problem = validate_instance_file(&instance).unwrap();
    assert_eq!(problem, inst.problem);

    let ideal = load_solution_file(&solution, problem.size()).unwrap();
    assert_eq!(ideal, inst.ideal);

    let best = solve(&problem, &SearchConfig::default()).unwrap();
    assert_eq!(best.score, 7 * 6 / 2);
    assert_eq!(problem.forward_edge_count(&ideal).unwrap(), best.score);
    assert_eq!(best.feedback_arcs(problem.edge_count()), 1);

    fs::remove_file(instance).unwrap();
    fs::remove_file(solution).unwrap();
}

#[test]
fn random_instance_survives_file_format() {
    let path = scratch("random.txt");
    let mut rng = XorShiftRng::seed_from_u64(11);
    let problem = random_problem(9, 0.3, &mut rng);
    problem.save_instance(&path).unwrap();

    let loaded = validate_instance_file(&path).unwrap();
    assert_eq!(loaded, problem);
    fs::remove_file(path).unwrap();
}

#[test]
fn malformed_file_is_reported_not_solved() {
    let path = scratch("bad.txt");
    fs::write(&path, "3\n0 1 0\n0 1\n0 0 0\n").unwrap();
    assert_eq!(diagnose_file(&path), "Line 3 must contain N integers.");
    assert_eq!(
        validate_instance_file(&path),
        Err(InstanceError::RowShape { line: 3 })
    );
    fs::remove_file(path).unwrap();
}

#[test]
fn parallel_and_sequential_agree_on_loaded_instance() {
    let problem = validate_instance(
        "6\n0 1 0 1 0 0\n0 0 1 0 0 1\n1 0 0 0 1 0\n0 0 1 0 0 0\n0 1 0 1 0 1\n1 0 0 0 0 0\n",
    )
    .unwrap();
    let sequential = solve_exhaustive(&problem).unwrap();
    let parallel = solve_exhaustive_parallel(&problem).unwrap();
    assert_eq!(sequential, parallel);
    assert!(sequential.score < problem.edge_count());
}

#[test]
fn generated_files_at_order_bounds_pass_validation() {
    use mas::validate::{check_order, MAX_ORDER};

    for n in [1, MAX_ORDER] {
        let instance = scratch(&format!("bound_{n}.txt"));
        let solution = scratch(&format!("bound_{n}_solution.txt"));
        let mut rng = XorShiftRng::seed_from_u64(n as u64);

        let inst = generate_ranked_instance(check_order(n).unwrap(), &mut rng);
        inst.save(&instance, &solution).unwrap();
        assert_eq!(diagnose_file(&instance), "instance ok");
        assert_eq!(load_solution_file(&solution, n).unwrap(), inst.ideal);

        random_problem(n, 0.5, &mut rng).save_instance(&instance).unwrap();
        assert_eq!(diagnose_file(&instance), "instance ok");

        fs::remove_file(instance).unwrap();
        fs::remove_file(solution).unwrap();
    }

    for n in [0, MAX_ORDER + 1] {
        assert_eq!(check_order(n), Err(InstanceError::OrderOutOfRange));
    }
}
