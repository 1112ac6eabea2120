use mas::generate::{generate_ranked_instance, random_problem, write_solution};
use mas::search::{solve, SearchConfig};
use mas::validate::{
    check_order, diagnose_file, load_solution_file, validate_instance_file, INSTANCE_OK,
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Options {
    positional: Vec<String>,
    cfg: SearchConfig,
    seed: Option<u64>,
    p: Option<f64>,
    instance: Option<String>,
    solution: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        usage_and_exit(2)
    };
    if command == "--help" || command == "-h" {
        usage_and_exit(0);
    }
    let opts = parse_options(&args[2..]);

    let code = match command.as_str() {
        "validate" => cmd_validate(&opts),
        "solve" => cmd_solve(&opts),
        "generate" => cmd_generate(&opts),
        "random" => cmd_random(&opts),
        "check" => cmd_check(&opts),
        _ => usage_and_exit(2),
    };
    std::process::exit(code);
}

fn parse_options(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--max-vertices" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                opts.cfg.max_vertices = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--parallel" => {
                opts.cfg.parallel = true;
                i += 1;
            }
            "--seed" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                opts.seed = Some(v.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--p" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                let p: f64 = v.parse().unwrap_or_else(|_| usage_and_exit(2));
                if !(0.0..=1.0).contains(&p) {
                    usage_and_exit(2);
                }
                opts.p = Some(p);
                i += 2;
            }
            "--instance" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                opts.instance = Some(v.clone());
                i += 2;
            }
            "--solution" => {
                let v = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                opts.solution = Some(v.clone());
                i += 2;
            }
            "--help" | "-h" => usage_and_exit(0),
            s if s.starts_with("--") => usage_and_exit(2),
            s => {
                opts.positional.push(s.to_string());
                i += 1;
            }
        }
    }
    opts
}

fn single_positional(opts: &Options) -> &str {
    match opts.positional.as_slice() {
        [one] => one.as_str(),
        _ => usage_and_exit(2),
    }
}

fn seeded_rng(opts: &Options) -> XorShiftRng {
    let seed = opts.seed.unwrap_or_else(rand::random);
    info!(seed, "instance rng seeded");
    XorShiftRng::seed_from_u64(seed)
}

/// Parses the order argument; generated files must stay inside the instance grammar.
fn order_arg(opts: &Options) -> usize {
    let n: usize = single_positional(opts)
        .parse()
        .unwrap_or_else(|_| usage_and_exit(2));
    check_order(n).unwrap_or_else(|e| {
        eprintln!("{e}");
        usage_and_exit(2)
    })
}

fn cmd_validate(opts: &Options) -> i32 {
    let diagnostic = diagnose_file(single_positional(opts));
    println!("{diagnostic}");
    i32::from(diagnostic != INSTANCE_OK)
}

fn cmd_solve(opts: &Options) -> i32 {
    let problem = match validate_instance_file(single_positional(opts)) {
        Ok(p) => p,
        Err(e) => {
            println!("{e}");
            return 1;
        }
    };
    match solve(&problem, &opts.cfg) {
        Ok(best) => {
            if let Err(e) = write_solution(std::io::stdout().lock(), &best.ordering) {
                eprintln!("Solve FAILED: {e}");
                return 1;
            }
            println!(
                "forward edges: {} / {} (feedback arcs: {})",
                best.score,
                problem.edge_count(),
                best.feedback_arcs(problem.edge_count())
            );
            0
        }
        Err(e) => {
            eprintln!("Solve FAILED: {e}");
            1
        }
    }
}

fn cmd_generate(opts: &Options) -> i32 {
    let n = order_arg(opts);
    let mut rng = seeded_rng(opts);
    let inst = generate_ranked_instance(n, &mut rng);
    let instance = opts.instance.as_deref().unwrap_or("instance1.txt");
    let solution = opts.solution.as_deref().unwrap_or("solution.txt");
    match inst.save(instance, solution) {
        Ok(()) => {
            println!("wrote {instance} and {solution}");
            0
        }
        Err(e) => {
            eprintln!("Generate FAILED: {e}");
            1
        }
    }
}

fn cmd_random(opts: &Options) -> i32 {
    let n = order_arg(opts);
    let mut rng = seeded_rng(opts);
    let problem = random_problem(n, opts.p.unwrap_or(0.5), &mut rng);
    let instance = opts.instance.as_deref().unwrap_or("instance1.txt");
    match problem.save_instance(instance) {
        Ok(()) => {
            println!("wrote {instance}");
            0
        }
        Err(e) => {
            eprintln!("Random FAILED: {e}");
            1
        }
    }
}

fn cmd_check(opts: &Options) -> i32 {
    let [instance, solution] = opts.positional.as_slice() else {
        usage_and_exit(2)
    };
    let result = validate_instance_file(instance).and_then(|problem| {
        let ranking = load_solution_file(solution, problem.size())?;
        Ok((problem, ranking))
    });
    let (problem, ranking) = match result {
        Ok(pair) => pair,
        Err(e) => {
            println!("{e}");
            return 1;
        }
    };
    match problem.forward_edge_count(&ranking) {
        Ok(forward) => {
            println!("forward edges: {forward} / {}", problem.edge_count());
            0
        }
        Err(e) => {
            eprintln!("Check FAILED: {e}");
            1
        }
    }
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  mas validate INSTANCE\n  mas solve INSTANCE [--max-vertices N] [--parallel]\n  mas generate N [--seed SEED] [--instance PATH] [--solution PATH]\n  mas random N [--p P] [--seed SEED] [--instance PATH]\n  mas check INSTANCE SOLUTION\n\nOptions:\n  --max-vertices N   Refuse instances larger than N (default: 10)\n  --parallel         Split the search across top-level branches\n  --seed SEED        Deterministic generator seed (optional)\n  --p P              Edge probability for `random` (default: 0.5)\n  --instance PATH    Instance output path (default: instance1.txt)\n  --solution PATH    Solution output path (default: solution.txt)\n\nLogging is controlled with RUST_LOG (default: info).\n"
    );
    std::process::exit(code)
}
