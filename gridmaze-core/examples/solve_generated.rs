use std::env;

use gridmaze_core::{Generator, Solver};

fn main() {
    let mut args = env::args().skip(1).map(|s| s.parse::<u64>());

    let size = match args.next() {
        Some(Ok(size)) => size as usize,
        None => 11,
        Some(Err(err)) => panic!("Expected maze size as the first argument: {err}"),
    };
    let seed = args.next().transpose().expect("Expected seed as the second argument");

    let grid = Generator::new()
        .max_size(size.max(5))
        .generate_seeded(size, seed)
        .unwrap_or_else(|err| panic!("Cannot generate maze: {err}"));
    println!("{grid}");

    let solver = Solver::new(grid).expect("generated mazes always have both markers");
    match solver.solve() {
        Some(path) => {
            println!("Path length: {}\n", path.steps());
            print!("{}", solver.render_solution(&path));
        }
        None => println!("No solution found!"),
    }
}
