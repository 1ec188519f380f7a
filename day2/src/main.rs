use day2::{parse_input, solve_puzzle_part1, solve_puzzle_part2};
use parse_ints::input::read_puzzle_from_args;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let puzzle = read_puzzle_from_args(include_str!("../../input/day2.txt"))?;
    let games = parse_input(&puzzle)?;
    let part1 = solve_puzzle_part1(&games);
    let part2 = solve_puzzle_part2(&games);
    println!("{part1},{part2}");
    Ok(())
}
