//! Seeds pushed through a chain of interval remapping stages.
//!
//! Both parts share one engine: part 1 treats every seed as a single-value
//! interval, part 2 reads the seeds as `start length` pairs.

mod almanac;
mod interval;
mod remap;

pub use almanac::{parse_input, Almanac, AlmanacError};
pub use interval::Interval;
pub use remap::{
    apply_rule, apply_stage, minimum_lower_bound, run_pipeline, split_by_rules, OverlapError,
    RemapRule, RuleOutcome, Stage,
};

type Error = AlmanacError;

fn lowest_location(almanac: &Almanac, seeds: &[Interval]) -> Result<i64, Error> {
    let locations = run_pipeline(&almanac.stages, seeds);
    minimum_lower_bound(&locations).ok_or(AlmanacError::NoSeeds)
}

/// The lowest location any listed seed ends up at.
pub fn solve_puzzle_part1(almanac: &Almanac) -> Result<i64, Error> {
    lowest_location(almanac, &almanac.seed_points())
}

/// The lowest location reachable from any seed in the listed seed ranges.
pub fn solve_puzzle_part2(almanac: &Almanac) -> Result<i64, Error> {
    lowest_location(almanac, &almanac.seed_ranges()?)
}
