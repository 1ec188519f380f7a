use anyhow::{anyhow, bail};
use tracing::trace;

type Error = anyhow::Error;

const DIGIT_WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

pub fn parse_input(puzzle: &str) -> Result<Vec<&str>, Error> {
    let lines = puzzle.lines().collect::<Vec<_>>();
    if lines.is_empty() {
        bail!("no calibration lines in input");
    }
    Ok(lines)
}

/// The digit that starts at byte `idx` of `line`, if any.
fn digit_at(line: &str, idx: usize, spelled: bool) -> Option<u32> {
    let rest = &line[idx..];
    if let Some(digit) = rest.chars().next()?.to_digit(10) {
        return Some(digit);
    }
    if !spelled {
        return None;
    }
    DIGIT_WORDS
        .iter()
        .position(|word| rest.starts_with(word))
        .map(|pos| pos as u32 + 1)
}

/// The first and last digit on the line read as a two digit number. Spelled
/// out digits may overlap, so `eightwo` ends in a two.
pub fn calibration_value(line: &str, spelled: bool) -> Result<u32, Error> {
    let mut digits = line
        .char_indices()
        .filter_map(|(idx, _)| digit_at(line, idx, spelled));
    let first = digits
        .next()
        .ok_or_else(|| anyhow!("unable to parse value: {line}"))?;
    let last = digits.last().unwrap_or(first);
    trace!(line, first, last, "calibration value");
    Ok(first * 10 + last)
}

fn sum_calibration_values(lines: &[&str], spelled: bool) -> Result<u32, Error> {
    lines
        .iter()
        .map(|line| calibration_value(line, spelled))
        .sum()
}

pub fn solve_puzzle_part1(lines: &[&str]) -> Result<u32, Error> {
    sum_calibration_values(lines, false)
}

pub fn solve_puzzle_part2(lines: &[&str]) -> Result<u32, Error> {
    sum_calibration_values(lines, true)
}
