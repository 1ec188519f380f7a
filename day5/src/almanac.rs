use crate::interval::Interval;
use crate::remap::{OverlapError, RemapRule, Stage};
use thiserror::Error;
use tracing::trace;

/// Errors from reading an almanac. Line numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlmanacError {
    #[error("expected a 'seeds:' line first")]
    MissingSeeds,
    #[error("the almanac lists no seeds")]
    NoSeeds,
    #[error("line {line}: malformed map header {text:?}")]
    MalformedHeader { line: usize, text: String },
    #[error("line {line}: mapping rule appears before any map header")]
    RuleBeforeHeader { line: usize },
    #[error("line {line}: expected 3 numbers on a rule line, found {found}")]
    WrongFieldCount { line: usize, found: usize },
    #[error("line {line}: {field:?} is not an integer")]
    InvalidNumber { line: usize, field: String },
    #[error("line {line}: mapping rule has zero length")]
    ZeroLengthRule { line: usize },
    #[error("line {line}: mapping rule reaches past the 64-bit integer range")]
    RuleOutOfRange { line: usize },
    #[error(transparent)]
    Overlap(#[from] OverlapError),
    #[error("seed ranges need start/length pairs, found {count} numbers")]
    OddSeedCount { count: usize },
    #[error("seed range starting at {start} has length {length}")]
    EmptySeedRange { start: i64, length: i64 },
    #[error("seed range starting at {start} with length {length} reaches past the 64-bit integer range")]
    SeedRangeOutOfRange { start: i64, length: i64 },
}

type Error = AlmanacError;

/// The seed list and every mapping stage, in the order they were listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    pub seeds: Vec<i64>,
    pub stages: Vec<Stage>,
}

impl Almanac {
    /// Every seed as its own single-value interval.
    pub fn seed_points(&self) -> Vec<Interval> {
        self.seeds.iter().copied().map(Interval::point).collect()
    }

    /// The seed list read as `start length` pairs.
    pub fn seed_ranges(&self) -> Result<Vec<Interval>, Error> {
        let pairs = self.seeds.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(AlmanacError::OddSeedCount {
                count: self.seeds.len(),
            });
        }
        pairs
            .map(|pair| {
                let (start, length) = (pair[0], pair[1]);
                if length < 1 {
                    return Err(AlmanacError::EmptySeedRange { start, length });
                }
                Interval::from_start_len(start, length)
                    .ok_or(AlmanacError::SeedRangeOutOfRange { start, length })
            })
            .collect()
    }
}

fn parse_number(field: &str, line: usize) -> Result<i64, Error> {
    field.parse::<i64>().map_err(|_| AlmanacError::InvalidNumber {
        line,
        field: field.to_string(),
    })
}

/// Returns the map name if `text` is a `<name> map:` header.
fn parse_header(text: &str, line: usize) -> Result<&str, Error> {
    let name = text.strip_suffix(" map:").unwrap_or_default();
    let well_formed =
        !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '-');
    if well_formed {
        Ok(name)
    } else {
        Err(AlmanacError::MalformedHeader {
            line,
            text: text.to_string(),
        })
    }
}

fn parse_rule(text: &str, line: usize) -> Result<RemapRule, Error> {
    let fields = text.split_ascii_whitespace().collect::<Vec<_>>();
    let [dest_start, source_start, length] = fields[..] else {
        return Err(AlmanacError::WrongFieldCount {
            line,
            found: fields.len(),
        });
    };
    let dest_start = parse_number(dest_start, line)?;
    let source_start = parse_number(source_start, line)?;
    let length = parse_number(length, line)?;
    if length < 1 {
        return Err(AlmanacError::ZeroLengthRule { line });
    }
    RemapRule::new(dest_start, source_start, length).ok_or(AlmanacError::RuleOutOfRange { line })
}

/// A stage whose rules are still being collected.
struct PendingStage<'a> {
    name: &'a str,
    rules: Vec<RemapRule>,
}

impl PendingStage<'_> {
    fn finish(self) -> Result<Stage, Error> {
        trace!(stage = self.name, rules = self.rules.len(), "parsed stage");
        Ok(Stage::new(self.name, self.rules)?)
    }
}

pub fn parse_input(puzzle: &str) -> Result<Almanac, Error> {
    let mut lines = puzzle.lines().enumerate().map(|(idx, text)| (idx + 1, text));
    let (seeds_line, seeds_text) = lines.next().ok_or(AlmanacError::MissingSeeds)?;
    let seeds = seeds_text
        .strip_prefix("seeds:")
        .ok_or(AlmanacError::MissingSeeds)?
        .split_ascii_whitespace()
        .map(|field| parse_number(field, seeds_line))
        .collect::<Result<Vec<_>, _>>()?;

    let mut stages = vec![];
    let mut current: Option<PendingStage> = None;
    for (line, text) in lines {
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        // Rule lines start with a number, so a leading letter means a header
        if text.ends_with(':') || text.starts_with(|c: char| c.is_ascii_alphabetic()) {
            let name = parse_header(text, line)?;
            if let Some(done) = current.replace(PendingStage {
                name,
                rules: vec![],
            }) {
                stages.push(done.finish()?);
            }
            continue;
        }
        let rule = parse_rule(text, line)?;
        current
            .as_mut()
            .ok_or(AlmanacError::RuleBeforeHeader { line })?
            .rules
            .push(rule);
    }
    if let Some(done) = current {
        stages.push(done.finish()?);
    }
    Ok(Almanac { seeds, stages })
}
