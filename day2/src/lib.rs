use anyhow::{anyhow, bail, Context};
use tracing::debug;

type Error = anyhow::Error;

/// The cubes revealed at once. Colors that weren't mentioned count as zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Handful {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl Handful {
    fn fits_within(&self, limit: &Handful) -> bool {
        self.red <= limit.red && self.green <= limit.green && self.blue <= limit.blue
    }

    fn max(self, other: Handful) -> Handful {
        Handful {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: u32,
    pub handfuls: Vec<Handful>,
}

const BAG: Handful = Handful {
    red: 12,
    green: 13,
    blue: 14,
};

// e.g. "3 blue, 4 red"
fn parse_handful(text: &str) -> Result<Handful, Error> {
    let mut handful = Handful::default();
    for count_color in text.split(", ") {
        let (count, color) = count_color
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected '<count> <color>', got {count_color:?}"))?;
        let count = count
            .parse::<u32>()
            .with_context(|| format!("invalid count: {count:?}"))?;
        match color {
            "red" => handful.red = count,
            "green" => handful.green = count,
            "blue" => handful.blue = count,
            _ => bail!("invalid color: {color}"),
        }
    }
    Ok(handful)
}

fn parse_game(line: &str) -> Result<Game, Error> {
    let (id, handfuls) = line
        .strip_prefix("Game ")
        .and_then(|rest| rest.split_once(": "))
        .ok_or_else(|| anyhow!("unable to parse line: {line}"))?;
    let id = id
        .parse::<u32>()
        .with_context(|| format!("invalid game id in line: {line}"))?;
    let handfuls = handfuls
        .split("; ")
        .map(parse_handful)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("in game {id}"))?;
    Ok(Game { id, handfuls })
}

pub fn parse_input(puzzle: &str) -> Result<Vec<Game>, Error> {
    let games = puzzle
        .lines()
        .map(parse_game)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(games = games.len(), "parsed games");
    Ok(games)
}

pub fn solve_puzzle_part1(games: &[Game]) -> u32 {
    games
        .iter()
        .filter(|game| game.handfuls.iter().all(|handful| handful.fits_within(&BAG)))
        .map(|game| game.id)
        .sum()
}

pub fn solve_puzzle_part2(games: &[Game]) -> u32 {
    games
        .iter()
        .map(|game| {
            game.handfuls
                .iter()
                .fold(Handful::default(), |needed, handful| needed.max(*handful))
                .power()
        })
        .sum()
}
