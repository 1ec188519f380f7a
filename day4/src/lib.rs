use anyhow::{anyhow, ensure};
use parse_ints::scalar::parse_until_newline;
use std::collections::HashSet;
use tracing::debug;

type Error = anyhow::Error;

/// A card scores `2^(matches - 1)`, which has to fit in a `u64`.
const MAX_MATCHES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    /// How many of the numbers you have are winning numbers.
    pub matches: usize,
}

// e.g. "Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53"
fn parse_card(line: &str) -> Result<Card, Error> {
    let (_, numbers) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' in card: {line}"))?;
    let (winning, have) = numbers
        .split_once('|')
        .ok_or_else(|| anyhow!("missing '|' in card: {line}"))?;
    let winning = parse_until_newline(winning.as_bytes())
        .into_iter()
        .collect::<HashSet<_>>();
    let have = parse_until_newline(have.as_bytes())
        .into_iter()
        .collect::<HashSet<_>>();
    let matches = winning.intersection(&have).count();
    ensure!(
        matches <= MAX_MATCHES,
        "card has {matches} matches, at most {MAX_MATCHES} can be scored: {line}"
    );
    Ok(Card { matches })
}

pub fn parse_input(puzzle: &str) -> Result<Vec<Card>, Error> {
    let cards = puzzle
        .lines()
        .map(parse_card)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(cards = cards.len(), "parsed scratchcards");
    Ok(cards)
}

pub fn solve_puzzle_part1(cards: &[Card]) -> u64 {
    cards
        .iter()
        .filter(|card| card.matches > 0)
        .map(|card| 1u64 << (card.matches - 1))
        .sum()
}

/// Each card wins one copy of each of the next `matches` cards, for every copy
/// of it you hold. Wins never run past the end of the table.
pub fn solve_puzzle_part2(cards: &[Card]) -> u64 {
    let mut copies = vec![1u64; cards.len()];
    for (idx, card) in cards.iter().enumerate() {
        let won_by_this_card = copies[idx];
        let last = (idx + card.matches).min(cards.len() - 1);
        for count in copies[(idx + 1)..=last].iter_mut() {
            *count += won_by_this_card;
        }
    }
    copies.iter().sum()
}
