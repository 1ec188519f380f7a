use anyhow::Context;
use tracing::debug;

type Error = anyhow::Error;

/// A run of digits in the schematic. Columns are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartNumber {
    pub value: u32,
    pub row: usize,
    pub col_start: usize,
    pub col_end: usize,
}

/// Any character that is neither a digit nor `.`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub ch: char,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Schematic {
    pub numbers: Vec<PartNumber>,
    pub symbols: Vec<Symbol>,
}

/// Columns count characters, not bytes.
fn scan_row(schematic: &mut Schematic, row: usize, line: &str) -> Result<(), Error> {
    // Column the current number started at, and its value so far
    let mut number: Option<(usize, u32)> = None;
    // A trailing '.' flushes a number that runs to the end of the line
    for (col, ch) in line.chars().chain(std::iter::once('.')).enumerate() {
        if let Some(digit) = ch.to_digit(10) {
            let (col_start, value) = number.unwrap_or((col, 0));
            let value = value
                .checked_mul(10)
                .and_then(|value| value.checked_add(digit))
                .with_context(|| format!("number too large at row {row}, column {col_start}"))?;
            number = Some((col_start, value));
            continue;
        }
        if let Some((col_start, value)) = number.take() {
            schematic.numbers.push(PartNumber {
                value,
                row,
                col_start,
                col_end: col - 1,
            });
        }
        if ch != '.' {
            schematic.symbols.push(Symbol { ch, row, col });
        }
    }
    Ok(())
}

pub fn parse_input(puzzle: &str) -> Result<Schematic, Error> {
    let mut schematic = Schematic::default();
    for (row, line) in puzzle.lines().enumerate() {
        scan_row(&mut schematic, row, line)?;
    }
    debug!(
        numbers = schematic.numbers.len(),
        symbols = schematic.symbols.len(),
        "scanned schematic"
    );
    Ok(schematic)
}

/// Whether the symbol touches any digit of the number, diagonals included.
fn is_adjacent(symbol: &Symbol, number: &PartNumber) -> bool {
    symbol.row.abs_diff(number.row) <= 1
        && symbol.col + 1 >= number.col_start
        && symbol.col <= number.col_end + 1
}

pub fn solve_puzzle_part1(schematic: &Schematic) -> u32 {
    schematic
        .numbers
        .iter()
        .filter(|number| {
            schematic
                .symbols
                .iter()
                .any(|symbol| is_adjacent(symbol, number))
        })
        .map(|number| number.value)
        .sum()
}

pub fn solve_puzzle_part2(schematic: &Schematic) -> u64 {
    schematic
        .symbols
        .iter()
        .filter(|symbol| symbol.ch == '*')
        .filter_map(|gear| {
            let adjacent = schematic
                .numbers
                .iter()
                .filter(|number| is_adjacent(gear, number))
                .collect::<Vec<_>>();
            match adjacent[..] {
                [first, second] => Some(u64::from(first.value) * u64::from(second.value)),
                _ => None,
            }
        })
        .sum()
}
