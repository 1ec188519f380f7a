/// The most digits a `u64` can always hold without overflowing.
const MAX_DIGITS: usize = 19;

/// Returns every run of ASCII digits on the line, in order. Parsing stops at
/// the first newline or at the end of the input, whichever comes first.
pub fn parse_until_newline(input_raw: &[u8]) -> Vec<u64> {
    let mut output = Vec::new();
    let mut input = input_raw;
    let mut cursor = 0;
    while let Some(found) = extract_digits(input) {
        cursor += found.consumed;
        input = &input_raw[cursor..];
        output.push(convert_digits(&found.digits[..found.n_digits]));
    }
    output
}

#[derive(Debug)]
struct FoundNumber {
    consumed: usize,
    n_digits: usize,
    digits: [u8; MAX_DIGITS],
}

fn extract_digits(input: &[u8]) -> Option<FoundNumber> {
    let mut cursor = 0;
    let mut n_digits = 0;
    let mut digits_array = [0; MAX_DIGITS];
    for byte in input.iter() {
        // End of input we're concerned about
        if *byte == b'\n' {
            break;
        }
        cursor += 1;
        // Found a digit byte
        if byte.is_ascii_digit() {
            debug_assert!(n_digits < MAX_DIGITS, "number is too long for a u64");
            digits_array[n_digits] = *byte - b'0';
            n_digits += 1;
            continue;
        }
        // Transition from digits to separators
        if n_digits > 0 {
            break;
        }
    }
    if n_digits > 0 {
        Some(FoundNumber {
            consumed: cursor,
            n_digits,
            digits: digits_array,
        })
    } else {
        None
    }
}

fn convert_digits(digits: &[u8]) -> u64 {
    digits
        .iter()
        .fold(0, |acc, digit| acc * 10 + u64::from(*digit))
}
