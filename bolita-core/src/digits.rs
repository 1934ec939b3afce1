//! Digit-string helpers shared by pricing and settlement.
//!
//! Both engines must agree on what a "6-way" or "3-way" number is, so the
//! permutation count lives here and nowhere else.

use std::collections::BTreeMap;

/// Strip everything that is not an ASCII digit.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Number of distinct orderings of the digits in `digits`.
///
/// This is the multinomial coefficient `n! / (c1! * c2! * ...)`, where `ci`
/// counts each distinct digit. It is built up as a product of binomials so
/// intermediate values stay exact.
pub fn permutation_count(digits: &str) -> u64 {
    let mut counts: BTreeMap<char, u64> = BTreeMap::new();
    for c in digits.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }

    let mut placed = 0u64;
    let mut total = 1u64;
    for count in counts.values() {
        for i in 1..=*count {
            placed += 1;
            total = total.saturating_mul(placed) / i;
        }
    }
    total
}

/// True when `a` is a reordering of `b`. Empty strings never match.
pub fn is_permutation(a: &str, b: &str) -> bool {
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    sorted_chars(a) == sorted_chars(b)
}

/// Three identical digits, e.g. `"555"`.
pub fn is_triple(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => digits.len() == 3 && chars.all(|c| c == first),
        None => false,
    }
}

pub fn first_two(digits: &str) -> Option<&str> {
    if digits.len() < 2 {
        return None;
    }
    digits.get(..2)
}

pub fn last_two(digits: &str) -> Option<&str> {
    if digits.len() < 2 {
        return None;
    }
    digits.get(digits.len() - 2..)
}

fn sorted_chars(s: &str) -> Vec<char> {
    let mut chars: Vec<char> = s.chars().collect();
    chars.sort_unstable();
    chars
}
