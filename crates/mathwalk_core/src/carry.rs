use crate::digits::{digit_at, digit_count};
use std::collections::BTreeSet;

/// How many places the calculators walk for a pair of operands. One
/// place past the longer operand, so a carry or borrow out of the most
/// significant shared place is never dropped.
fn padded_places(a: u64, b: u64) -> usize {
    digit_count(a).max(digit_count(b)) + 1
}

/// Set of place indices (0 = ones) at which adding `a` and `b` carries.
///
/// Walks places right to left with a running carry-in; a place carries
/// out iff its digit sum plus the carry-in reaches 10.
pub fn carry_places(a: u64, b: u64) -> BTreeSet<usize> {
    let mut carries = BTreeSet::new();
    let mut carry_in = 0u8;

    for place in 0..padded_places(a, b) {
        let sum = digit_at(a, place as u32) + digit_at(b, place as u32) + carry_in;
        if sum >= 10 {
            carries.insert(place);
            carry_in = 1;
        } else {
            carry_in = 0;
        }
    }

    carries
}

/// Set of place indices at which subtracting `b` from `a` borrows.
///
/// Requires `a >= b`; callers validate and reject a negative difference
/// before invoking. A place borrows iff its minuend digit is smaller
/// than its subtrahend digit, or the digits are equal while a borrow is
/// already active from the place below.
pub fn borrow_places(a: u64, b: u64) -> BTreeSet<usize> {
    debug_assert!(a >= b, "minuend must not be smaller than subtrahend");

    let mut borrows = BTreeSet::new();
    let mut borrowing = false;

    for place in 0..padded_places(a, b) {
        let digit_a = digit_at(a, place as u32);
        let digit_b = digit_at(b, place as u32);
        if digit_a < digit_b || (digit_a == digit_b && borrowing) {
            borrows.insert(place);
            borrowing = true;
        } else {
            borrowing = false;
        }
    }

    borrows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(places: &[usize]) -> BTreeSet<usize> {
        places.iter().copied().collect()
    }

    #[test]
    fn ones_place_carry_is_detected() {
        // 7 + 8 = 15 carries out of the ones place.
        assert_eq!(carry_places(47, 38), set(&[0]));
    }

    #[test]
    fn carry_free_addition_yields_empty_set() {
        assert_eq!(carry_places(23, 45), set(&[]));
        assert_eq!(carry_places(0, 0), set(&[]));
    }

    #[test]
    fn carry_out_of_most_significant_place_is_kept() {
        // 95 + 17 = 112: the tens place carries into the hundreds.
        assert_eq!(carry_places(95, 17), set(&[0, 1]));
        assert_eq!(carry_places(999, 1), set(&[0, 1, 2]));
    }

    #[test]
    fn carry_chain_propagates_through_equal_sums() {
        // 55 + 45: ones sum to 10, tens sum to 9 + carry = 10.
        assert_eq!(carry_places(55, 45), set(&[0, 1]));
    }

    #[test]
    fn mismatched_operand_lengths_pad_correctly() {
        assert_eq!(carry_places(9999, 1), set(&[0, 1, 2, 3]));
        assert_eq!(carry_places(1, 9999), set(&[0, 1, 2, 3]));
    }

    #[test]
    fn carry_at_place_iff_low_digit_prefixes_overflow() {
        // A place p carries exactly when the low p+1 digits of the
        // operands sum to at least 10^(p+1).
        for a in 0..300u64 {
            for b in 0..300u64 {
                let places = carry_places(a, b);
                for p in 0..5usize {
                    let modulus = 10u64.pow(p as u32 + 1);
                    let expected = (a % modulus) + (b % modulus) >= modulus;
                    assert_eq!(
                        places.contains(&p),
                        expected,
                        "carry mismatch at place {} for {} + {}",
                        p,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn ones_place_borrow_is_detected() {
        // 2 < 7 in the ones place.
        assert_eq!(borrow_places(52, 27), set(&[0]));
    }

    #[test]
    fn borrow_free_subtraction_yields_empty_set() {
        assert_eq!(borrow_places(58, 23), set(&[]));
        assert_eq!(borrow_places(7, 7), set(&[]));
    }

    #[test]
    fn borrow_propagates_through_equal_digits() {
        // 110 - 19: ones borrows, then tens digits tie while borrowing.
        assert_eq!(borrow_places(110, 19), set(&[0, 1]));
    }

    #[test]
    fn borrow_chain_runs_through_zeros() {
        assert_eq!(borrow_places(100, 1), set(&[0, 1]));
        assert_eq!(borrow_places(1000, 1), set(&[0, 1, 2]));
    }

    #[test]
    fn borrow_at_place_iff_low_digit_prefix_is_smaller() {
        // A place p borrows exactly when the low p+1 digits of the
        // minuend are smaller than those of the subtrahend.
        for b in 0..300u64 {
            for a in b..400u64 {
                let places = borrow_places(a, b);
                for p in 0..5usize {
                    let modulus = 10u64.pow(p as u32 + 1);
                    let expected = (a % modulus) < (b % modulus);
                    assert_eq!(
                        places.contains(&p),
                        expected,
                        "borrow mismatch at place {} for {} - {}",
                        p,
                        a,
                        b
                    );
                }
            }
        }
    }
}
