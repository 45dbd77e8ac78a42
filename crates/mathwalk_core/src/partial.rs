use crate::digits::digits_lsb_first;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One row of a long multiplication: the multiplicand times a single
/// multiplier digit, shifted by that digit's place value.
///
/// `digits_lsb` and `column_carries` describe the unshifted digit-by-digit
/// work (for carry-bubble rendering); `value` already includes the shift,
/// so summing the values of all rows gives the full product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialProduct {
    pub multiplier_digit: u8,
    pub shift: usize,
    pub value: u64,
    pub digits_lsb: Vec<u8>,
    pub column_carries: Vec<u8>,
}

/// Computes one partial product per multiplier digit, least significant
/// first, each with its own per-column carry sequence.
pub fn partial_products(multiplicand: u64, multiplier: u64) -> Vec<PartialProduct> {
    let multiplicand_digits = digits_lsb_first(multiplicand);

    digits_lsb_first(multiplier)
        .into_iter()
        .enumerate()
        .map(|(shift, multiplier_digit)| {
            let mut digits_lsb = Vec::with_capacity(multiplicand_digits.len() + 1);
            let mut column_carries = Vec::with_capacity(multiplicand_digits.len());
            let mut carry = 0u8;

            for &digit in &multiplicand_digits {
                let product = digit * multiplier_digit + carry;
                digits_lsb.push(product % 10);
                carry = product / 10;
                column_carries.push(carry);
            }
            if carry > 0 {
                digits_lsb.push(carry);
            }

            PartialProduct {
                multiplier_digit,
                shift,
                value: multiplicand * u64::from(multiplier_digit) * 10u64.pow(shift as u32),
                digits_lsb,
                column_carries,
            }
        })
        .collect()
}

/// Whether a long-division entry consumed its dividend digit by dividing
/// or merely brought it down because the working value was still smaller
/// than the divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DivisionEntryKind {
    BringDown,
    Divide,
}

/// One consumed dividend digit of a long division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionEntry {
    /// Index of the dividend digit consumed, left to right.
    pub position: usize,
    /// Working value after bringing the digit down.
    pub working: u64,
    pub kind: DivisionEntryKind,
    pub quotient_digit: u8,
    /// `divisor * quotient_digit`, the value written below and subtracted.
    pub subtracted: u64,
    /// Working value after the subtraction.
    pub remainder: u64,
}

/// Full record of a long division over a dividend digit string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionTrace {
    pub divisor: u64,
    pub entries: Vec<DivisionEntry>,
    /// Quotient digits as displayed, including any leading zeros.
    pub quotient_digits: String,
    pub quotient: u64,
    pub remainder: u64,
}

/// Runs long division over `dividend_digits`, consuming digits left to
/// right with a working accumulator. A digit that leaves the accumulator
/// below the divisor (while digits remain) records a zero quotient digit;
/// otherwise the entry divides, subtracts `divisor * quotient_digit`, and
/// keeps the rest as the next working value.
///
/// Callers validate first: the dividend string must be non-empty ASCII
/// digits and the divisor positive.
pub fn long_division(dividend_digits: &str, divisor: u64) -> Result<DivisionTrace> {
    if divisor == 0 {
        bail!("Divisor must be positive.");
    }
    if dividend_digits.is_empty() || !dividend_digits.bytes().all(|b| b.is_ascii_digit()) {
        bail!("Dividend must be a non-empty decimal digit string.");
    }
    if dividend_digits.len() > 20 {
        bail!("Dividend has too many digits.");
    }

    let digits: Vec<u8> = dividend_digits.bytes().map(|b| b - b'0').collect();
    let last = digits.len() - 1;
    let mut entries = Vec::with_capacity(digits.len());
    let mut quotient_digits = String::with_capacity(digits.len());
    let mut quotient: u64 = 0;
    let mut working: u64 = 0;

    for (position, &digit) in digits.iter().enumerate() {
        working = working * 10 + u64::from(digit);

        if working < divisor && position < last {
            quotient_digits.push('0');
            quotient *= 10;
            entries.push(DivisionEntry {
                position,
                working,
                kind: DivisionEntryKind::BringDown,
                quotient_digit: 0,
                subtracted: 0,
                remainder: working,
            });
            continue;
        }

        // The previous remainder is below the divisor, so one appended
        // digit keeps the quotient digit in 0..=9.
        let quotient_digit = (working / divisor) as u8;
        let subtracted = divisor * u64::from(quotient_digit);
        quotient_digits.push(char::from(b'0' + quotient_digit));
        quotient = quotient * 10 + u64::from(quotient_digit);
        entries.push(DivisionEntry {
            position,
            working,
            kind: DivisionEntryKind::Divide,
            quotient_digit,
            subtracted,
            remainder: working - subtracted,
        });
        working -= subtracted;
    }

    Ok(DivisionTrace {
        divisor,
        entries,
        quotient_digits,
        quotient,
        remainder: working,
    })
}
