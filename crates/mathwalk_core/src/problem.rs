use crate::digits::digit_count;
use anyhow::{bail, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which lesson family a route segment selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Decimal,
}

impl OperationKind {
    /// Parses the operation path segment supplied by the page router.
    pub fn from_route_segment(segment: &str) -> Result<Self> {
        match segment {
            "addition" => Ok(Self::Addition),
            "subtraction" => Ok(Self::Subtraction),
            "multiplication" => Ok(Self::Multiplication),
            "division" => Ok(Self::Division),
            "decimal" => Ok(Self::Decimal),
            other => bail!("Unknown operation: {other}"),
        }
    }
}

/// Class level 1 through 4, parsed from the level path segment. The
/// router historically sent both numerals and difficulty words, so both
/// spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassLevel(u8);

impl ClassLevel {
    pub fn new(level: u8) -> Result<Self> {
        if !(1..=4).contains(&level) {
            bail!("Class level must be between 1 and 4.");
        }
        Ok(Self(level))
    }

    pub fn from_route_segment(segment: &str) -> Result<Self> {
        match segment {
            "1" | "easy" => Ok(Self(1)),
            "2" | "medium" => Ok(Self(2)),
            "3" | "hard" => Ok(Self(3)),
            "4" => Ok(Self(4)),
            other => bail!("Unknown class level: {other}"),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// An addition exercise. `sum` is always `num1 + num2`; constructors
/// maintain the invariant and nothing mutates a problem after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionProblem {
    pub num1: u64,
    pub num2: u64,
    pub sum: u64,
}

impl AdditionProblem {
    pub fn new(num1: u64, num2: u64) -> Self {
        Self {
            num1,
            num2,
            sum: num1 + num2,
        }
    }

    /// Level 1: single digits with a single-digit sum. Level 2: two-digit
    /// operands with a guaranteed ones-place carry. Levels 3 and 4:
    /// three-digit operands with carries out of both the ones and tens
    /// places.
    pub fn generate(level: ClassLevel, rng: &mut impl Rng) -> Self {
        match level.get() {
            1 => {
                let num1 = rng.gen_range(1..=8u64);
                let num2 = rng.gen_range(1..=9 - num1);
                Self::new(num1, num2)
            }
            2 => {
                let ones2 = rng.gen_range(1..=9u64);
                let num2 = rng.gen_range(1..=9u64) * 10 + ones2;
                // Force the ones digits to sum to exactly 10.
                let num1 = rng.gen_range(1..=8u64) * 10 + (10 - ones2);
                Self::new(num1, num2)
            }
            _ => {
                let ones1 = rng.gen_range(1..=9u64);
                let ones2 = rng.gen_range(10 - ones1..=9);
                let tens1 = rng.gen_range(0..=9u64);
                let tens2 = rng.gen_range(9 - tens1..=9);
                let num1 = rng.gen_range(1..=9u64) * 100 + tens1 * 10 + ones1;
                let num2 = rng.gen_range(1..=9u64) * 100 + tens2 * 10 + ones2;
                Self::new(num1, num2)
            }
        }
    }
}

/// A subtraction exercise with `num1 >= num2` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtractionProblem {
    pub num1: u64,
    pub num2: u64,
    pub difference: u64,
}

impl SubtractionProblem {
    pub fn new(num1: u64, num2: u64) -> Self {
        debug_assert!(num1 >= num2, "minuend must not be smaller than subtrahend");
        Self {
            num1,
            num2,
            difference: num1 - num2,
        }
    }

    /// Level 1: single digits, no borrowing. Level 2: two-digit operands
    /// with a forced ones-place borrow. Levels 3 and 4: three-digit
    /// operands borrowing in both the ones and tens places.
    pub fn generate(level: ClassLevel, rng: &mut impl Rng) -> Self {
        match level.get() {
            1 => {
                let num2 = rng.gen_range(1..=8u64);
                let num1 = rng.gen_range(num2 + 1..=9);
                Self::new(num1, num2)
            }
            2 => {
                let tens1 = rng.gen_range(2..=9u64);
                let tens2 = rng.gen_range(1..tens1);
                let ones1 = rng.gen_range(0..=8u64);
                let ones2 = rng.gen_range(ones1 + 1..=9);
                Self::new(tens1 * 10 + ones1, tens2 * 10 + ones2)
            }
            _ => {
                let hundreds1 = rng.gen_range(2..=9u64);
                let hundreds2 = rng.gen_range(1..hundreds1);
                let tens1 = rng.gen_range(0..=8u64);
                let tens2 = rng.gen_range(tens1 + 1..=9);
                let ones1 = rng.gen_range(0..=8u64);
                let ones2 = rng.gen_range(ones1 + 1..=9);
                Self::new(
                    hundreds1 * 100 + tens1 * 10 + ones1,
                    hundreds2 * 100 + tens2 * 10 + ones2,
                )
            }
        }
    }
}

/// A multiplication exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiplicationProblem {
    pub multiplicand: u64,
    pub multiplier: u64,
    pub product: u64,
}

impl MultiplicationProblem {
    pub fn new(multiplicand: u64, multiplier: u64) -> Self {
        Self {
            multiplicand,
            multiplier,
            product: multiplicand * multiplier,
        }
    }

    /// Level 1: times tables up to 10x10. Level 2: two-digit by
    /// one-digit. Levels 3 and 4: two-digit by two-digit.
    pub fn generate(level: ClassLevel, rng: &mut impl Rng) -> Self {
        match level.get() {
            1 => Self::new(rng.gen_range(1..=10), rng.gen_range(1..=10)),
            2 => Self::new(rng.gen_range(10..=99), rng.gen_range(1..=9)),
            _ => Self::new(rng.gen_range(10..=99), rng.gen_range(10..=99)),
        }
    }
}

/// How a division lesson is presented: counting equal groups for the
/// youngest learners, or the written long-division layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DivisionStyle {
    Grouping,
    LongDivision,
}

/// A division exercise. `dividend` is always
/// `divisor * quotient + remainder` with `remainder < divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionProblem {
    pub dividend: u64,
    pub divisor: u64,
    pub quotient: u64,
    pub remainder: u64,
    pub style: DivisionStyle,
}

impl DivisionProblem {
    /// Builds the problem from a dividend/divisor pair. The divisor must
    /// be positive; callers validate before constructing.
    pub fn new(dividend: u64, divisor: u64, style: DivisionStyle) -> Self {
        debug_assert!(divisor > 0, "divisor must be positive");
        Self {
            dividend,
            divisor,
            quotient: dividend / divisor,
            remainder: dividend % divisor,
            style,
        }
    }

    /// Generated backwards from divisor, quotient, and remainder so the
    /// division invariant holds by construction. Level 1 problems use the
    /// grouping presentation; higher levels use long division.
    pub fn generate(level: ClassLevel, rng: &mut impl Rng) -> Self {
        let (divisor, quotient, style) = match level.get() {
            1 => (rng.gen_range(2..=10), rng.gen_range(1..=9), DivisionStyle::Grouping),
            2 => (
                rng.gen_range(2..=10),
                rng.gen_range(10..=19),
                DivisionStyle::LongDivision,
            ),
            _ => (
                rng.gen_range(6..=15),
                rng.gen_range(20..=30),
                DivisionStyle::LongDivision,
            ),
        };
        let remainder = rng.gen_range(0..divisor);
        Self::new(divisor * quotient + remainder, divisor, style)
    }
}

/// Which operation a decimal lesson runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecimalOp {
    Add,
    Subtract,
}

/// A one-fractional-digit decimal exercise, held as tenths so the digit
/// calculators apply unchanged. For subtraction `tenths1 >= tenths2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalProblem {
    pub tenths1: u64,
    pub tenths2: u64,
    pub op: DecimalOp,
    pub result_tenths: u64,
}

impl DecimalProblem {
    pub fn new(tenths1: u64, tenths2: u64, op: DecimalOp) -> Self {
        debug_assert!(
            op == DecimalOp::Add || tenths1 >= tenths2,
            "decimal subtraction must not go negative"
        );
        let result_tenths = match op {
            DecimalOp::Add => tenths1 + tenths2,
            DecimalOp::Subtract => tenths1 - tenths2,
        };
        Self {
            tenths1,
            tenths2,
            op,
            result_tenths,
        }
    }

    /// Two random values in 0.0..=10.0 with one fractional digit.
    pub fn generate(op: DecimalOp, rng: &mut impl Rng) -> Self {
        let a = rng.gen_range(0..=100u64);
        let b = rng.gen_range(0..=100u64);
        match op {
            DecimalOp::Add => Self::new(a, b, op),
            DecimalOp::Subtract => Self::new(a.max(b), a.min(b), op),
        }
    }
}

/// Any lesson problem, tagged by operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum Problem {
    Addition(AdditionProblem),
    Subtraction(SubtractionProblem),
    Multiplication(MultiplicationProblem),
    Division(DivisionProblem),
    Decimal(DecimalProblem),
}

impl Problem {
    /// Generates a fresh problem for the routed operation and level.
    pub fn generate(kind: OperationKind, level: ClassLevel, rng: &mut impl Rng) -> Self {
        match kind {
            OperationKind::Addition => Self::Addition(AdditionProblem::generate(level, rng)),
            OperationKind::Subtraction => {
                Self::Subtraction(SubtractionProblem::generate(level, rng))
            }
            OperationKind::Multiplication => {
                Self::Multiplication(MultiplicationProblem::generate(level, rng))
            }
            OperationKind::Division => Self::Division(DivisionProblem::generate(level, rng)),
            OperationKind::Decimal => {
                let op = if rng.gen_bool(0.5) {
                    DecimalOp::Add
                } else {
                    DecimalOp::Subtract
                };
                Self::Decimal(DecimalProblem::generate(op, rng))
            }
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Addition(_) => OperationKind::Addition,
            Self::Subtraction(_) => OperationKind::Subtraction,
            Self::Multiplication(_) => OperationKind::Multiplication,
            Self::Division(_) => OperationKind::Division,
            Self::Decimal(_) => OperationKind::Decimal,
        }
    }
}

/// Formats a tenths count as its decimal rendering, e.g. 47 -> "4.7".
pub fn format_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Number of decimal places in the wider operand of a pair.
pub fn operand_places(a: u64, b: u64) -> usize {
    digit_count(a).max(digit_count(b))
}
