use crate::level::LevelLimits;
use thiserror::Error;

/// Input validation failures the custom-problem editors surface as
/// toasts. Everything here is checked before a calculator runs; nothing
/// is fatal, and a rejected edit leaves the previous lesson untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter both numbers")]
    EmptyInput,
    #[error("Please enter valid whole numbers")]
    NotANumber,
    #[error("Cannot divide by zero")]
    DivisionByZero,
    #[error("First number must be greater than or equal to second number")]
    MinuendTooSmall,
    #[error("Numbers up to {max} are supported at this level")]
    AboveLevelLimit { max: u64 },
    #[error("Please enter at most {max_digits} digits")]
    TooManyDigits { max_digits: usize },
}

/// Parses a whole-number operand from editor input. Accepts ASCII digits
/// only, matching the editors' keystroke filtering.
pub fn parse_operand(input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotANumber);
    }
    trimmed.parse().map_err(|_| ValidationError::NotANumber)
}

/// Parses a decimal operand with at most one fractional digit into
/// tenths, so `"4.7"` becomes 47 and `"4"` becomes 40.
pub fn parse_tenths(input: &str) -> Result<u64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, "0"),
    };
    if whole.is_empty()
        || fraction.len() != 1
        || !whole.bytes().all(|b| b.is_ascii_digit())
        || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ValidationError::NotANumber);
    }
    let whole: u64 = whole.parse().map_err(|_| ValidationError::NotANumber)?;
    let fraction: u64 = fraction.parse().map_err(|_| ValidationError::NotANumber)?;
    whole
        .checked_mul(10)
        .and_then(|tenths| tenths.checked_add(fraction))
        .ok_or(ValidationError::NotANumber)
}

/// Rejects operands above the level's bound.
pub fn check_operand_limit(value: u64, max: u64) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::AboveLevelLimit { max });
    }
    Ok(())
}

/// Validates a subtraction pair: the difference must not go negative.
pub fn check_subtraction(minuend: u64, subtrahend: u64) -> Result<(), ValidationError> {
    if minuend < subtrahend {
        return Err(ValidationError::MinuendTooSmall);
    }
    Ok(())
}

/// Validates a divisor before any long-division work happens.
pub fn check_divisor(divisor: u64, limits: &LevelLimits) -> Result<(), ValidationError> {
    if divisor == 0 {
        return Err(ValidationError::DivisionByZero);
    }
    check_operand_limit(divisor, limits.max_divisor)
}

/// Validates the long-division dividend string: digits only, within the
/// level's length bound.
pub fn check_dividend(dividend: &str, limits: &LevelLimits) -> Result<(), ValidationError> {
    let trimmed = dividend.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::NotANumber);
    }
    if trimmed.len() > limits.max_dividend_digits {
        return Err(ValidationError::TooManyDigits {
            max_digits: limits.max_dividend_digits,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LimitTable;
    use crate::problem::ClassLevel;

    fn limits(level: u8) -> LevelLimits {
        LimitTable::default().for_level(ClassLevel::new(level).expect("valid level"))
    }

    #[test]
    fn operands_parse_from_digit_strings() {
        assert_eq!(parse_operand("156").expect("parses"), 156);
        assert_eq!(parse_operand(" 12 ").expect("parses"), 12);
    }

    #[test]
    fn blank_and_malformed_operands_are_rejected() {
        assert_eq!(parse_operand(""), Err(ValidationError::EmptyInput));
        assert_eq!(parse_operand("   "), Err(ValidationError::EmptyInput));
        assert_eq!(parse_operand("12a"), Err(ValidationError::NotANumber));
        assert_eq!(parse_operand("-4"), Err(ValidationError::NotANumber));
        assert_eq!(parse_operand("1.5"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn tenths_parse_with_and_without_a_point() {
        assert_eq!(parse_tenths("4.7").expect("parses"), 47);
        assert_eq!(parse_tenths("4").expect("parses"), 40);
        assert_eq!(parse_tenths("0.5").expect("parses"), 5);
    }

    #[test]
    fn tenths_reject_more_than_one_fractional_digit() {
        assert_eq!(parse_tenths("4.75"), Err(ValidationError::NotANumber));
        assert_eq!(parse_tenths("."), Err(ValidationError::NotANumber));
        assert_eq!(parse_tenths("4."), Err(ValidationError::NotANumber));
    }

    #[test]
    fn level_limit_bounds_custom_operands() {
        assert!(check_operand_limit(99, limits(2).max_operand).is_ok());
        assert_eq!(
            check_operand_limit(100, limits(2).max_operand),
            Err(ValidationError::AboveLevelLimit { max: 99 })
        );
    }

    #[test]
    fn negative_differences_are_rejected_before_borrowing() {
        assert!(check_subtraction(52, 27).is_ok());
        assert!(check_subtraction(27, 27).is_ok());
        assert_eq!(
            check_subtraction(27, 52),
            Err(ValidationError::MinuendTooSmall)
        );
    }

    #[test]
    fn zero_divisor_is_rejected_before_any_steps_exist() {
        assert_eq!(
            check_divisor(0, &limits(2)),
            Err(ValidationError::DivisionByZero)
        );
        assert!(check_divisor(12, &limits(2)).is_ok());
    }

    #[test]
    fn dividend_strings_are_bounded_by_level() {
        assert!(check_dividend("156", &limits(2)).is_ok());
        assert_eq!(
            check_dividend("15600", &limits(2)),
            Err(ValidationError::TooManyDigits { max_digits: 3 })
        );
        assert_eq!(
            check_dividend("abc", &limits(2)),
            Err(ValidationError::NotANumber)
        );
    }

    #[test]
    fn validation_messages_read_as_toasts() {
        assert_eq!(
            ValidationError::DivisionByZero.to_string(),
            "Cannot divide by zero"
        );
        assert_eq!(
            ValidationError::AboveLevelLimit { max: 99 }.to_string(),
            "Numbers up to 99 are supported at this level"
        );
    }
}
