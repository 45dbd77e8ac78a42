//! Custom-problem constructors: each validates the editor's raw input
//! before any calculator or script builder runs. A rejection returns the
//! toast message and leaves whatever lesson the screen already shows
//! untouched.

use crate::lesson::{build_lesson, WasmLesson};
use mathwalk_core::cursor::Navigation;
use mathwalk_core::level::LimitTable;
use mathwalk_core::problem::{
    AdditionProblem, ClassLevel, DecimalOp, DecimalProblem, DivisionProblem, DivisionStyle,
    MultiplicationProblem, Problem, SubtractionProblem,
};
use mathwalk_core::validate::{
    check_dividend, check_divisor, check_operand_limit, check_subtraction, parse_operand,
    parse_tenths, ValidationError,
};
use wasm_bindgen::prelude::*;

fn reject(err: ValidationError) -> JsValue {
    log::warn!("rejected custom problem input: {err}");
    JsValue::from_str(&err.to_string())
}

fn parse_level(level: &str) -> Result<ClassLevel, JsValue> {
    ClassLevel::from_route_segment(level).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
impl WasmLesson {
    /// Addition lesson from the two editor fields.
    pub fn with_addition(first: &str, second: &str, level: &str) -> Result<WasmLesson, JsValue> {
        let level = parse_level(level)?;
        let limits = LimitTable::default().for_level(level);
        let num1 = parse_operand(first).map_err(reject)?;
        let num2 = parse_operand(second).map_err(reject)?;
        check_operand_limit(num1, limits.max_operand).map_err(reject)?;
        check_operand_limit(num2, limits.max_operand).map_err(reject)?;
        build_lesson(
            Problem::Addition(AdditionProblem::new(num1, num2)),
            Navigation::ForwardOnly,
        )
    }

    /// Subtraction lesson; rejects a minuend smaller than the
    /// subtrahend before any borrow work happens.
    pub fn with_subtraction(first: &str, second: &str, level: &str) -> Result<WasmLesson, JsValue> {
        let level = parse_level(level)?;
        let limits = LimitTable::default().for_level(level);
        let num1 = parse_operand(first).map_err(reject)?;
        let num2 = parse_operand(second).map_err(reject)?;
        check_operand_limit(num1, limits.max_operand).map_err(reject)?;
        check_operand_limit(num2, limits.max_operand).map_err(reject)?;
        check_subtraction(num1, num2).map_err(reject)?;
        build_lesson(
            Problem::Subtraction(SubtractionProblem::new(num1, num2)),
            Navigation::ForwardOnly,
        )
    }

    /// Multiplication visualizer lesson.
    pub fn with_multiplication(
        first: &str,
        second: &str,
        level: &str,
    ) -> Result<WasmLesson, JsValue> {
        let level = parse_level(level)?;
        let limits = LimitTable::default().for_level(level);
        let multiplicand = parse_operand(first).map_err(reject)?;
        let multiplier = parse_operand(second).map_err(reject)?;
        check_operand_limit(multiplicand, limits.max_operand).map_err(reject)?;
        check_operand_limit(multiplier, limits.max_multiplier).map_err(reject)?;
        build_lesson(
            Problem::Multiplication(MultiplicationProblem::new(multiplicand, multiplier)),
            Navigation::ForwardOnly,
        )
    }

    /// Long-division visualizer lesson. The only screen with full
    /// navigation: previous, auto-play, and restart all work.
    pub fn with_long_division(
        dividend: &str,
        divisor: &str,
        level: &str,
    ) -> Result<WasmLesson, JsValue> {
        let level = parse_level(level)?;
        let limits = LimitTable::default().for_level(level);
        check_dividend(dividend, &limits).map_err(reject)?;
        let divisor = parse_operand(divisor).map_err(reject)?;
        check_divisor(divisor, &limits).map_err(reject)?;
        let dividend = parse_operand(dividend).map_err(reject)?;
        build_lesson(
            Problem::Division(DivisionProblem::new(
                dividend,
                divisor,
                DivisionStyle::LongDivision,
            )),
            Navigation::Full,
        )
    }

    /// Decimal lesson over `"add"` or `"subtract"`, one fractional
    /// digit per operand.
    pub fn with_decimal(first: &str, second: &str, operation: &str) -> Result<WasmLesson, JsValue> {
        let op = match operation {
            "add" => DecimalOp::Add,
            "subtract" => DecimalOp::Subtract,
            other => {
                return Err(JsValue::from_str(&format!(
                    "Unknown decimal operation: {other}"
                )))
            }
        };
        let tenths1 = parse_tenths(first).map_err(reject)?;
        let tenths2 = parse_tenths(second).map_err(reject)?;
        if op == DecimalOp::Subtract {
            check_subtraction(tenths1, tenths2).map_err(reject)?;
        }
        build_lesson(
            Problem::Decimal(DecimalProblem::new(tenths1, tenths2, op)),
            Navigation::ForwardOnly,
        )
    }
}
