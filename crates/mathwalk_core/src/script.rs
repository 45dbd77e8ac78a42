use crate::carry::{borrow_places, carry_places};
use crate::digits::{digit_at, ordinal, place_name};
use crate::partial::{long_division, partial_products, DivisionEntryKind};
use crate::problem::{
    format_tenths, operand_places, AdditionProblem, DecimalOp, DecimalProblem, DivisionProblem,
    DivisionStyle, MultiplicationProblem, Problem, SubtractionProblem,
};
use serde::{Deserialize, Serialize};

/// Which rows and places the UI emphasizes while a step is on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub operand_places: Vec<usize>,
    pub carry_places: Vec<usize>,
    pub product_rows: Vec<usize>,
}

impl Highlight {
    fn places(places: &[usize]) -> Self {
        Self {
            operand_places: places.to_vec(),
            ..Self::default()
        }
    }

    fn carry(place: usize) -> Self {
        Self {
            carry_places: vec![place],
            ..Self::default()
        }
    }

    fn row(row: usize) -> Self {
        Self {
            product_rows: vec![row],
            ..Self::default()
        }
    }
}

/// Discriminant of a lesson step. Every operation screen shares this one
/// shape; there are no per-screen step variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StepKind {
    Intro,
    DigitOp { place: usize },
    Carry { from_place: usize },
    Borrow { place: usize },
    PartialProduct { row: usize },
    Result,
}

/// One unit of a guided lesson: a short on-screen label, the full
/// narrated sentence, and highlight metadata. Steps are immutable once
/// generated; the UI only moves a cursor across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub instruction: String,
    pub voice: String,
    #[serde(default)]
    pub highlight: Highlight,
}

/// The ordered, finite, restartable step sequence for one problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepScript {
    steps: Vec<Step>,
}

impl StepScript {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn push(&mut self, kind: StepKind, instruction: String, voice: String, highlight: Highlight) {
        self.steps.push(Step {
            kind,
            instruction,
            voice,
            highlight,
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }
}

/// Anything that can narrate itself as a step script. The builders are
/// pure: the same problem always yields a structurally identical script.
pub trait BuildScript {
    fn build_script(&self) -> StepScript;
}

/// Builds the lesson script for any problem.
pub fn build_steps(problem: &Problem) -> StepScript {
    let script = match problem {
        Problem::Addition(p) => p.build_script(),
        Problem::Subtraction(p) => p.build_script(),
        Problem::Multiplication(p) => p.build_script(),
        Problem::Division(p) => p.build_script(),
        Problem::Decimal(p) => p.build_script(),
    };
    log::debug!(
        "built {} steps for {:?} lesson",
        script.len(),
        problem.kind()
    );
    script
}

impl BuildScript for AdditionProblem {
    fn build_script(&self) -> StepScript {
        let mut script = StepScript::new();
        script.push(
            StepKind::Intro,
            "Let's add these numbers digit by digit".to_string(),
            "Let's add these numbers digit by digit, starting from the right side.".to_string(),
            Highlight::default(),
        );

        let carries = carry_places(self.num1, self.num2);
        for place in 0..operand_places(self.num1, self.num2) {
            let digit1 = digit_at(self.num1, place as u32);
            let digit2 = digit_at(self.num2, place as u32);
            let carried_in = place > 0 && carries.contains(&(place - 1));
            let result_digit = digit_at(self.sum, place as u32);
            let carry_clause = if carries.contains(&place) {
                " with a carry of 1"
            } else {
                ""
            };
            let carried_clause = if carried_in { "plus the carried 1 " } else { "" };

            script.push(
                StepKind::DigitOp { place },
                format!("Add the {} place", place_name(place)),
                format!(
                    "Add the {} place: {} plus {} {}equals {}{}.",
                    place_name(place),
                    digit1,
                    digit2,
                    carried_clause,
                    result_digit,
                    carry_clause
                ),
                Highlight::places(&[place]),
            );

            if carries.contains(&place) {
                let voice = format!("Carry the 1 to the {} place.", place_name(place + 1));
                script.push(
                    StepKind::Carry { from_place: place },
                    format!("Carry the 1 to the {} place", place_name(place + 1)),
                    voice,
                    Highlight::carry(place),
                );
            }
        }

        script.push(
            StepKind::Result,
            "Find the total sum".to_string(),
            format!("The total sum is {}.", self.sum),
            Highlight::default(),
        );
        script
    }
}

impl BuildScript for SubtractionProblem {
    fn build_script(&self) -> StepScript {
        let mut script = StepScript::new();
        script.push(
            StepKind::Intro,
            "Let's subtract these numbers digit by digit".to_string(),
            "Let's subtract these numbers digit by digit, starting from the right side."
                .to_string(),
            Highlight::default(),
        );

        let borrows = borrow_places(self.num1, self.num2);
        for place in 0..operand_places(self.num1, self.num2) {
            let digit2 = digit_at(self.num2, place as u32);
            let lent = place > 0 && borrows.contains(&(place - 1));
            // Digit after lending to the place below, before any borrow
            // of its own.
            let reduced = u64::from(digit_at(self.num1, place as u32)) - u64::from(lent);
            let effective = if borrows.contains(&place) {
                reduced + 10
            } else {
                reduced
            };

            if borrows.contains(&place) {
                script.push(
                    StepKind::Borrow { place },
                    format!("Borrow 1 from the {} place", place_name(place + 1)),
                    format!(
                        "We need to borrow 1 from the {} place because {} is less than {}.",
                        place_name(place + 1),
                        reduced,
                        digit2
                    ),
                    Highlight::carry(place),
                );
            }

            script.push(
                StepKind::DigitOp { place },
                format!("Subtract the {} place", place_name(place)),
                format!(
                    "Subtract the {} place: {} minus {} equals {}.",
                    place_name(place),
                    effective,
                    digit2,
                    digit_at(self.difference, place as u32)
                ),
                Highlight::places(&[place]),
            );
        }

        script.push(
            StepKind::Result,
            "Find the final difference".to_string(),
            format!("The final difference is {}.", self.difference),
            Highlight::default(),
        );
        script
    }
}

impl BuildScript for MultiplicationProblem {
    fn build_script(&self) -> StepScript {
        let mut script = StepScript::new();
        script.push(
            StepKind::Intro,
            "Let's multiply step by step".to_string(),
            format!(
                "Let's multiply {} by {} step by step.",
                self.multiplicand, self.multiplier
            ),
            Highlight::default(),
        );

        let rows = partial_products(self.multiplicand, self.multiplier);
        for row in &rows {
            script.push(
                StepKind::PartialProduct { row: row.shift },
                format!("Multiply by {}", row.multiplier_digit),
                format!(
                    "Now we'll multiply each digit of {} by {}, the {} digit of {} from the right.",
                    self.multiplicand,
                    row.multiplier_digit,
                    ordinal(row.shift + 1),
                    self.multiplier
                ),
                Highlight::row(row.shift),
            );

            for (column, &digit) in row.digits_lsb.iter().enumerate() {
                // A trailing digit produced purely by the final carry has
                // no multiplicand column of its own.
                if column >= row.column_carries.len() {
                    script.push(
                        StepKind::Carry { from_place: column },
                        format!("Write the final carry {}", digit),
                        format!(
                            "We add the final carry {} as the leftmost digit of our partial product.",
                            digit
                        ),
                        Highlight::carry(column),
                    );
                    break;
                }

                let multiplicand_digit = digit_at(self.multiplicand, column as u32);
                let column_product =
                    multiplicand_digit * row.multiplier_digit
                        + if column > 0 { row.column_carries[column - 1] } else { 0 };
                script.push(
                    StepKind::DigitOp { place: column },
                    format!(
                        "Multiply {} x {}",
                        multiplicand_digit, row.multiplier_digit
                    ),
                    format!(
                        "Multiply {} times {}, which gives {}.",
                        multiplicand_digit, row.multiplier_digit, column_product
                    ),
                    Highlight {
                        operand_places: vec![column],
                        carry_places: Vec::new(),
                        product_rows: vec![row.shift],
                    },
                );

                let carry = row.column_carries[column];
                if carry > 0 {
                    script.push(
                        StepKind::Carry { from_place: column },
                        format!("Carry the {}", carry),
                        format!(
                            "The product {} has two digits. We write {} and carry the {} to the next column.",
                            column_product, digit, carry
                        ),
                        Highlight::carry(column),
                    );
                }
            }

            script.push(
                StepKind::PartialProduct { row: row.shift },
                format!("Partial product: {}", row.value),
                format!(
                    "We've completed multiplying {} by {}, giving us the partial product {}.",
                    self.multiplicand, row.multiplier_digit, row.value
                ),
                Highlight::row(row.shift),
            );
        }

        script.push(
            StepKind::Result,
            "Add the partial products".to_string(),
            format!(
                "Finally, we add all the partial products to get the answer: {} times {} equals {}.",
                self.multiplicand, self.multiplier, self.product
            ),
            Highlight {
                operand_places: Vec::new(),
                carry_places: Vec::new(),
                product_rows: (0..rows.len()).collect(),
            },
        );
        script
    }
}

impl BuildScript for DivisionProblem {
    fn build_script(&self) -> StepScript {
        match self.style {
            DivisionStyle::Grouping => self.grouping_script(),
            DivisionStyle::LongDivision => self.long_division_script(),
        }
    }
}

impl DivisionProblem {
    fn grouping_script(&self) -> StepScript {
        let mut script = StepScript::new();
        script.push(
            StepKind::Intro,
            "Let's divide step by step".to_string(),
            format!(
                "Let's divide {} by {} step by step.",
                self.dividend, self.divisor
            ),
            Highlight::default(),
        );
        script.push(
            StepKind::DigitOp { place: 0 },
            format!(
                "We need to find how many groups of {} are in {}",
                self.divisor, self.dividend
            ),
            format!(
                "We need to find how many groups of {} fit into {}.",
                self.divisor, self.dividend
            ),
            Highlight::default(),
        );
        script.push(
            StepKind::Result,
            format!(
                "{} / {} = {} with remainder {}",
                self.dividend, self.divisor, self.quotient, self.remainder
            ),
            format!(
                "{} divided by {} equals {} with a remainder of {}.",
                self.dividend, self.divisor, self.quotient, self.remainder
            ),
            Highlight::default(),
        );
        script
    }

    fn long_division_script(&self) -> StepScript {
        let mut script = StepScript::new();
        script.push(
            StepKind::Intro,
            "Let's divide step by step".to_string(),
            format!(
                "Let's divide {} by {} step by step.",
                self.dividend, self.divisor
            ),
            Highlight::default(),
        );

        // Problem invariants guarantee a valid dividend string and a
        // positive divisor, so the trace always exists.
        let trace = long_division(&self.dividend.to_string(), self.divisor)
            .expect("division problems are constructed with a positive divisor");
        for entry in &trace.entries {
            match entry.kind {
                DivisionEntryKind::BringDown => {
                    script.push(
                        StepKind::DigitOp {
                            place: entry.position,
                        },
                        "Bring down the next digit".to_string(),
                        format!(
                            "{} is less than {}, so we write 0 in the quotient and bring down the next digit.",
                            entry.working, self.divisor
                        ),
                        Highlight::places(&[entry.position]),
                    );
                }
                DivisionEntryKind::Divide => {
                    script.push(
                        StepKind::DigitOp {
                            place: entry.position,
                        },
                        format!("Divide {} by {}", entry.working, self.divisor),
                        format!(
                            "Divide {} by {}, which gives {} with a remainder of {}. Subtract {}.",
                            entry.working,
                            self.divisor,
                            entry.quotient_digit,
                            entry.remainder,
                            entry.subtracted
                        ),
                        Highlight::places(&[entry.position]),
                    );
                }
            }
        }

        script.push(
            StepKind::Result,
            format!(
                "The final quotient is {} with remainder {}",
                self.quotient, self.remainder
            ),
            format!(
                "The final answer is {} with a remainder of {}.",
                self.quotient, self.remainder
            ),
            Highlight::default(),
        );
        script
    }
}

impl BuildScript for DecimalProblem {
    fn build_script(&self) -> StepScript {
        let verb = match self.op {
            DecimalOp::Add => "add",
            DecimalOp::Subtract => "subtract",
        };
        let first = format_tenths(self.tenths1);
        let second = format_tenths(self.tenths2);

        let mut script = StepScript::new();
        script.push(
            StepKind::Intro,
            format!("Let's {} these decimal numbers", verb),
            format!("Let's {} {} and {}.", verb, first, second),
            Highlight::default(),
        );
        script.push(
            StepKind::Intro,
            "First, align the decimal points".to_string(),
            "First, we need to align the decimal points to make sure we're adding or subtracting the same place values."
                .to_string(),
            Highlight::default(),
        );

        // Work in tenths so the place walk below is plain digit
        // arithmetic; place 0 is the tenths column.
        let inner = match self.op {
            DecimalOp::Add => Problem::Addition(AdditionProblem::new(self.tenths1, self.tenths2)),
            DecimalOp::Subtract => {
                Problem::Subtraction(SubtractionProblem::new(self.tenths1, self.tenths2))
            }
        };
        let inner_script = build_steps(&inner);
        let decimal_place_name = |place: usize| match place {
            0 => "tenths".to_string(),
            p => place_name(p - 1).to_string(),
        };
        for step in inner_script.steps() {
            match step.kind {
                StepKind::Intro | StepKind::Result => {}
                StepKind::DigitOp { place } => {
                    let cap_verb = match self.op {
                        DecimalOp::Add => "Add",
                        DecimalOp::Subtract => "Subtract",
                    };
                    let name = decimal_place_name(place);
                    script.push(
                        step.kind,
                        format!("{} the {} place", cap_verb, name),
                        step.voice
                            .replacen(&format!("the {} place", place_name(place)), &format!("the {} place", name), 1),
                        step.highlight.clone(),
                    );
                }
                StepKind::Carry { from_place } => {
                    script.push(
                        step.kind,
                        format!("Carry the 1 to the {} place", decimal_place_name(from_place + 1)),
                        format!(
                            "Carry the 1 to the {} place.",
                            decimal_place_name(from_place + 1)
                        ),
                        step.highlight.clone(),
                    );
                }
                StepKind::Borrow { place } => {
                    script.push(
                        step.kind,
                        format!("Borrow 1 from the {} place", decimal_place_name(place + 1)),
                        format!(
                            "We need to borrow 1 from the {} place.",
                            decimal_place_name(place + 1)
                        ),
                        step.highlight.clone(),
                    );
                }
                StepKind::PartialProduct { .. } => {}
            }
        }

        script.push(
            StepKind::Result,
            "Combine the results".to_string(),
            format!("The final result is {}.", format_tenths(self.result_tenths)),
            Highlight::default(),
        );
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::ClassLevel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn kinds(script: &StepScript) -> Vec<StepKind> {
        script.steps().iter().map(|s| s.kind).collect()
    }

    #[test]
    fn addition_with_ones_carry_narrates_the_carry() {
        let script = AdditionProblem::new(47, 38).build_script();
        assert_eq!(
            kinds(&script),
            vec![
                StepKind::Intro,
                StepKind::DigitOp { place: 0 },
                StepKind::Carry { from_place: 0 },
                StepKind::DigitOp { place: 1 },
                StepKind::Result,
            ]
        );
        assert!(script.steps()[1].voice.contains("7 plus 8"));
        assert!(script.steps()[1].voice.contains("with a carry of 1"));
        assert!(script.steps()[3].voice.contains("plus the carried 1"));
        assert!(script.last().expect("result step").voice.contains("85"));
    }

    #[test]
    fn carry_free_addition_has_no_carry_steps() {
        let script = AdditionProblem::new(23, 45).build_script();
        assert!(kinds(&script)
            .iter()
            .all(|k| !matches!(k, StepKind::Carry { .. })));
        assert!(script.last().expect("result step").voice.contains("68"));
    }

    #[test]
    fn subtraction_with_borrow_narrates_the_borrow() {
        let script = SubtractionProblem::new(52, 27).build_script();
        assert_eq!(
            kinds(&script),
            vec![
                StepKind::Intro,
                StepKind::Borrow { place: 0 },
                StepKind::DigitOp { place: 0 },
                StepKind::DigitOp { place: 1 },
                StepKind::Result,
            ]
        );
        assert!(script.steps()[1].voice.contains("because 2 is less than 7"));
        assert!(script.steps()[2].voice.contains("12 minus 7 equals 5"));
        // After lending, the tens column works 4 minus 2.
        assert!(script.steps()[3].voice.contains("4 minus 2 equals 2"));
        assert!(script.last().expect("result step").voice.contains("25"));
    }

    #[test]
    fn multiplication_emits_one_block_per_multiplier_digit() {
        let script = MultiplicationProblem::new(24, 35).build_script();
        let partials: Vec<&Step> = script
            .steps()
            .iter()
            .filter(|s| matches!(s.kind, StepKind::PartialProduct { .. }))
            .collect();
        // Two opener steps and two completion steps, one pair per digit.
        assert_eq!(partials.len(), 4);
        assert!(partials[1].voice.contains("partial product 120"));
        assert!(partials[3].voice.contains("partial product 720"));
        let result = script.last().expect("result step");
        assert!(result.voice.contains("24 times 35 equals 840"));
    }

    #[test]
    fn multiplication_narrates_column_carries() {
        // 24 * 5: ones column 20 writes 0 carry 2.
        let script = MultiplicationProblem::new(24, 5).build_script();
        let carry_step = script
            .steps()
            .iter()
            .find(|s| matches!(s.kind, StepKind::Carry { .. }))
            .expect("carry step");
        assert!(carry_step.voice.contains("write 0 and carry the 2"));
        let final_carry = script
            .steps()
            .iter()
            .filter(|s| matches!(s.kind, StepKind::Carry { .. }))
            .last()
            .expect("final carry step");
        assert!(final_carry.voice.contains("final carry 1"));
    }

    #[test]
    fn long_division_script_walks_the_trace() {
        let problem = DivisionProblem::new(156, 12, DivisionStyle::LongDivision);
        let script = problem.build_script();
        assert!(script.steps()[1]
            .voice
            .contains("1 is less than 12, so we write 0"));
        assert!(script.steps()[2].voice.contains("Divide 15 by 12"));
        assert!(script.steps()[3].voice.contains("Divide 36 by 12"));
        let result = script.last().expect("result step");
        assert!(result.voice.contains("The final answer is 13"));
        assert!(result.voice.contains("remainder of 0"));
    }

    #[test]
    fn grouping_division_script_is_three_steps() {
        let problem = DivisionProblem::new(17, 5, DivisionStyle::Grouping);
        let script = problem.build_script();
        assert_eq!(script.len(), 3);
        assert!(script.steps()[1].voice.contains("groups of 5 fit into 17"));
        assert!(script
            .last()
            .expect("result step")
            .voice
            .contains("equals 3 with a remainder of 2"));
    }

    #[test]
    fn decimal_addition_aligns_and_narrates_tenths() {
        let problem = DecimalProblem::new(47, 38, DecimalOp::Add);
        let script = problem.build_script();
        assert!(script.steps()[1].voice.contains("align the decimal points"));
        let tenths = script
            .steps()
            .iter()
            .find(|s| s.instruction.contains("tenths"))
            .expect("tenths step");
        assert!(tenths.voice.contains("7 plus 8"));
        assert!(script
            .last()
            .expect("result step")
            .voice
            .contains("The final result is 8.5"));
    }

    #[test]
    fn decimal_subtraction_borrows_across_the_point() {
        let problem = DecimalProblem::new(52, 27, DecimalOp::Subtract);
        let script = problem.build_script();
        let borrow = script
            .steps()
            .iter()
            .find(|s| matches!(s.kind, StepKind::Borrow { .. }))
            .expect("borrow step");
        assert!(borrow.voice.contains("borrow 1 from the ones place"));
        assert!(script
            .last()
            .expect("result step")
            .voice
            .contains("The final result is 2.5"));
    }

    #[test]
    fn build_steps_is_deterministic_for_identical_problems() {
        let mut rng = StdRng::seed_from_u64(42);
        for level in 1..=4u8 {
            let level = ClassLevel::new(level).expect("valid level");
            for kind in [
                crate::problem::OperationKind::Addition,
                crate::problem::OperationKind::Subtraction,
                crate::problem::OperationKind::Multiplication,
                crate::problem::OperationKind::Division,
                crate::problem::OperationKind::Decimal,
            ] {
                let problem = Problem::generate(kind, level, &mut rng);
                assert_eq!(
                    build_steps(&problem),
                    build_steps(&problem),
                    "script for {:?} is not deterministic",
                    problem
                );
            }
        }
    }

    #[test]
    fn every_script_is_intro_first_result_last() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let problem = Problem::generate(
                crate::problem::OperationKind::Multiplication,
                ClassLevel::new(3).expect("valid level"),
                &mut rng,
            );
            let script = build_steps(&problem);
            assert!(matches!(
                script.get(0).expect("intro step").kind,
                StepKind::Intro
            ));
            assert!(matches!(
                script.last().expect("result step").kind,
                StepKind::Result
            ));
        }
    }
}
