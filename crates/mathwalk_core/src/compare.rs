use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The learner's answer in the comparison game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonAnswer {
    Less,
    Greater,
    Equal,
}

impl ComparisonAnswer {
    /// The symbol shown on the answer button.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonAnswer::Less => "<",
            ComparisonAnswer::Greater => ">",
            ComparisonAnswer::Equal => "=",
        }
    }
}

/// One comparison question; `max_value` sizes the number line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonQuestion {
    pub num1: u64,
    pub num2: u64,
    pub max_value: u64,
}

impl ComparisonQuestion {
    pub fn new(num1: u64, num2: u64, max_value: u64) -> Self {
        Self {
            num1,
            num2,
            max_value: max_value.max(num1).max(num2),
        }
    }

    pub fn correct_answer(&self) -> ComparisonAnswer {
        match self.num1.cmp(&self.num2) {
            Ordering::Less => ComparisonAnswer::Less,
            Ordering::Greater => ComparisonAnswer::Greater,
            Ordering::Equal => ComparisonAnswer::Equal,
        }
    }

    pub fn check(&self, answer: ComparisonAnswer) -> bool {
        answer == self.correct_answer()
    }
}

/// The stock deck: single-digit warm-ups, then two-digit questions.
pub fn standard_deck() -> Vec<ComparisonQuestion> {
    vec![
        ComparisonQuestion::new(4, 2, 10),
        ComparisonQuestion::new(7, 9, 10),
        ComparisonQuestion::new(5, 5, 10),
        ComparisonQuestion::new(1, 8, 10),
        ComparisonQuestion::new(12, 21, 30),
        ComparisonQuestion::new(25, 18, 30),
        ComparisonQuestion::new(15, 15, 30),
        ComparisonQuestion::new(29, 11, 30),
    ]
}

/// One run through a deck of comparison questions, tracking position and
/// score. Answer, then move on; the round completes after the last
/// question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRound {
    questions: Vec<ComparisonQuestion>,
    current: usize,
    score: usize,
    completed: bool,
}

impl ComparisonRound {
    pub fn new(questions: Vec<ComparisonQuestion>) -> Self {
        let completed = questions.is_empty();
        Self {
            questions,
            current: 0,
            score: 0,
            completed,
        }
    }

    /// A standard-deck round in shuffled order.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut questions = standard_deck();
        questions.shuffle(rng);
        Self::new(questions)
    }

    pub fn question(&self) -> Option<&ComparisonQuestion> {
        self.questions.get(self.current)
    }

    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Scores the answer against the current question.
    pub fn answer(&mut self, answer: ComparisonAnswer) -> bool {
        let correct = match self.questions.get(self.current) {
            Some(question) => question.check(answer),
            None => return false,
        };
        if correct {
            self.score += 1;
        }
        correct
    }

    /// Moves to the next question; completes the round after the last.
    pub fn next_question(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.completed = true;
        }
    }

    /// Starts over with the same deck reshuffled and the score cleared.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.questions.shuffle(rng);
        self.current = 0;
        self.score = 0;
        self.completed = self.questions.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn answers_compare_the_two_numbers() {
        assert_eq!(
            ComparisonQuestion::new(4, 2, 10).correct_answer(),
            ComparisonAnswer::Greater
        );
        assert_eq!(
            ComparisonQuestion::new(7, 9, 10).correct_answer(),
            ComparisonAnswer::Less
        );
        assert_eq!(
            ComparisonQuestion::new(5, 5, 10).correct_answer(),
            ComparisonAnswer::Equal
        );
    }

    #[test]
    fn number_line_extends_to_cover_the_operands() {
        let question = ComparisonQuestion::new(42, 7, 10);
        assert_eq!(question.max_value, 42);
    }

    #[test]
    fn round_scores_correct_answers_only() {
        let mut round = ComparisonRound::new(vec![
            ComparisonQuestion::new(4, 2, 10),
            ComparisonQuestion::new(7, 9, 10),
        ]);
        assert!(round.answer(ComparisonAnswer::Greater));
        round.next_question();
        assert!(!round.answer(ComparisonAnswer::Greater));
        round.next_question();
        assert_eq!(round.score(), 1);
        assert!(round.is_complete());
    }

    #[test]
    fn reset_reshuffles_and_clears_the_score() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut round = ComparisonRound::shuffled(&mut rng);
        round.answer(round.question().expect("question").correct_answer());
        round.reset(&mut rng);
        assert_eq!(round.score(), 0);
        assert_eq!(round.question_number(), 1);
        assert!(!round.is_complete());
        assert_eq!(round.total(), standard_deck().len());
    }

    #[test]
    fn answer_symbols_match_the_buttons() {
        assert_eq!(ComparisonAnswer::Less.symbol(), "<");
        assert_eq!(ComparisonAnswer::Greater.symbol(), ">");
        assert_eq!(ComparisonAnswer::Equal.symbol(), "=");
    }
}
