use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Diamond,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl ShapeColor {
    pub const ALL: [ShapeColor; 6] = [
        ShapeColor::Red,
        ShapeColor::Blue,
        ShapeColor::Green,
        ShapeColor::Yellow,
        ShapeColor::Purple,
        ShapeColor::Orange,
    ];
}

/// One tile in a shape pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternItem {
    pub shape: ShapeKind,
    pub color: ShapeColor,
}

impl PatternItem {
    fn random(rng: &mut impl Rng) -> Self {
        Self {
            shape: *ShapeKind::ALL.choose(rng).expect("shape list is non-empty"),
            color: *ShapeColor::ALL.choose(rng).expect("color list is non-empty"),
        }
    }
}

/// A find-the-next-shape puzzle: a repeating pattern, the hidden next
/// item, and four shuffled answer options (one correct, three
/// distractors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePuzzle {
    pub pattern: Vec<PatternItem>,
    pub options: Vec<PatternItem>,
    pub answer: PatternItem,
}

/// Builds a repeating-shape puzzle. The repeat length grows from 2 to 3
/// with the level, and the shown pattern from 3 tiles up to 7.
pub fn shape_puzzle(level: u8, rng: &mut impl Rng) -> ShapePuzzle {
    let level = level.max(1);
    let repeat_len = usize::from(level.clamp(2, 3));
    let pattern_len = (3 + usize::from(level) / 2).min(7);

    let base: Vec<PatternItem> = (0..repeat_len).map(|_| PatternItem::random(rng)).collect();
    let pattern: Vec<PatternItem> = (0..pattern_len).map(|i| base[i % repeat_len]).collect();
    let answer = base[pattern_len % repeat_len];

    let mut options = vec![answer];
    while options.len() < 4 {
        let distractor = PatternItem::random(rng);
        if !options.contains(&distractor) {
            options.push(distractor);
        }
    }
    options.shuffle(rng);

    ShapePuzzle {
        pattern,
        options,
        answer,
    }
}

/// How a growing number pattern advances from term to term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum GrowthRule {
    Add { step: u64 },
    Multiply { factor: u64 },
}

impl GrowthRule {
    fn apply(self, value: u64) -> u64 {
        match self {
            GrowthRule::Add { step } => value + step,
            GrowthRule::Multiply { factor } => value * factor,
        }
    }
}

/// A what-comes-next puzzle over a growing number sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowingPuzzle {
    pub terms: Vec<u64>,
    pub rule: GrowthRule,
    pub next: u64,
    pub options: Vec<u64>,
}

/// Builds a growing-number puzzle. Low levels count up by 1 or 2; middle
/// levels double; high levels pick either rule at random.
pub fn growing_puzzle(level: u8, rng: &mut impl Rng) -> GrowingPuzzle {
    let rule = match level {
        0..=2 => GrowthRule::Add { step: 1 },
        3..=4 => GrowthRule::Add { step: 2 },
        5..=6 => GrowthRule::Multiply { factor: 2 },
        _ => {
            if rng.gen_bool(0.5) {
                GrowthRule::Add {
                    step: rng.gen_range(1..=3),
                }
            } else {
                GrowthRule::Multiply { factor: 2 }
            }
        }
    };
    let start = if level > 3 && rng.gen_bool(0.5) {
        rng.gen_range(1..=3)
    } else {
        1
    };

    let mut terms = Vec::with_capacity(4);
    let mut value = start;
    for _ in 0..4 {
        terms.push(value);
        value = rule.apply(value);
    }
    let next = value;

    let mut options = vec![next];
    while options.len() < 4 {
        let jitter = rng.gen_range(1..=5);
        let candidate = if rng.gen_bool(0.5) {
            next + jitter
        } else {
            next.saturating_sub(jitter).max(1)
        };
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    options.shuffle(rng);

    GrowingPuzzle {
        terms,
        rule,
        next,
        options,
    }
}
