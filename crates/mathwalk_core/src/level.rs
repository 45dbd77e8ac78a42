use crate::problem::ClassLevel;
use serde::{Deserialize, Serialize};

/// Bounds for custom problem input at one class level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelLimits {
    /// Largest addend, minuend, subtrahend, or multiplicand accepted.
    pub max_operand: u64,
    /// Largest multiplier accepted.
    pub max_multiplier: u64,
    /// Largest divisor accepted.
    pub max_divisor: u64,
    /// Most dividend digits accepted in the long-division editor.
    pub max_dividend_digits: usize,
}

/// The per-level bound table. One authoritative table, serializable so a
/// deployment can override it, instead of constants scattered across
/// screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitTable {
    levels: [LevelLimits; 4],
}

impl Default for LimitTable {
    fn default() -> Self {
        Self {
            levels: [
                LevelLimits {
                    max_operand: 9,
                    max_multiplier: 9,
                    max_divisor: 9,
                    max_dividend_digits: 2,
                },
                LevelLimits {
                    max_operand: 99,
                    max_multiplier: 9,
                    max_divisor: 12,
                    max_dividend_digits: 3,
                },
                LevelLimits {
                    max_operand: 999,
                    max_multiplier: 99,
                    max_divisor: 15,
                    max_dividend_digits: 4,
                },
                LevelLimits {
                    max_operand: 9999,
                    max_multiplier: 99,
                    max_divisor: 99,
                    max_dividend_digits: 6,
                },
            ],
        }
    }
}

impl LimitTable {
    pub fn for_level(&self, level: ClassLevel) -> LevelLimits {
        self.levels[usize::from(level.get()) - 1]
    }
}
