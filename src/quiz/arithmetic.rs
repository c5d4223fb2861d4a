use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Moderate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Moderate, Difficulty::Advanced];

    /// Inclusive range both operands are drawn from.
    pub fn operand_range(&self) -> RangeInclusive<i64> {
        match self {
            Difficulty::Easy => 1..=9,
            Difficulty::Moderate => 10..=99,
            Difficulty::Advanced => 1000..=9999,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy (Single Digit)",
            Difficulty::Moderate => "Moderate (Double Digit)",
            Difficulty::Advanced => "Advanced (Four Digit)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn apply(&self, left: i64, right: i64) -> i64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub left: i64,
    pub right: i64,
    pub operator: Operator,
}

impl Question {
    pub fn answer(&self) -> i64 {
        self.operator.apply(self.left, self.right)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} =", self.left, self.operator.symbol(), self.right)
    }
}

pub fn generate_question<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Question {
    let range = difficulty.operand_range();
    let left = rng.gen_range(range.clone());
    let right = rng.gen_range(range);
    let operator = if rng.gen_bool(0.5) {
        Operator::Add
    } else {
        Operator::Subtract
    };
    Question {
        left,
        right,
        operator,
    }
}
