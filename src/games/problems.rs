// Aprende - arithmetic mini-games and a tutor chatbot for the terminal
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Arithmetic problem generators.

use rand::Rng;
use rand::seq::SliceRandom as _;

pub const MAX_LEVEL: u8 = 3;
/// Number of wrong choices offered next to the answer.
const DISTRACTORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl Operation {
    pub const ALL: [Self; 4] =
        [Self::Addition, Self::Subtraction, Self::Multiplication, Self::Division];

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Addition => '+',
            Self::Subtraction => '-',
            Self::Multiplication => '×',
            Self::Division => '÷',
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Addition => "Sumas",
            Self::Subtraction => "Restas",
            Self::Multiplication => "Multiplicaciones",
            Self::Division => "Divisiones",
        }
    }

    fn spoken(self) -> &'static str {
        match self {
            Self::Addition => "más",
            Self::Subtraction => "menos",
            Self::Multiplication => "por",
            Self::Division => "entre",
        }
    }

    /// Keyboard shortcut mapping (`+ - * x /`).
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '+' => Some(Self::Addition),
            '-' => Some(Self::Subtraction),
            '*' | 'x' => Some(Self::Multiplication),
            '/' => Some(Self::Division),
            _ => None,
        }
    }

    #[must_use]
    pub fn apply(self, left: u32, right: u32) -> Option<u32> {
        match self {
            Self::Addition => left.checked_add(right),
            Self::Subtraction => left.checked_sub(right),
            Self::Multiplication => left.checked_mul(right),
            Self::Division => {
                if right == 0 || left % right != 0 {
                    None
                } else {
                    Some(left / right)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub left: u32,
    pub right: u32,
    pub operation: Operation,
    pub answer: u32,
    /// The answer plus three distinct wrong values, shuffled.
    pub options: [u32; 4],
}

impl Problem {
    #[must_use]
    pub fn expression(&self) -> String {
        format!("{} {} {}", self.left, self.operation.symbol(), self.right)
    }

    #[must_use]
    pub fn question(&self) -> String {
        format!("¿Cuánto es {} {} {}?", self.left, self.operation.spoken(), self.right)
    }

    #[must_use]
    pub fn is_correct(&self, value: u32) -> bool {
        value == self.answer
    }
}

/// Operand ranges for `level` (clamped to `1..=MAX_LEVEL`).
///
/// Addition and subtraction bound each operand; multiplication and division
/// bound the table (first factor / divisor) and the second factor.
fn limits(operation: Operation, level: u8) -> (u32, u32) {
    let level = level.clamp(1, MAX_LEVEL);
    match operation {
        Operation::Addition | Operation::Subtraction => match level {
            1 => (10, 10),
            2 => (20, 20),
            _ => (100, 100),
        },
        Operation::Multiplication | Operation::Division => match level {
            1 => (5, 5),
            2 => (5, 10),
            _ => (10, 10),
        },
    }
}

pub fn generate(operation: Operation, level: u8, rng: &mut impl Rng) -> Problem {
    let (first, second) = limits(operation, level);
    let (left, right, answer) = match operation {
        Operation::Addition => {
            let a = rng.gen_range(0..=first);
            let b = rng.gen_range(0..=second);
            (a, b, a + b)
        }
        Operation::Subtraction => {
            let a = rng.gen_range(0..=first);
            let b = rng.gen_range(0..=second);
            let (big, small) = if a >= b { (a, b) } else { (b, a) };
            (big, small, big - small)
        }
        Operation::Multiplication => {
            let a = rng.gen_range(0..=first);
            let b = rng.gen_range(0..=second);
            (a, b, a * b)
        }
        Operation::Division => {
            let divisor = rng.gen_range(1..=first);
            let quotient = rng.gen_range(0..=second);
            (divisor * quotient, divisor, quotient)
        }
    };
    Problem { left, right, operation, answer, options: options_for(answer, rng) }
}

fn options_for(answer: u32, rng: &mut impl Rng) -> [u32; 4] {
    let spread = if answer >= 20 { 10 } else { 5 };
    let mut options = vec![answer];
    while options.len() < DISTRACTORS + 1 {
        let offset = rng.gen_range(1..=spread);
        let candidate =
            if rng.gen_bool(0.5) { answer.checked_sub(offset) } else { answer.checked_add(offset) };
        if let Some(value) = candidate
            && !options.contains(&value)
        {
            options.push(value);
        }
    }
    options.shuffle(rng);
    [options[0], options[1], options[2], options[3]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng as _;
    use rand::rngs::StdRng;

    fn problems(operation: Operation, level: u8) -> Vec<Problem> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..500).map(|_| generate(operation, level, &mut rng)).collect()
    }

    #[test]
    fn answers_match_the_operation() {
        for operation in Operation::ALL {
            for level in 1..=MAX_LEVEL {
                for p in problems(operation, level) {
                    assert_eq!(operation.apply(p.left, p.right), Some(p.answer), "{p:?}");
                }
            }
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        for p in problems(Operation::Subtraction, 3) {
            assert!(p.left >= p.right);
        }
    }

    #[test]
    fn division_is_exact_with_nonzero_divisor() {
        for p in problems(Operation::Division, 3) {
            assert_ne!(p.right, 0);
            assert_eq!(p.left % p.right, 0);
        }
    }

    #[test]
    fn level_bounds_operands() {
        for p in problems(Operation::Addition, 1) {
            assert!(p.left <= 10 && p.right <= 10);
        }
        for p in problems(Operation::Multiplication, 1) {
            assert!(p.left <= 5 && p.right <= 5);
        }
    }

    #[test]
    fn options_are_distinct_and_contain_answer() {
        for operation in Operation::ALL {
            for p in problems(operation, 2) {
                assert!(p.options.contains(&p.answer));
                let mut sorted = p.options.to_vec();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), 4, "{p:?}");
            }
        }
    }

    #[test]
    fn question_and_expression_text() {
        let p = Problem {
            left: 7,
            right: 5,
            operation: Operation::Addition,
            answer: 12,
            options: [12, 11, 13, 10],
        };
        assert_eq!(p.expression(), "7 + 5");
        assert_eq!(p.question(), "¿Cuánto es 7 más 5?");
    }

    #[test]
    fn key_shortcuts() {
        assert_eq!(Operation::from_key('x'), Some(Operation::Multiplication));
        assert_eq!(Operation::from_key('/'), Some(Operation::Division));
        assert_eq!(Operation::from_key('q'), None);
    }
}
