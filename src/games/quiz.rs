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

use super::problems::{self, MAX_LEVEL, Operation, Problem};
use rand::SeedableRng as _;
use rand::rngs::StdRng;

/// Correct answers in a row that raise the level.
pub const LEVEL_UP_STREAK: u32 = 3;
/// Digits accepted in the typed answer.
const MAX_TYPED_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong { answer: u32 },
}

impl Feedback {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Correct => "¡Correcto!".to_owned(),
            Self::Wrong { answer } => format!("La respuesta era {answer}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub leveled_up: bool,
}

/// Arithmetic practice: one problem at a time, answered by typing or by
/// picking one of four options.
#[derive(Debug)]
pub struct Quiz {
    operation: Operation,
    level: u8,
    problem: Problem,
    typed: String,
    score: u32,
    attempts: u32,
    streak: u32,
    feedback: Option<Feedback>,
    rng: StdRng,
}

impl Quiz {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let problem = problems::generate(Operation::Addition, 1, &mut rng);
        Self {
            operation: Operation::Addition,
            level: 1,
            problem,
            typed: String::new(),
            score: 0,
            attempts: 0,
            streak: 0,
            feedback: None,
            rng,
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[must_use]
    pub fn typed(&self) -> &str {
        &self.typed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Switch operation; the level restarts at 1.
    pub fn set_operation(&mut self, operation: Operation) {
        if operation == self.operation {
            return;
        }
        self.operation = operation;
        self.level = 1;
        self.streak = 0;
        self.feedback = None;
        self.next_problem();
    }

    pub fn push_digit(&mut self, digit: char) {
        if digit.is_ascii_digit() && self.typed.len() < MAX_TYPED_DIGITS {
            self.typed.push(digit);
        }
    }

    pub fn pop_digit(&mut self) {
        self.typed.pop();
    }

    /// Answer with the typed number. `None` when nothing was typed.
    pub fn submit_typed(&mut self) -> Option<AnswerOutcome> {
        let value = self.typed.parse().ok()?;
        Some(self.answer(value))
    }

    /// Answer with option `index` (0-based). `None` for an invalid index.
    pub fn choose(&mut self, index: usize) -> Option<AnswerOutcome> {
        let value = *self.problem.options.get(index)?;
        Some(self.answer(value))
    }

    fn answer(&mut self, value: u32) -> AnswerOutcome {
        self.attempts += 1;
        let correct = self.problem.is_correct(value);
        let mut leveled_up = false;
        if correct {
            self.score += 1;
            self.streak += 1;
            self.feedback = Some(Feedback::Correct);
            if self.streak >= LEVEL_UP_STREAK && self.level < MAX_LEVEL {
                self.level += 1;
                self.streak = 0;
                leveled_up = true;
            }
        } else {
            self.streak = 0;
            self.feedback = Some(Feedback::Wrong { answer: self.problem.answer });
        }
        tracing::debug!(
            problem = %self.problem.expression(),
            value,
            correct,
            level = self.level,
            "quiz answer"
        );
        self.next_problem();
        AnswerOutcome { correct, leveled_up }
    }

    fn next_problem(&mut self) {
        self.typed.clear();
        self.problem = problems::generate(self.operation, self.level, &mut self.rng);
    }
}
