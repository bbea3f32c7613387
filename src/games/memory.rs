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

//! Card matching: expressions and their results, face down.

use super::problems::{self, Operation};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use std::collections::HashSet;

pub const DEFAULT_PAIRS: usize = 6;
/// Largest board; level-2 problems only have a few dozen distinct results.
pub const MAX_PAIRS: usize = 12;
pub const COLUMNS: usize = 4;
/// Problems drawn per deal before settling for a smaller board.
const MAX_DEAL_DRAWS: usize = 1_000;
/// Seconds a mismatched pair stays face up.
pub const MISMATCH_DELAY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub label: String,
    pub pair: usize,
    pub state: CardState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Ignored,
    First,
    Matched { finished: bool },
    Mismatch,
}

#[derive(Debug)]
pub struct MemoryGame {
    cards: Vec<Card>,
    cursor: usize,
    open: Vec<usize>,
    hide_in: Option<f32>,
    moves: u32,
    pairs: usize,
    rng: StdRng,
}

impl MemoryGame {
    #[must_use]
    pub fn new(seed: u64, pairs: usize) -> Self {
        let mut game = Self {
            cards: Vec::new(),
            cursor: 0,
            open: Vec::with_capacity(2),
            hide_in: None,
            moves: 0,
            pairs: pairs.clamp(1, MAX_PAIRS),
            rng: StdRng::seed_from_u64(seed),
        };
        game.deal();
        game
    }

    /// Shuffle a fresh board. Every pair has a distinct result so a card can
    /// only ever match its own partner.
    pub fn deal(&mut self) {
        let mut used = HashSet::new();
        let mut cards = Vec::with_capacity(self.pairs * 2);
        let mut pair = 0;
        for _ in 0..MAX_DEAL_DRAWS {
            if pair == self.pairs {
                break;
            }
            let operation =
                if pair % 2 == 0 { Operation::Addition } else { Operation::Multiplication };
            let problem = problems::generate(operation, 2, &mut self.rng);
            if !used.insert(problem.answer) {
                continue;
            }
            cards.push(Card { label: problem.expression(), pair, state: CardState::Hidden });
            cards.push(Card { label: problem.answer.to_string(), pair, state: CardState::Hidden });
            pair += 1;
        }
        if pair < self.pairs {
            tracing::warn!(requested = self.pairs, dealt = pair, "ran out of distinct results");
            self.pairs = pair;
        }
        cards.shuffle(&mut self.rng);
        self.cards = cards;
        self.cursor = 0;
        self.open.clear();
        self.hide_in = None;
        self.moves = 0;
        tracing::debug!(pairs = self.pairs, "memory board dealt");
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.cards.iter().filter(|c| c.state == CardState::Matched).count() / 2
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.state == CardState::Matched)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cards.len().div_ceil(COLUMNS)
    }

    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        if self.cards.is_empty() {
            return;
        }
        let len = self.cards.len();
        let columns = COLUMNS.min(len);
        let col = (self.cursor % columns).saturating_add_signed(dx).min(columns - 1);
        let row = (self.cursor / columns).saturating_add_signed(dy).min(self.rows() - 1);
        self.cursor = (row * columns + col).min(len - 1);
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.cards.len() {
            self.cursor = index;
        }
    }

    pub fn reveal_cursor(&mut self) -> RevealOutcome {
        self.reveal(self.cursor)
    }

    pub fn reveal(&mut self, index: usize) -> RevealOutcome {
        if self.hide_in.is_some() {
            self.hide_open();
        }
        let Some(card) = self.cards.get_mut(index) else {
            return RevealOutcome::Ignored;
        };
        if card.state != CardState::Hidden {
            return RevealOutcome::Ignored;
        }
        card.state = CardState::Revealed;
        self.cursor = index;
        self.open.push(index);

        let &[first, second] = self.open.as_slice() else {
            return RevealOutcome::First;
        };
        self.moves += 1;
        if self.cards[first].pair == self.cards[second].pair {
            self.cards[first].state = CardState::Matched;
            self.cards[second].state = CardState::Matched;
            self.open.clear();
            RevealOutcome::Matched { finished: self.is_won() }
        } else {
            self.hide_in = Some(MISMATCH_DELAY);
            RevealOutcome::Mismatch
        }
    }

    /// Count down the mismatch delay; flips the pair back once it expires.
    pub fn tick(&mut self, dt: f32) {
        let Some(remaining) = self.hide_in.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining <= 0.0 {
            self.hide_open();
        }
    }

    fn hide_open(&mut self) {
        for index in self.open.drain(..) {
            if let Some(card) = self.cards.get_mut(index)
                && card.state == CardState::Revealed
            {
                card.state = CardState::Hidden;
            }
        }
        self.hide_in = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partner_of(game: &MemoryGame, index: usize) -> usize {
        let pair = game.cards()[index].pair;
        (0..game.cards().len()).find(|&i| i != index && game.cards()[i].pair == pair).unwrap()
    }

    fn non_partner_of(game: &MemoryGame, index: usize) -> usize {
        let pair = game.cards()[index].pair;
        (0..game.cards().len()).find(|&i| game.cards()[i].pair != pair).unwrap()
    }

    #[test]
    fn deal_creates_matching_pairs() {
        let game = MemoryGame::new(1, DEFAULT_PAIRS);
        assert_eq!(game.cards().len(), DEFAULT_PAIRS * 2);
        for pair in 0..DEFAULT_PAIRS {
            let members: Vec<_> = game.cards().iter().filter(|c| c.pair == pair).collect();
            assert_eq!(members.len(), 2);
            let (expr, result) = if members[0].label.contains(' ') {
                (members[0], members[1])
            } else {
                (members[1], members[0])
            };
            let parts: Vec<_> = expr.label.split(' ').collect();
            let left: u32 = parts[0].parse().unwrap();
            let right: u32 = parts[2].parse().unwrap();
            let value = if parts[1] == "+" { left + right } else { left * right };
            assert_eq!(value.to_string(), result.label);
        }
    }

    #[test]
    fn matching_pair_stays_up() {
        let mut game = MemoryGame::new(2, 3);
        let partner = partner_of(&game, 0);
        assert_eq!(game.reveal(0), RevealOutcome::First);
        assert_eq!(game.reveal(partner), RevealOutcome::Matched { finished: false });
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.reveal(0), RevealOutcome::Ignored);
    }

    #[test]
    fn mismatch_flips_back_after_delay() {
        let mut game = MemoryGame::new(3, 3);
        let other = non_partner_of(&game, 0);
        game.reveal(0);
        assert_eq!(game.reveal(other), RevealOutcome::Mismatch);
        game.tick(MISMATCH_DELAY / 2.0);
        assert_eq!(game.cards()[0].state, CardState::Revealed);
        game.tick(MISMATCH_DELAY);
        assert_eq!(game.cards()[0].state, CardState::Hidden);
        assert_eq!(game.cards()[other].state, CardState::Hidden);
    }

    #[test]
    fn revealing_during_delay_hides_pending_pair_first() {
        let mut game = MemoryGame::new(4, 3);
        let other = non_partner_of(&game, 0);
        game.reveal(0);
        game.reveal(other);
        let third = (0..game.cards().len()).find(|&i| i != 0 && i != other).unwrap();
        assert_eq!(game.reveal(third), RevealOutcome::First);
        assert_eq!(game.cards()[0].state, CardState::Hidden);
        assert_eq!(game.cards()[third].state, CardState::Revealed);
    }

    #[test]
    fn finding_every_pair_wins() {
        let mut game = MemoryGame::new(5, 4);
        let mut last = RevealOutcome::Ignored;
        for index in 0..game.cards().len() {
            if game.cards()[index].state != CardState::Hidden {
                continue;
            }
            let partner = partner_of(&game, index);
            game.reveal(index);
            last = game.reveal(partner);
        }
        assert_eq!(last, RevealOutcome::Matched { finished: true });
        assert!(game.is_won());
        game.deal();
        assert!(!game.is_won());
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn cursor_stays_on_the_board() {
        let mut game = MemoryGame::new(6, DEFAULT_PAIRS);
        game.move_cursor(-1, -1);
        assert_eq!(game.cursor(), 0);
        game.move_cursor(10, 10);
        assert_eq!(game.cursor(), game.cards().len() - 1);
        game.move_cursor(-1, 0);
        assert_eq!(game.cursor(), game.cards().len() - 2);
    }

    #[test]
    fn oversized_board_is_capped() {
        let game = MemoryGame::new(3, 10_000);
        assert_eq!(game.pairs(), MAX_PAIRS);
        assert_eq!(game.cards().len(), MAX_PAIRS * 2);
        let results: HashSet<&str> = game
            .cards()
            .iter()
            .filter(|c| !c.label.contains(' '))
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(results.len(), MAX_PAIRS);
    }
}
