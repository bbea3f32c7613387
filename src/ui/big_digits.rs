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

//! Five-row block glyphs for drawing problem numbers large.

use unicode_width::UnicodeWidthStr;

pub const GLYPH_HEIGHT: usize = 5;

fn glyph(c: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => [" █ ", "██ ", " █ ", " █ ", "███"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", " ██", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        '+' => ["   ", " █ ", "███", " █ ", "   "],
        '-' => ["   ", "   ", "███", "   ", "   "],
        '×' => ["   ", "█ █", " █ ", "█ █", "   "],
        '÷' => [" █ ", "   ", "███", "   ", " █ "],
        '=' => ["   ", "███", "   ", "███", "   "],
        '?' => ["███", "  █", " ██", "   ", " █ "],
        ' ' => [" ", " ", " ", " ", " "],
        _ => return None,
    };
    Some(rows)
}

/// Render `text` as block glyphs, one column of space between glyphs.
/// Characters without a glyph are skipped.
#[must_use]
pub fn render(text: &str) -> [String; GLYPH_HEIGHT] {
    let mut rows: [String; GLYPH_HEIGHT] = Default::default();
    let mut first = true;
    for rows_of_char in text.chars().filter_map(glyph) {
        for (row, part) in rows.iter_mut().zip(rows_of_char) {
            if !first {
                row.push(' ');
            }
            row.push_str(part);
        }
        first = false;
    }
    rows
}

/// Display width of `text` rendered with [`render`].
#[must_use]
pub fn width(text: &str) -> usize {
    render(text)[0].width()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn glyphs_join_with_a_gap() {
        let rows = render("1+2");
        assert_eq!(rows[0], " █      ███");
        assert_eq!(rows[2], " █  ███ ███");
        assert_eq!(width("1+2"), 11);
    }

    #[test]
    fn all_rows_share_a_width() {
        let rows = render("12 × 9 = ?");
        let w = rows[0].width();
        assert!(rows.iter().all(|r| r.width() == w));
    }

    #[test]
    fn unknown_chars_are_skipped() {
        assert_eq!(render("a7"), render("7"));
        assert_eq!(width(""), 0);
    }
}
