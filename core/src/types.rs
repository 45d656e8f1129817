use core::fmt;
use serde::{Deserialize, Serialize};

/// Tiles along one side of the (square) board.
pub type Side = u8;

/// Count type used for card positions, card totals and pair totals.
pub type CardCount = u16;

pub const fn mult(a: Side, b: Side) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}

/// Faces a deck can draw from, in draw order.
pub const SYMBOL_POOL: [&str; 32] = [
    "🍎", "🍌", "🍇", "🍓", "🍉", "🍒", "🥝", "🍍", //
    "🥑", "🍋", "🍑", "🍈", "🍐", "🍊", "🥥", "🌽", //
    "🥕", "🍄", "🫐", "🥔", "🍆", "🥦", "🌶", "🧄", //
    "🧅", "🥬", "🥒", "🫛", "🌰", "🍠", "🫑", "🍅", //
];

/// Opaque card face, an index into [`SYMBOL_POOL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn glyph(self) -> &'static str {
        SYMBOL_POOL.get(self.index()).copied().unwrap_or("?")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_faces_are_distinct() {
        for (i, a) in SYMBOL_POOL.iter().enumerate() {
            for b in &SYMBOL_POOL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn symbol_outside_pool_renders_placeholder() {
        assert_eq!(Symbol(0).glyph(), "🍎");
        assert_eq!(Symbol(200).glyph(), "?");
    }
}
