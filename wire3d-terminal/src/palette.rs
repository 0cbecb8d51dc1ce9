/// Edge color palette
use crossterm::style::Color;
use wire3d_core::geometry::{MAX_COLOR, MIN_COLOR};

/// Terminal colors for edge color ids 1 through 9, in order.
pub const PALETTE: [Color; 9] = [
    Color::White,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::DarkYellow,
    Color::DarkGrey,
];

/// Foreground color for an edge color id. Ids outside the palette are
/// clamped to its ends.
pub fn color(id: u8) -> Color {
    let id = id.clamp(MIN_COLOR, MAX_COLOR);
    PALETTE[(id - MIN_COLOR) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_lookup() {
        assert_eq!(color(1), Color::White);
        assert_eq!(color(2), Color::Red);
        assert_eq!(color(9), Color::DarkGrey);
    }

    #[test]
    fn test_palette_clamps() {
        assert_eq!(color(0), color(1));
        assert_eq!(color(200), color(9));
    }
}
