pub mod charts;
pub mod popup;
pub mod tables;

use ratatui::style::Color;
use senate_trades_core::table::Tone;

pub const fn tone_color(tone: Tone) -> Color {
    let (r, g, b) = tone.rgb();
    Color::Rgb(r, g, b)
}
