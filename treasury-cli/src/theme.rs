//! Parrot/neon colour tokens for the yield curve chart.
//!
//! Neon accents on a dark background; one series colour per plotted
//! curve, cycling when there are more curves than colours.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (borders, title)
    pub accent: Color,
    /// Steel blue (axes, legend frame)
    pub muted: Color,
    /// Light gray (axis titles)
    pub text_secondary: Color,
    /// Line colours, newest curve first.
    pub series: [Color; 10],
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            muted: Color::Rgb(100, 149, 237),
            text_secondary: Color::Rgb(180, 180, 190),
            series: [
                Color::Rgb(0, 255, 255),   // cyan
                Color::Rgb(0, 255, 128),   // neon green
                Color::Rgb(255, 20, 147),  // hot pink
                Color::Rgb(255, 140, 0),   // neon orange
                Color::Rgb(147, 112, 219), // cool purple
                Color::Rgb(255, 255, 0),   // yellow
                Color::Rgb(30, 144, 255),  // dodger blue
                Color::Rgb(255, 99, 71),   // tomato
                Color::Rgb(127, 255, 212), // aquamarine
                Color::Rgb(238, 130, 238), // violet
            ],
        }
    }

    pub fn series_color(&self, index: usize) -> Color {
        self.series[index % self.series.len()]
    }
}
