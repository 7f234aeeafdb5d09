use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::symbols::border;

/// Default play-field width in grid cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default play-field height in grid cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Snake length at the start of a round.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Base tick interval in milliseconds.
pub const INITIAL_TICK_INTERVAL_MS: u64 = 150;

/// Tick interval shrink per regular food eaten, in milliseconds.
pub const TICK_INTERVAL_DECREMENT_MS: u64 = 2;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Points granted by regular food.
pub const REGULAR_FOOD_POINTS: u32 = 1;

/// Points granted by bonus food.
pub const SPECIAL_FOOD_POINTS: u32 = 5;

/// Chance that a regular food spawn also places a bonus food.
pub const SPECIAL_FOOD_PROBABILITY: f64 = 0.10;

/// Bonus food lifetime in ticks, sized to roughly ten seconds at the base
/// tick interval.
pub const SPECIAL_FOOD_TTL_TICKS: u64 = 66;

/// Palette regular food colors are drawn from.
pub const FOOD_COLORS: &[Color] = &[
    Color::Rgb(255, 0, 0),
    Color::Rgb(255, 165, 0),
    Color::Rgb(255, 255, 0),
    Color::Rgb(0, 255, 0),
    Color::Rgb(0, 0, 255),
    Color::Rgb(128, 0, 128),
];

/// Solid color bonus food renders in.
pub const SPECIAL_FOOD_COLOR: Color = Color::White;

/// Background color for the play area and minimap.
pub const FIELD_BG: Color = Color::Black;

/// Glyph drawn for each snake segment.
pub const GLYPH_SNAKE_SEGMENT: &str = "█";

/// Glyph drawn for regular food.
pub const GLYPH_FOOD: &str = "●";

/// Glyph drawn for bonus food.
pub const GLYPH_SPECIAL_FOOD: &str = "✦";

/// Glyph for snake cells on the minimap.
pub const GLYPH_MINIMAP_CELL: &str = "▪";

/// Glyph for food cells on the minimap.
pub const GLYPH_MINIMAP_FOOD: &str = "·";

/// Half-block border set: solid side faces the play area.
///
/// - Top row + top corners: `▄` (solid bottom -> play area below)
/// - Bottom row + bottom corners: `▀` (solid top -> play area above)
/// - Left and right columns: `█` (fully solid)
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Snake color skin selected at startup.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Skin {
    NeonGreen,
    NeonBlue,
    NeonPink,
    /// Per-segment hue cycling, animated by the tick counter.
    Rainbow,
}

impl Skin {
    /// Returns the color for body segment `index` at simulation tick `tick`.
    #[must_use]
    pub fn segment_color(self, index: usize, tick: u64) -> Color {
        match self {
            Self::NeonGreen => Color::Rgb(57, 255, 20),
            Self::NeonBlue => Color::Rgb(0, 255, 255),
            Self::NeonPink => Color::Rgb(255, 0, 255),
            Self::Rainbow => {
                let hue = (tick.wrapping_mul(8) + (index as u64) * 30) % 360;
                hue_color(hue as f32)
            }
        }
    }
}

/// Converts a hue in degrees to a fully saturated, half-lightness RGB color.
fn hue_color(hue: f32) -> Color {
    let x = 1.0 - ((hue / 60.0) % 2.0 - 1.0).abs();
    let (r, g, b) = match hue as u32 {
        0..=59 => (1.0, x, 0.0),
        60..=119 => (x, 1.0, 0.0),
        120..=179 => (0.0, 1.0, x),
        180..=239 => (0.0, x, 1.0),
        240..=299 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    Color::Rgb(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}
