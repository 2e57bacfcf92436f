//! Condition icons: the static category table and its layered sprite art
//!
//! Sprites are loaded from text files at compile time using `include_str!`.
//! Precipitation sprites share one cloud layer and add a colored layer below it.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

// ============================================================================
// Sprite data - embedded at compile time
// File naming: {size}_{color}.txt
// ============================================================================

mod sprite_data {
    pub mod sun {
        pub const SMALL_YELLOW: &str = include_str!("../sprites/sun/small_yellow.txt");
        pub const MEDIUM_YELLOW: &str = include_str!("../sprites/sun/medium_yellow.txt");
    }
    pub mod cloud {
        pub const SMALL_GRAY: &str = include_str!("../sprites/cloud/small_gray.txt");
        pub const MEDIUM_GRAY: &str = include_str!("../sprites/cloud/medium_gray.txt");
        // Second, lower cloud for overcast skies
        pub const SMALL_DARKGRAY: &str = include_str!("../sprites/cloud/small_darkgray.txt");
        pub const MEDIUM_DARKGRAY: &str = include_str!("../sprites/cloud/medium_darkgray.txt");
    }
    pub mod haze {
        pub const SMALL_LIGHTGRAY: &str = include_str!("../sprites/haze/small_lightgray.txt");
        pub const MEDIUM_LIGHTGRAY: &str = include_str!("../sprites/haze/medium_lightgray.txt");
    }
    pub mod drizzle {
        pub const SMALL_BLUE: &str = include_str!("../sprites/drizzle/small_blue.txt");
        pub const MEDIUM_BLUE: &str = include_str!("../sprites/drizzle/medium_blue.txt");
    }
    pub mod rain {
        pub const SMALL_BLUE: &str = include_str!("../sprites/rain/small_blue.txt");
        pub const MEDIUM_BLUE: &str = include_str!("../sprites/rain/medium_blue.txt");
    }
    pub mod snow {
        pub const SMALL_WHITE: &str = include_str!("../sprites/snow/small_white.txt");
        pub const MEDIUM_WHITE: &str = include_str!("../sprites/snow/medium_white.txt");
    }
    pub mod thunderstorm {
        pub const SMALL_YELLOW: &str = include_str!("../sprites/thunderstorm/small_yellow.txt");
        pub const MEDIUM_YELLOW: &str = include_str!("../sprites/thunderstorm/medium_yellow.txt");
    }
}

// ============================================================================
// Layer compositing
// ============================================================================

/// A single sprite layer with its content and color
struct SpriteLayer {
    content: &'static str,
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let grids: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.content.lines().map(|line| line.chars().collect()).collect())
        .collect();

    let height = grids.iter().map(Vec::len).max().unwrap_or(0);
    let width = grids
        .iter()
        .flat_map(|rows| rows.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    let lines = (0..height)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..width)
                .map(|col| {
                    // Last layer is the foreground
                    let top = grids.iter().zip(layers).rev().find_map(|(grid, layer)| {
                        grid.get(row)
                            .and_then(|cells| cells.get(col))
                            .filter(|ch| **ch != ' ')
                            .map(|ch| (*ch, layer.color))
                    });
                    let (ch, color) = top.unwrap_or((' ', Color::Reset));
                    Span::styled(ch.to_string(), Style::default().fg(color))
                })
                .collect();
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    Text::from(lines)
}

// ============================================================================
// Types
// ============================================================================

/// Sprite size categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteSize {
    /// 5 lines
    Small,
    /// 7 lines
    Medium,
}

impl SpriteSize {
    /// Pick the largest sprite that fits the available height.
    /// Returns `None` if even Small won't fit.
    pub fn for_height(available: u16) -> Option<Self> {
        match available {
            0..=4 => None,
            5..=6 => Some(SpriteSize::Small),
            _ => Some(SpriteSize::Medium),
        }
    }
}

/// Condition categories that have an icon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Haze,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 7] = [
        WeatherCondition::Clear,
        WeatherCondition::Clouds,
        WeatherCondition::Haze,
        WeatherCondition::Drizzle,
        WeatherCondition::Rain,
        WeatherCondition::Snow,
        WeatherCondition::Thunderstorm,
    ];

    /// Map the API's `weather[0].main` value to an icon category.
    /// Anything else (Mist, Smoke, Tornado, ...) has no icon.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "Clear" => Some(WeatherCondition::Clear),
            "Clouds" => Some(WeatherCondition::Clouds),
            "Haze" => Some(WeatherCondition::Haze),
            "Drizzle" => Some(WeatherCondition::Drizzle),
            "Rain" => Some(WeatherCondition::Rain),
            "Snow" => Some(WeatherCondition::Snow),
            "Thunderstorm" => Some(WeatherCondition::Thunderstorm),
            _ => None,
        }
    }

    /// Emoji representation for when sprites don't fit
    pub fn emoji(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "\u{2600}\u{fe0f}",
            WeatherCondition::Clouds => "\u{2601}\u{fe0f}",
            WeatherCondition::Haze => "\u{1f32b}\u{fe0f}",
            WeatherCondition::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherCondition::Rain => "\u{1f327}\u{fe0f}",
            WeatherCondition::Snow => "\u{2744}\u{fe0f}",
            WeatherCondition::Thunderstorm => "\u{26c8}\u{fe0f}",
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Sprite height for a size; every condition uses the same grid
pub fn sprite_height(size: SpriteSize) -> u16 {
    get_sprite(WeatherCondition::Clear, size).lines.len() as u16
}

/// Get weather art for the given condition and size
pub fn get_sprite(condition: WeatherCondition, size: SpriteSize) -> Text<'static> {
    let pick = |small: &'static str, medium: &'static str| match size {
        SpriteSize::Small => small,
        SpriteSize::Medium => medium,
    };
    let cloud = || SpriteLayer {
        content: pick(sprite_data::cloud::SMALL_GRAY, sprite_data::cloud::MEDIUM_GRAY),
        color: Color::Rgb(160, 160, 175),
    };

    let layers: Vec<SpriteLayer> = match condition {
        WeatherCondition::Clear => vec![SpriteLayer {
            content: pick(sprite_data::sun::SMALL_YELLOW, sprite_data::sun::MEDIUM_YELLOW),
            color: Color::Yellow,
        }],

        WeatherCondition::Clouds => vec![
            SpriteLayer {
                content: pick(
                    sprite_data::cloud::SMALL_DARKGRAY,
                    sprite_data::cloud::MEDIUM_DARKGRAY,
                ),
                color: Color::Rgb(120, 120, 140),
            },
            SpriteLayer {
                color: Color::Rgb(190, 190, 200),
                ..cloud()
            },
        ],

        WeatherCondition::Haze => vec![
            cloud(),
            SpriteLayer {
                content: pick(
                    sprite_data::haze::SMALL_LIGHTGRAY,
                    sprite_data::haze::MEDIUM_LIGHTGRAY,
                ),
                color: Color::Rgb(180, 180, 190),
            },
        ],

        WeatherCondition::Drizzle => vec![
            cloud(),
            SpriteLayer {
                content: pick(
                    sprite_data::drizzle::SMALL_BLUE,
                    sprite_data::drizzle::MEDIUM_BLUE,
                ),
                color: Color::Rgb(130, 170, 200),
            },
        ],

        WeatherCondition::Rain => vec![
            cloud(),
            SpriteLayer {
                content: pick(sprite_data::rain::SMALL_BLUE, sprite_data::rain::MEDIUM_BLUE),
                color: Color::Rgb(80, 140, 200),
            },
        ],

        WeatherCondition::Snow => vec![
            cloud(),
            SpriteLayer {
                content: pick(
                    sprite_data::snow::SMALL_WHITE,
                    sprite_data::snow::MEDIUM_WHITE,
                ),
                color: Color::Rgb(200, 220, 255),
            },
        ],

        WeatherCondition::Thunderstorm => vec![
            SpriteLayer {
                color: Color::Rgb(120, 120, 140),
                ..cloud()
            },
            SpriteLayer {
                content: pick(
                    sprite_data::thunderstorm::SMALL_YELLOW,
                    sprite_data::thunderstorm::MEDIUM_YELLOW,
                ),
                color: Color::Yellow,
            },
        ],
    };

    composite_layers(&layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_sprite_size_for_height() {
        assert_eq!(SpriteSize::for_height(0), None);
        assert_eq!(SpriteSize::for_height(4), None);
        assert_eq!(SpriteSize::for_height(5), Some(SpriteSize::Small));
        assert_eq!(SpriteSize::for_height(6), Some(SpriteSize::Small));
        assert_eq!(SpriteSize::for_height(7), Some(SpriteSize::Medium));
        assert_eq!(SpriteSize::for_height(60), Some(SpriteSize::Medium));
    }

    #[test]
    fn test_category_table() {
        assert_eq!(
            WeatherCondition::from_category("Rain"),
            Some(WeatherCondition::Rain)
        );
        assert_eq!(
            WeatherCondition::from_category("Clouds"),
            Some(WeatherCondition::Clouds)
        );
        assert_eq!(
            WeatherCondition::from_category("Thunderstorm"),
            Some(WeatherCondition::Thunderstorm)
        );
        assert_eq!(WeatherCondition::from_category("Mist"), None);
        assert_eq!(WeatherCondition::from_category("rain"), None);
        assert_eq!(WeatherCondition::from_category(""), None);
    }

    #[test]
    fn test_every_sprite_fits_its_grid() {
        for size in [SpriteSize::Small, SpriteSize::Medium] {
            let height = sprite_height(size) as usize;
            for condition in WeatherCondition::ALL {
                let text = get_sprite(condition, size);
                assert_eq!(
                    text.lines.len(),
                    height,
                    "Sprite {:?}/{:?} has the wrong height",
                    condition,
                    size
                );
                assert!(!plain(&text).trim().is_empty());
            }
        }
    }

    #[test]
    fn test_foreground_layer_wins() {
        let text = composite_layers(&[
            SpriteLayer {
                content: "aaa",
                color: Color::Red,
            },
            SpriteLayer {
                content: " b",
                color: Color::Blue,
            },
        ]);
        assert_eq!(plain(&text), "aba");
        assert_eq!(text.lines[0].spans[1].style.fg, Some(Color::Blue));
        assert_eq!(text.lines[0].spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_emoji_fallback() {
        for condition in WeatherCondition::ALL {
            assert!(!condition.emoji().is_empty());
        }
    }
}
