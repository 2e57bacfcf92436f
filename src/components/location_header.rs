//! Location header: the place name in FIGlet art, tinted by temperature band.
//! While a fetch is in flight the tint scrolls, which doubles as the loading
//! indicator when an older result is still on screen.

use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer,
    fonts, integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::{LOADING_ANIM_CYCLE_TICKS, WeatherSnapshot};

/// Rows the header needs besides the FIGlet name: a spacer and the subtitle
pub const HEADER_OVERHEAD: u16 = 2;

const GRADIENT_STOPS: usize = 9;
const GRADIENT_ANGLE: f32 = 5.0;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    /// Last good result; until there is one the pending query is shown
    pub snapshot: Option<&'a WeatherSnapshot>,
    pub query: &'a str,
    pub is_animating: bool,
    pub tick_count: u32,
}

/// Coarse temperature ranges, each with its own tint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureBand {
    Unknown,
    Freezing,
    Cool,
    Mild,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub fn from_celsius(celsius: Option<f64>) -> Self {
        match celsius {
            None => TemperatureBand::Unknown,
            Some(t) if t < 0.0 => TemperatureBand::Freezing,
            Some(t) if t < 15.0 => TemperatureBand::Cool,
            Some(t) if t < 25.0 => TemperatureBand::Mild,
            Some(t) if t < 35.0 => TemperatureBand::Warm,
            Some(_) => TemperatureBand::Hot,
        }
    }

    /// Gradient endpoints, left to right
    pub fn colors(self) -> (ArtColor, ArtColor) {
        let ((r1, g1, b1), (r2, g2, b2)) = match self {
            TemperatureBand::Unknown => ((180, 180, 180), (220, 220, 220)),
            TemperatureBand::Freezing => ((150, 200, 255), (200, 230, 255)),
            TemperatureBand::Cool => ((100, 180, 255), (150, 220, 200)),
            TemperatureBand::Mild => ((100, 200, 150), (255, 220, 100)),
            TemperatureBand::Warm => ((255, 180, 80), (255, 120, 80)),
            TemperatureBand::Hot => ((255, 100, 80), (255, 60, 60)),
        };
        (ArtColor::rgb(r1, g1, b1), ArtColor::rgb(r2, g2, b2))
    }
}

/// Color at `t` (0..1) across the header: faded edge, start, blend, end,
/// faded edge. Both ends match so the profile can wrap around.
fn profile((start, end): (ArtColor, ArtColor), t: f32) -> ArtColor {
    let edge = start.interpolate(end, 0.08);
    let mid = start.interpolate(end, 0.5);
    if t < 0.35 {
        edge.interpolate(start, t / 0.35)
    } else if t < 0.5 {
        start.interpolate(mid, (t - 0.35) / 0.15)
    } else if t < 0.65 {
        mid.interpolate(end, (t - 0.5) / 0.15)
    } else {
        end.interpolate(edge, (t - 0.65) / 0.35)
    }
}

/// Profile rotated by `phase`; one full turn per animation cycle
fn scrolling_fill(band: TemperatureBand, phase: f32) -> Fill {
    let colors = band.colors();
    let last = (GRADIENT_STOPS - 1) as f32;
    let stops = (0..GRADIENT_STOPS)
        .map(|i| {
            let pos = i as f32 / last;
            ColorStop::new(pos, profile(colors, (pos - phase).rem_euclid(1.0)))
        })
        .collect();
    Fill::Linear(LinearGradient::new(GRADIENT_ANGLE, stops))
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let name = props.snapshot.map_or(props.query, |s| s.name.as_str());
        let subtitle = props.snapshot.map_or("", |s| s.country.as_str());
        let band = TemperatureBand::from_celsius(props.snapshot.map(|s| s.temperature));
        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.0
        };

        let name_area = Rect {
            height: area.height.saturating_sub(HEADER_OVERHEAD),
            ..area
        };
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(scrolling_fill(band, phase));
        frame.render_widget(ArtBox::new(&renderer, name), name_area);

        if area.height > 0 {
            let subtitle_area = Rect {
                y: area.bottom() - 1,
                height: 1,
                ..area
            };
            let line = Line::styled(subtitle, Style::default().fg(Color::DarkGray)).centered();
            frame.render_widget(Paragraph::new(line), subtitle_area);
        }
    }
}
