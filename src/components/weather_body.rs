use artbox::{
    Alignment as ArtAlignment, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use tui_dispatch::DataResource;

use super::location_header::{HEADER_OVERHEAD, TemperatureBand};
use super::{Component, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::sprites::{self, SpriteSize};
use crate::state::{AppState, WeatherSnapshot};

/// The result card: location, icon, temperature and readings
pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub state: &'a AppState,
}

/// Fixed rows: blank + blank + description + readings.
const LAYOUT_FIXED: u16 = 4;

/// Text cap tiers: (header_cap, temp_cap).
/// terminus(6), miniwi(4), plain(1) with HEADER_OVERHEAD added to header.
const TEXT_TIERS: [(u16, u16); 3] = [
    (6 + HEADER_OVERHEAD, 6),
    (4 + HEADER_OVERHEAD, 4),
    (1 + HEADER_OVERHEAD, 1),
];

struct LayoutSizing {
    sprite: Option<SpriteSize>,
    sprite_h: u16,
    header_cap: u16,
    temp_cap: u16,
}

/// Fit the largest sprite by progressively shrinking text caps.
/// Falls back to emoji when no sprite fits even with plain text.
fn compute_layout(area_height: u16) -> LayoutSizing {
    for &(hcap, tcap) in &TEXT_TIERS {
        let budget = area_height.saturating_sub(hcap + tcap + LAYOUT_FIXED);
        if let Some(size) = SpriteSize::for_height(budget) {
            return LayoutSizing {
                sprite: Some(size),
                sprite_h: sprites::sprite_height(size),
                header_cap: hcap,
                temp_cap: tcap,
            };
        }
    }
    let (hcap, tcap) = TEXT_TIERS[2];
    LayoutSizing {
        sprite: None,
        sprite_h: 1,
        header_cap: hcap,
        temp_cap: tcap,
    }
}

/// Whole degrees Celsius, e.g. `13°C`
pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", celsius.round() as i64)
}

/// One-line readings under the description
pub fn format_readings(snapshot: &WeatherSnapshot) -> String {
    let visibility = match snapshot.visibility_km() {
        Some(km) => format!("{km} km"),
        None => "n/a".to_string(),
    };
    format!(
        "Feels like {}°C | Humidity {}% | Wind {} m/s | Visibility {}",
        snapshot.feels_like_rounded(),
        snapshot.humidity,
        snapshot.wind_speed,
        visibility,
    )
}

// ============================================================================
// Component
// ============================================================================

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let sizing = compute_layout(area.height);

        match CardView::from_state(props.state) {
            CardView::Ready(snapshot) => {
                render_ready(frame, area, props.state, snapshot, &sizing);
            }
            CardView::Loading => {
                render_placeholder(frame, area, props.state, &sizing, "Loading...");
            }
            CardView::Unavailable => {
                render_placeholder(frame, area, props.state, &sizing, "No weather data");
            }
            CardView::Empty => render_hint(frame, area, props.state, &sizing),
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut header = LocationHeader;
    header.render(
        frame,
        area,
        LocationHeaderProps {
            snapshot: state.snapshot.as_ref(),
            query: &state.query,
            is_animating: state.loading_anim_active(),
            tick_count: state.tick_count,
        },
    );
}

fn make_layout(area: Rect, sizing: &LayoutSizing) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Max(sizing.header_cap),
        Constraint::Length(1),
        Constraint::Length(sizing.sprite_h),
        Constraint::Length(1),
        Constraint::Max(sizing.temp_cap),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .split(area)
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    snapshot: &WeatherSnapshot,
    sizing: &LayoutSizing,
) {
    let chunks = make_layout(area, sizing);

    render_header(frame, chunks[0], state);

    // Unknown categories leave the icon row blank
    if let Some(condition) = snapshot.icon() {
        match sizing.sprite {
            Some(size) => {
                let art = sprites::get_sprite(condition, size);
                frame.render_widget(
                    Paragraph::new(art).alignment(Alignment::Center),
                    chunks[2],
                );
            }
            None => {
                let emoji = Line::from(condition.emoji()).centered();
                frame.render_widget(Paragraph::new(emoji), chunks[2]);
            }
        }
    }

    let temp_text = format_temperature(snapshot.temperature);
    let (start, end) = TemperatureBand::from_celsius(Some(snapshot.temperature)).colors();
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(Fill::Linear(LinearGradient::horizontal(start, end)));
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[4]);

    let desc = Line::from(vec![Span::styled(
        snapshot.description.clone(),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(desc), chunks[5]);

    let readings = Line::from(vec![Span::styled(
        format_readings(snapshot),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(readings), chunks[6]);
}

fn render_placeholder(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    sizing: &LayoutSizing,
    message: &str,
) {
    let chunks = make_layout(area, sizing);
    render_header(frame, chunks[0], state);

    let msg = Line::from(vec![Span::styled(
        message,
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(msg), chunks[5]);
}

fn render_hint(frame: &mut Frame, area: Rect, state: &AppState, sizing: &LayoutSizing) {
    let chunks = make_layout(area, sizing);
    render_header(frame, chunks[0], state);

    let hint = Line::from(vec![
        Span::styled("Type a city and press ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan).bold()),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[5]);
}

// ============================================================================
// Helpers
// ============================================================================

enum CardView<'a> {
    /// Last good result; may be stale while loading or failed
    Ready(&'a WeatherSnapshot),
    Loading,
    Unavailable,
    Empty,
}

impl<'a> CardView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if let Some(snapshot) = &state.snapshot {
            return CardView::Ready(snapshot);
        }
        match &state.weather {
            DataResource::Loading => CardView::Loading,
            DataResource::Failed(_) => CardView::Unavailable,
            DataResource::Loaded(_) | DataResource::Empty => CardView::Empty,
        }
    }
}
