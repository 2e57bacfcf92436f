use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SearchBar, SearchBarProps, WeatherBody, WeatherBodyProps};
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole view: search bar, status line, result card and help bar
#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchBar,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> SearchBarProps<'a> {
        SearchBarProps {
            value: &state.input,
            is_focused,
            shaking: state.shaking,
            tick_count: state.tick_count,
            on_change: Action::SearchInputChange,
            on_submit: Action::SearchSubmit,
        }
    }
}

/// Loading notice while a fetch is in flight, the error banner after a
/// failure, nothing once loaded
fn status_line(state: &AppState) -> Line<'static> {
    if state.is_loading() {
        return Line::from(vec![Span::styled(
            format!("Loading weather for {}...", state.query),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
    }
    match state.error_message() {
        Some(message) if state.weather.is_failed() => Line::from(vec![
            Span::raw(format!("{ERROR_ICON} ")),
            Span::styled(message.to_string(), Style::default().fg(Color::Red).bold()),
        ])
        .centered(),
        _ => Line::default(),
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::F(5) => return vec![Action::WeatherFetch],
            _ => {}
        }

        // Everything else is typing
        self.search
            .handle_event(event, Self::search_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Banner / loading notice
            Constraint::Min(1),    // Result card
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        self.search.render(
            frame,
            chunks[0],
            Self::search_props(props.state, props.is_focused),
        );

        frame.render_widget(Paragraph::new(status_line(props.state)), chunks[1]);

        let mut body = WeatherBody;
        body.render(frame, chunks[2], WeatherBodyProps { state: props.state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("F5", "refresh"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
