use crossterm::event::KeyCode;
use ratatui::{Frame, layout::Rect, style::Color};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const SEARCH_PLACEHOLDER: &str = "Search by city (e.g. Paris or Paris,FR)...";

/// Horizontal offsets cycled through while shaking, 3 ticks each
const SHAKE_OFFSETS: [i16; 6] = [-2, 2, -1, 1, -1, 0];

const INPUT_BG: Color = Color::Rgb(50, 50, 60);
const SHAKE_BG: Color = Color::Rgb(110, 40, 45);

/// Location input; Enter submits whatever is typed
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub is_focused: bool,
    pub shaking: bool,
    pub tick_count: u32,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style(bg: Color) -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::all(1),
            bg: Some(bg),
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

/// Shift `area` sideways for the current shake frame, staying inside `bounds`
pub fn shake_area(area: Rect, bounds: Rect, tick_count: u32) -> Rect {
    let step = (tick_count / 3) as usize % SHAKE_OFFSETS.len();
    let offset = SHAKE_OFFSETS[step];
    let max_x = bounds.right().saturating_sub(area.width);
    let x = (i32::from(area.x) + i32::from(offset)).clamp(i32::from(bounds.x), i32::from(max_x));
    Rect {
        x: x as u16,
        ..area
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

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

        if key.code == KeyCode::Enter {
            return vec![(props.on_submit)(props.value.to_string())];
        }

        let input_props = TextInputProps {
            value: props.value,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(INPUT_BG),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (area, bg) = if props.shaking {
            // Narrow by the widest offset so the shifted bar stays on screen
            let inner = Rect {
                x: area.x + 2,
                width: area.width.saturating_sub(4),
                ..area
            };
            (shake_area(inner, area, props.tick_count), SHAKE_BG)
        } else {
            (area, INPUT_BG)
        };

        let input_props = TextInputProps {
            value: props.value,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(bg),
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, area, input_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn props(value: &str) -> SearchBarProps<'_> {
        SearchBarProps {
            value,
            is_focused: true,
            shaking: false,
            tick_count: 0,
            on_change: Action::SearchInputChange,
            on_submit: Action::SearchSubmit,
        }
    }

    #[test]
    fn test_enter_submits_current_value() {
        let mut bar = SearchBar::new();
        let enter = crossterm::event::KeyEvent::from(KeyCode::Enter);

        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(enter), props("Paris"))
            .into_iter()
            .collect();

        actions.assert_count(1);
        actions.assert_first(Action::SearchSubmit("Paris".into()));
    }

    #[test]
    fn test_enter_submits_empty_value_too() {
        let mut bar = SearchBar::new();
        let enter = crossterm::event::KeyEvent::from(KeyCode::Enter);

        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(enter), props(""))
            .into_iter()
            .collect();

        actions.assert_first(Action::SearchSubmit(String::new()));
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(
                &EventKind::Key(key("x")),
                SearchBarProps {
                    is_focused: false,
                    ..props("")
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_shake_area_stays_in_bounds() {
        let bounds = Rect::new(0, 0, 40, 3);
        let inner = Rect::new(2, 0, 36, 3);
        for tick in 0..40 {
            let shaken = shake_area(inner, bounds, tick);
            assert!(shaken.x >= bounds.x);
            assert!(shaken.right() <= bounds.right());
            assert_eq!(shaken.width, inner.width);
        }
        assert_eq!(shake_area(inner, bounds, 0).x, 0);
        assert_eq!(shake_area(inner, bounds, 3).x, 4);
    }
}
