//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, ErrorBanner, LOADING_ANIM_CYCLE_TICKS};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch => {
            let query = state.query.clone();
            start_fetch(state, query)
        }

        Action::WeatherDidLoad(seq, snapshot) => {
            if seq != state.request_seq {
                tracing::debug!(seq, current = state.request_seq, "dropping stale weather result");
                return DispatchResult::unchanged();
            }
            state.snapshot = Some(snapshot.clone());
            state.weather = DataResource::Loaded(snapshot);
            state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);
            DispatchResult::changed()
        }

        Action::WeatherDidError(seq, msg) => {
            if seq != state.request_seq {
                tracing::debug!(seq, current = state.request_seq, "dropping stale weather error");
                return DispatchResult::unchanged();
            }
            // `snapshot` is left alone so the last good result stays on screen
            state.weather = DataResource::Failed(msg.clone());
            state.loading_anim_ticks_remaining = ticks_to_phase_zero(state.tick_count);

            let id = state.next_error_id;
            state.next_error_id = state.next_error_id.wrapping_add(1);
            state.error = Some(ErrorBanner { id, message: msg });
            DispatchResult::changed_with(Effect::ScheduleErrorClear { id })
        }

        // ===== Search actions =====
        Action::SearchInputChange(text) => {
            if text == state.input {
                return DispatchResult::unchanged();
            }
            state.input = text;
            DispatchResult::changed()
        }

        Action::SearchSubmit(text) => {
            let query = text.trim();
            if query.is_empty() {
                state.shaking = true;
                return DispatchResult::changed_with(Effect::ScheduleShakeEnd);
            }

            let query = query.to_string();
            state.input.clear();
            start_fetch(state, query)
        }

        // ===== Error actions =====
        Action::ErrorDidExpire(id) => match &state.error {
            Some(banner) if banner.id == id => {
                state.error = None;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        // ===== UI actions =====
        Action::UiShakeDidEnd => {
            if state.shaking {
                state.shaking = false;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.loading_anim_active() || state.shaking {
                state.tick_count = state.tick_count.wrapping_add(1);
                if state.loading_anim_ticks_remaining > 0 {
                    state.loading_anim_ticks_remaining -= 1;
                }
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Make `query` the active one and issue the single authoritative fetch for it.
/// A banner from an earlier failure is dropped along with its clear timer.
fn start_fetch(state: &mut AppState, query: String) -> DispatchResult<Effect> {
    state.request_seq = state.request_seq.wrapping_add(1);
    state.query = query.clone();
    state.weather = DataResource::Loading;
    state.tick_count = 0;
    state.loading_anim_ticks_remaining = 0;

    let mut effects = vec![Effect::FetchWeather {
        query,
        seq: state.request_seq,
    }];
    if state.error.take().is_some() {
        effects.push(Effect::CancelErrorClear);
    }
    DispatchResult::changed_with_many(effects)
}

fn ticks_to_phase_zero(tick_count: u32) -> u32 {
    let cycle = LOADING_ANIM_CYCLE_TICKS.max(1);
    if tick_count == 0 {
        return cycle;
    }
    let remainder = tick_count % cycle;
    if remainder == 0 { 0 } else { cycle - remainder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WeatherSnapshot;

    fn snapshot(name: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            name: name.into(),
            country: "FR".into(),
            temperature: 21.4,
            feels_like: 20.9,
            humidity: 40,
            visibility: Some(10000),
            wind_speed: 3.6,
            condition: "Clear".into(),
            description: "clear sky".into(),
        }
    }

    #[test]
    fn test_weather_fetch_sets_loading() {
        let mut state = AppState::default();
        assert!(state.weather.is_empty());
        state.tick_count = 5;
        state.loading_anim_ticks_remaining = 7;

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(result.changed);
        assert!(state.weather.is_loading());
        assert_eq!(state.request_seq, 1);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.loading_anim_ticks_remaining, 0);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                query: "London".into(),
                seq: 1
            }]
        );
    }

    #[test]
    fn test_weather_did_load_clears_loading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch);
        state.tick_count = 1;

        let result = reducer(&mut state, Action::WeatherDidLoad(1, snapshot("Paris")));

        assert!(result.changed);
        assert!(state.weather.is_loaded());
        assert_eq!(state.snapshot, Some(snapshot("Paris")));
        assert_eq!(
            state.loading_anim_ticks_remaining,
            LOADING_ANIM_CYCLE_TICKS - 1
        );
    }

    #[test]
    fn test_submit_trims_and_clears_input() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchInputChange("  Tokyo ".into()));

        let result = reducer(&mut state, Action::SearchSubmit("  Tokyo ".into()));

        assert_eq!(state.query, "Tokyo");
        assert!(state.input.is_empty());
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                query: "Tokyo".into(),
                seq: 1
            }]
        );
    }

    #[test]
    fn test_whitespace_submit_only_shakes() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::SearchSubmit("   ".into()));

        assert!(state.shaking);
        assert_eq!(state.query, "London");
        assert_eq!(state.request_seq, 0);
        assert!(state.weather.is_empty());
        assert_eq!(result.effects, vec![Effect::ScheduleShakeEnd]);

        let result = reducer(&mut state, Action::UiShakeDidEnd);
        assert!(result.changed);
        assert!(!state.shaking);

        let result = reducer(&mut state, Action::UiShakeDidEnd);
        assert!(!result.changed);
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchSubmit("paris".into()));
        reducer(&mut state, Action::SearchSubmit("tokyo".into()));

        let result = reducer(&mut state, Action::WeatherDidLoad(1, snapshot("Paris")));
        assert!(!result.changed);
        assert!(state.weather.is_loading());

        let result = reducer(&mut state, Action::WeatherDidError(1, "late".into()));
        assert!(!result.changed);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_error_keeps_snapshot_and_schedules_clear() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch);
        reducer(&mut state, Action::WeatherDidLoad(1, snapshot("Paris")));
        reducer(&mut state, Action::SearchSubmit("nowhere".into()));

        let result = reducer(
            &mut state,
            Action::WeatherDidError(2, "city not found".into()),
        );

        assert!(state.weather.is_failed());
        assert_eq!(state.snapshot, Some(snapshot("Paris")));
        assert_eq!(state.error_message(), Some("city not found"));
        assert_eq!(result.effects, vec![Effect::ScheduleErrorClear { id: 0 }]);
    }

    #[test]
    fn test_expiry_only_clears_matching_banner() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch);
        reducer(&mut state, Action::WeatherDidError(1, "first".into()));
        reducer(&mut state, Action::WeatherFetch);
        reducer(&mut state, Action::WeatherDidError(2, "second".into()));

        let result = reducer(&mut state, Action::ErrorDidExpire(0));
        assert!(!result.changed);
        assert_eq!(state.error_message(), Some("second"));

        let result = reducer(&mut state, Action::ErrorDidExpire(1));
        assert!(result.changed);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_submit_clears_banner_and_cancels_timer() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch);
        reducer(&mut state, Action::WeatherDidError(1, "boom".into()));

        let result = reducer(&mut state, Action::SearchSubmit("Rome".into()));

        assert!(state.error.is_none());
        assert_eq!(
            result.effects,
            vec![
                Effect::FetchWeather {
                    query: "Rome".into(),
                    seq: 2
                },
                Effect::CancelErrorClear,
            ]
        );
    }

    #[test]
    fn test_refresh_after_error_drops_banner() {
        let mut state = AppState::default();
        reducer(&mut state, Action::WeatherFetch);
        reducer(&mut state, Action::WeatherDidError(1, "city not found".into()));

        let result = reducer(&mut state, Action::WeatherFetch);

        assert!(state.is_loading());
        assert!(state.error.is_none());
        assert_eq!(
            result.effects,
            vec![
                Effect::FetchWeather {
                    query: "London".into(),
                    seq: 2
                },
                Effect::CancelErrorClear,
            ]
        );

        let result = reducer(&mut state, Action::WeatherDidLoad(2, snapshot("London")));
        assert!(result.changed);
        assert!(state.weather.is_loaded());
        assert!(state.error.is_none());
    }

    #[test]
    fn test_tick_rerenders_during_animation() {
        let mut state = AppState::default();

        // Idle - no re-render
        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);

        // Remaining animation ticks - should re-render
        state.loading_anim_ticks_remaining = 1;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.loading_anim_ticks_remaining, 0);

        // Shaking - should re-render
        state.shaking = true;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);

        // Loading - should re-render even without remaining ticks
        state.shaking = false;
        state.weather = DataResource::Loading;
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
    }
}
