//! Effect execution: each effect becomes a keyed task on the runtime's
//! task manager. Spawning under a key replaces the task already running there,
//! and dropping the manager aborts everything still pending.

use std::time::Duration;

use tui_dispatch::{TaskKey, TaskManager};

use crate::action::Action;
use crate::api::WeatherClient;
use crate::effect::Effect;
use crate::state::{ERROR_CLEAR_MS, SHAKE_MS};

pub const FETCH_TASK: &str = "weather";
pub const ERROR_CLEAR_TASK: &str = "error_clear";
pub const SHAKE_TASK: &str = "shake";

/// Run one effect
pub fn handle_effect(effect: Effect, tasks: &mut TaskManager<Action>, client: &WeatherClient) {
    match effect {
        Effect::FetchWeather { query, seq } => {
            tracing::info!(%query, seq, "fetching weather");
            let client = client.clone();
            // Aborts any fetch still in flight for an older query
            tasks.spawn(FETCH_TASK, async move {
                match client.fetch_current(&query).await {
                    Ok(snapshot) => {
                        tracing::info!(seq, location = %snapshot.display_name(), "weather fetched");
                        Action::WeatherDidLoad(seq, snapshot)
                    }
                    Err(e) => {
                        tracing::warn!(%query, seq, error = %e, "weather fetch failed");
                        Action::WeatherDidError(seq, e.user_message())
                    }
                }
            });
        }
        Effect::ScheduleErrorClear { id } => {
            tasks.debounce(
                ERROR_CLEAR_TASK,
                Duration::from_millis(ERROR_CLEAR_MS),
                async move { Action::ErrorDidExpire(id) },
            );
        }
        Effect::CancelErrorClear => {
            tasks.cancel(&TaskKey::new(ERROR_CLEAR_TASK));
        }
        Effect::ScheduleShakeEnd => {
            tasks.debounce(SHAKE_TASK, Duration::from_millis(SHAKE_MS), async {
                Action::UiShakeDidEnd
            });
        }
    }
}
