//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::sprites::WeatherCondition;

/// Current weather for one location, as returned by the weather API
///
/// Replaced wholesale on every successful fetch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub name: String,
    pub country: String,
    /// Celsius
    pub temperature: f64,
    /// Celsius
    pub feels_like: f64,
    /// Percent
    pub humidity: u8,
    /// Meters; the API leaves it out for some stations
    pub visibility: Option<u32>,
    /// Meters per second
    pub wind_speed: f64,
    /// Category from the API (`Rain`, `Clouds`, ...), used to pick the icon
    pub condition: String,
    pub description: String,
}

impl WeatherSnapshot {
    pub fn temperature_rounded(&self) -> i64 {
        self.temperature.round() as i64
    }

    pub fn feels_like_rounded(&self) -> i64 {
        self.feels_like.round() as i64
    }

    pub fn visibility_km(&self) -> Option<f64> {
        self.visibility.map(|m| f64::from(m) / 1000.0)
    }

    /// Icon category, or `None` for categories without an icon
    pub fn icon(&self) -> Option<WeatherCondition> {
        WeatherCondition::from_category(&self.condition)
    }

    /// "Name, CC", or just the name when the API has no country
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Transient error text shown over the current content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorBanner {
    /// Changes every time a new banner is raised; clear timers carry it
    pub id: u64,
    pub message: String,
}

/// Location looked up when nothing else is given
pub const DEFAULT_QUERY: &str = "London";

/// How long an error banner stays up
pub const ERROR_CLEAR_MS: u64 = 2000;

/// How long the search bar shakes after an empty submission
pub const SHAKE_MS: u64 = 500;

/// Animation timing for the header gradient seam.
pub const LOADING_ANIM_TICK_MS: u64 = 15;
pub const LOADING_ANIM_CYCLE_TICKS: u32 = 60;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Location the authoritative fetch belongs to
    #[debug(section = "Query", label = "Active")]
    pub query: String,

    /// Sequence number of the authoritative fetch; older results are dropped
    #[debug(section = "Query", label = "Request #")]
    pub request_seq: u64,

    /// Request lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Request", debug_fmt)]
    pub weather: DataResource<WeatherSnapshot>,

    /// Last good result, kept visible while an error is shown
    #[debug(section = "Weather", label = "Snapshot", debug_fmt)]
    pub snapshot: Option<WeatherSnapshot>,

    #[debug(section = "Weather", label = "Error", debug_fmt)]
    pub error: Option<ErrorBanner>,

    // --- Input (skipped) ---
    /// Text currently typed in the search bar
    #[debug(skip)]
    pub input: String,

    /// Empty-submit acknowledgment in progress
    #[debug(skip)]
    pub shaking: bool,

    /// Id handed to the next error banner
    #[debug(skip)]
    pub next_error_id: u64,

    // --- Animation internals (skipped) ---
    /// Animation frame counter (for gradient seam and shake offset)
    #[debug(skip)]
    pub tick_count: u32,

    /// Remaining ticks to finish the current animation cycle after loading
    #[debug(skip)]
    pub loading_anim_ticks_remaining: u32,
}

impl AppState {
    /// Create state that will look up `query` on the first fetch
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            request_seq: 0,
            weather: DataResource::Empty,
            snapshot: None,
            error: None,
            input: String::new(),
            shaking: false,
            next_error_id: 0,
            tick_count: 0,
            loading_anim_ticks_remaining: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.weather.is_loading()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn loading_anim_active(&self) -> bool {
        self.weather.is_loading() || self.loading_anim_ticks_remaining > 0
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY)
    }
}
