//! Actions: user intents, async results and timer expiries

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherSnapshot;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: fetch weather for the active query again
    WeatherFetch,

    /// Result: fetch number `.0` succeeded
    WeatherDidLoad(u64, WeatherSnapshot),

    /// Result: fetch number `.0` failed with a display message
    WeatherDidError(u64, String),

    // ===== Search category =====
    /// Search bar text changed
    SearchInputChange(String),

    /// Submit the search bar (Enter)
    SearchSubmit(String),

    // ===== Error category =====
    /// Clear timer for banner `.0` ran out
    ErrorDidExpire(u64),

    // ===== UI category =====
    /// Shake acknowledgment finished
    UiShakeDidEnd,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for animations
    Tick,

    /// Exit the application
    Quit,
}
