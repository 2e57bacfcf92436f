pub mod location_header;
pub mod search_bar;
pub mod weather_body;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use location_header::{LocationHeader, LocationHeaderProps, TemperatureBand};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_body::{WeatherBody, WeatherBodyProps, format_readings, format_temperature};
pub use weather_display::{ERROR_ICON, WeatherDisplay, WeatherDisplayProps};
