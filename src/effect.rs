//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather for `query`; the result is tagged with `seq`
    FetchWeather { query: String, seq: u64 },
    /// (Re)start the banner clear timer for banner `id`
    ScheduleErrorClear { id: u64 },
    /// Drop any pending banner clear timer
    CancelErrorClear,
    /// (Re)start the shake timer
    ScheduleShakeEnd,
}
