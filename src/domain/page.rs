// Page parameter domain model

/// Milliseconds the simulated clock moves forward after each successful
/// polling cycle.
pub const PLAYBACK_STEP_MS: i64 = 60 * 1000;

/// Parameter set owned by one dashboard page for the life of a polling
/// session: dimension filters, refresh interval, lookback window and the
/// optional playback offset.
#[derive(Debug, Clone, PartialEq)]
pub struct PageParameters {
    pub publisher: Option<String>,
    pub advertiser: Option<String>,
    pub adunit: Option<String>,
    pub refresh_seconds: u64,
    pub lookback_hours: i64,
    pub play_minutes: Option<i64>,
}

impl Default for PageParameters {
    fn default() -> Self {
        Self {
            publisher: None,
            advertiser: None,
            adunit: None,
            refresh_seconds: 30,
            lookback_hours: 2,
            play_minutes: None,
        }
    }
}

impl PageParameters {
    /// Overlay a URL query string onto the built-in defaults.
    ///
    /// Pairs without exactly one `=` are dropped, as are pairs whose key is
    /// unknown. Numeric values that fail to parse leave the default in
    /// place.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();

        for pair in query.trim_start_matches('?').split('&') {
            let parts: Vec<&str> = pair.split('=').collect();
            if parts.len() != 2 {
                continue;
            }

            let (key, value) = (parts[0], parts[1]);
            match key {
                "publisher" => params.publisher = Some(value.to_string()),
                "advertiser" => params.advertiser = Some(value.to_string()),
                "adunit" => params.adunit = Some(value.to_string()),
                "refresh" => {
                    if let Ok(seconds) = value.parse() {
                        params.refresh_seconds = seconds;
                    }
                }
                "lookback" => {
                    if let Ok(hours) = value.parse() {
                        params.lookback_hours = hours;
                    }
                }
                "play" => {
                    if let Ok(minutes) = value.parse() {
                        params.play_minutes = Some(minutes);
                    }
                }
                _ => {}
            }
        }

        params
    }

    /// Playback clock for these parameters, anchored at `now_ms`. Absent
    /// unless `play` was requested.
    pub fn simulated_clock(&self, now_ms: i64) -> Option<SimulatedClock> {
        self.play_minutes
            .map(|minutes| SimulatedClock::new(now_ms, minutes))
    }
}

/// Synthetic end-of-window clock used in playback mode. Starts `play`
/// minutes in the past and steps forward one minute per completed cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedClock {
    end_time_ms: i64,
}

impl SimulatedClock {
    pub fn new(now_ms: i64, play_minutes: i64) -> Self {
        Self {
            end_time_ms: now_ms - play_minutes * 60 * 1000,
        }
    }

    pub fn end_time_ms(&self) -> i64 {
        self.end_time_ms
    }

    pub fn advance(&mut self) {
        self.end_time_ms += PLAYBACK_STEP_MS;
    }
}
