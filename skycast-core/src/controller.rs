//! View-state machine driving one request cycle:
//! Idle → Loading → Loaded | Error.
//!
//! All visual output is a pure function of [`ViewState`]; the controller
//! replaces the state wholesale on every transition and never mutates it in
//! place. Each trigger claims a monotonically increasing cycle id, and a
//! finishing cycle only commits its result while it is still the newest one,
//! so a stale response can never clobber the state of a later trigger.

use crate::client::WeatherApi;
use crate::daily::reduce_to_daily;
use crate::error::WeatherError;
use crate::model::{Coordinates, DailyForecast, Query, WeatherSample};
use crate::store::LastCityStore;

/// What set a request cycle in motion.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Manual search for a city name.
    Search(String),
    /// A resolved geolocation result.
    Located(Coordinates),
    /// Startup replay of the persisted (or default) city.
    Startup(String),
}

/// The single authoritative UI state. Exactly one variant is active at a
/// time and rendering derives everything from it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded {
        current: WeatherSample,
        forecast: DailyForecast,
    },
    Error {
        message: String,
    },
}

/// Id of one request cycle. Comparing against the controller's counter is
/// how stale completions are detected and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleId(u64);

pub struct Controller<A: WeatherApi> {
    api: A,
    store: Option<LastCityStore>,
    state: ViewState,
    cycle: u64,
}

impl<A: WeatherApi> Controller<A> {
    pub fn new(api: A, store: Option<LastCityStore>) -> Self {
        Self {
            api,
            store,
            state: ViewState::Idle,
            cycle: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The query to replay at startup: the persisted last city if one
    /// exists, otherwise the given default.
    pub fn startup_city(&self, default_city: &str) -> String {
        self.store
            .as_ref()
            .and_then(LastCityStore::load)
            .unwrap_or_else(|| default_city.to_string())
    }

    /// Claim a new cycle, entering `Loading`. Later claims supersede earlier
    /// ones (last-trigger-wins).
    pub fn begin_cycle(&mut self) -> CycleId {
        self.cycle += 1;
        self.state = ViewState::Loading;
        CycleId(self.cycle)
    }

    /// Commit a finished cycle's state. Returns false (and changes nothing)
    /// when a newer cycle has started since `id` was claimed.
    pub fn commit(&mut self, id: CycleId, state: ViewState) -> bool {
        if id.0 != self.cycle {
            tracing::debug!("Discarding stale cycle {} (current {})", id.0, self.cycle);
            return false;
        }
        self.state = state;
        true
    }

    /// Run one full request cycle for `trigger` and return the resulting
    /// state (also committed, unless a newer trigger superseded this one).
    pub async fn handle(&mut self, trigger: Trigger) -> ViewState {
        // Blank input is rejected before a cycle is even claimed.
        let query = match validate(&trigger) {
            Ok(query) => query,
            Err(err) => {
                let state = ViewState::Error {
                    message: err.to_string(),
                };
                self.state = state.clone();
                return state;
            }
        };

        let id = self.begin_cycle();
        let state = self.resolve(&trigger, &query).await;
        self.commit(id, state.clone());
        state
    }

    /// current conditions, then (best-effort) forecast.
    async fn resolve(&self, trigger: &Trigger, query: &Query) -> ViewState {
        let current = match self.api.fetch_current(query).await {
            Ok(current) => current,
            Err(err) => {
                return ViewState::Error {
                    message: err.to_string(),
                };
            }
        };

        // Remember the city only for name-based triggers; a coordinate
        // lookup has no user-typed name worth replaying.
        if let Some(store) = &self.store
            && let Trigger::Search(city) | Trigger::Startup(city) = trigger
        {
            store.save(city.trim());
        }

        let forecast = match current.coords {
            Some(coords) => match self.api.fetch_forecast(coords).await {
                Ok(samples) => reduce_to_daily(&samples),
                Err(err) => {
                    // Forecast is best-effort: log and show current only.
                    tracing::warn!("Forecast fetch failed: {err}");
                    DailyForecast::default()
                }
            },
            None => DailyForecast::default(),
        };

        ViewState::Loaded { current, forecast }
    }
}

fn validate(trigger: &Trigger) -> Result<Query, WeatherError> {
    match trigger {
        Trigger::Search(city) | Trigger::Startup(city) => {
            let city = city.trim();
            if city.is_empty() {
                return Err(WeatherError::EmptyInput);
            }
            Ok(Query::City(city.to_string()))
        }
        Trigger::Located(coords) => Ok(Query::Coords(*coords)),
    }
}
