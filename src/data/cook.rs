//! Cook session data structures.
//!
//! Contains the type describing an active cook on a probe.

use std::fmt;
use std::time::Duration;

use crate::error::Result;
use crate::protocol::CookPayload;
use crate::utils::celsius_to_fahrenheit;

/// An active cooking session.
///
/// A cook exists only as part of the [`Probe`](crate::Probe) it runs on.
/// Temperatures are in degrees Celsius and times in seconds, exactly as
/// reported by the API.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Cook {
    id: Option<String>,
    name: Option<String>,
    state: Option<String>,
    target_temperature: f64,
    peak_temperature: f64,
    time_elapsed: i64,
    time_remaining: i64,
}

impl Cook {
    /// Create a cook from already-validated values.
    ///
    /// # Arguments
    ///
    /// * `id`, `name`, `state` - Optional labels from the app
    /// * `target_temperature` - Target in Celsius
    /// * `peak_temperature` - Peak reached so far in Celsius
    /// * `time_elapsed` - Seconds since the cook started
    /// * `time_remaining` - Estimated seconds left, `-1` if unknown
    pub fn new(
        id: Option<String>,
        name: Option<String>,
        state: Option<String>,
        target_temperature: f64,
        peak_temperature: f64,
        time_elapsed: i64,
        time_remaining: i64,
    ) -> Self {
        Self {
            id,
            name,
            state,
            target_temperature,
            peak_temperature,
            time_elapsed,
            time_remaining,
        }
    }

    /// Build a cook from its wire payload.
    ///
    /// Fails with [`Error::UnexpectedResponse`](crate::Error::UnexpectedResponse)
    /// if a temperature or time field is not numeric.
    pub fn from_payload(payload: CookPayload) -> Result<Self> {
        Ok(Self {
            target_temperature: payload
                .temperature
                .target
                .to_f64("cook.temperature.target")?,
            peak_temperature: payload.temperature.peak.to_f64("cook.temperature.peak")?,
            time_elapsed: payload.time.elapsed.to_i64("cook.time.elapsed")?,
            time_remaining: payload.time.remaining.to_i64("cook.time.remaining")?,
            id: payload.id,
            name: payload.name,
            state: payload.state,
        })
    }

    /// Cook identifier.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Cook name, e.g. the cut of meat chosen in the app.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Free-form cook state, e.g. "Cook Configured" or "Ready For Resting".
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// Target temperature in Celsius.
    pub fn target_temperature(&self) -> f64 {
        self.target_temperature
    }

    /// Peak temperature reached so far in Celsius.
    pub fn peak_temperature(&self) -> f64 {
        self.peak_temperature
    }

    /// Target temperature in Fahrenheit.
    pub fn target_temperature_fahrenheit(&self) -> f64 {
        celsius_to_fahrenheit(self.target_temperature)
    }

    /// Peak temperature in Fahrenheit.
    pub fn peak_temperature_fahrenheit(&self) -> f64 {
        celsius_to_fahrenheit(self.peak_temperature)
    }

    /// Seconds since the cook started.
    pub fn time_elapsed(&self) -> i64 {
        self.time_elapsed
    }

    /// Estimated seconds until the cook is done.
    ///
    /// The API reports `-1` while no estimate is available yet.
    pub fn time_remaining(&self) -> i64 {
        self.time_remaining
    }

    /// Elapsed time as a duration, or `None` if the API sent a negative value.
    pub fn elapsed(&self) -> Option<Duration> {
        u64::try_from(self.time_elapsed).ok().map(Duration::from_secs)
    }

    /// Remaining time as a duration, or `None` while there is no estimate.
    pub fn remaining(&self) -> Option<Duration> {
        u64::try_from(self.time_remaining)
            .ok()
            .map(Duration::from_secs)
    }
}

impl fmt::Display for Cook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cook - {} State: {} Target: {}°C Peak: {}°C Elapsed: {}sec Remaining: {}sec",
            self.name.as_deref().unwrap_or("-"),
            self.state.as_deref().unwrap_or("-"),
            self.target_temperature,
            self.peak_temperature,
            self.time_elapsed,
            self.time_remaining
        )
    }
}
