//! Utility functions for the meater-cloud crate.
//!
//! The API reports every temperature in Celsius. These helpers exist for
//! callers that display Fahrenheit.

use std::fmt;

/// Convert Celsius to Fahrenheit.
///
/// # Arguments
///
/// * `celsius` - Temperature in degrees Celsius
///
/// # Returns
///
/// Temperature in degrees Fahrenheit
///
/// # Example
///
/// ```
/// use meater_cloud::celsius_to_fahrenheit;
///
/// let fahrenheit = celsius_to_fahrenheit(100.0);
/// assert!((fahrenheit - 212.0).abs() < 0.001);
/// ```
#[inline]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert Fahrenheit to Celsius.
///
/// # Arguments
///
/// * `fahrenheit` - Temperature in degrees Fahrenheit
///
/// # Returns
///
/// Temperature in degrees Celsius
///
/// # Example
///
/// ```
/// use meater_cloud::fahrenheit_to_celsius;
///
/// let celsius = fahrenheit_to_celsius(212.0);
/// assert!((celsius - 100.0).abs() < 0.001);
/// ```
#[inline]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Unit used when presenting a temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    /// Degrees Celsius, as reported by the API.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Express a Celsius reading in this unit.
    ///
    /// # Arguments
    ///
    /// * `celsius` - Temperature in degrees Celsius, as the API reports it
    ///
    /// ```
    /// use meater_cloud::TemperatureUnit;
    ///
    /// assert_eq!(TemperatureUnit::Celsius.convert(63.0), 63.0);
    /// assert!((TemperatureUnit::Fahrenheit.convert(0.0) - 32.0).abs() < 0.001);
    /// ```
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }

    /// Unit symbol, e.g. `°C`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Format a Celsius reading in this unit with one decimal place.
    ///
    /// # Returns
    ///
    /// The converted value followed by the unit symbol, e.g. `134.6°F`
    pub fn format(self, celsius: f64) -> String {
        format!("{:.1}{}", self.convert(celsius), self.symbol())
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
