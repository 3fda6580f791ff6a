//! Celsius ↔ Fahrenheit conversion.
//!
//! The oven works in whole Fahrenheit degrees, so absolute conversions are
//! rounded to whole degrees in both directions.  Because one Fahrenheit
//! degree is finer than one Celsius degree, `to_celsius(to_fahrenheit(c))`
//! returns `c` for every whole-degree Celsius input.

/// Convert an absolute Celsius temperature to whole degrees Fahrenheit.
pub fn to_fahrenheit(celsius: f32) -> f32 {
    (celsius * 9.0 / 5.0 + 32.0).round()
}

/// Convert an absolute Fahrenheit temperature to whole degrees Celsius.
pub fn to_celsius(fahrenheit: f32) -> f32 {
    ((fahrenheit - 32.0) * 5.0 / 9.0).round()
}

/// Convert a temperature *difference* (e.g. a step size) to Celsius.
///
/// Differences carry no 32° offset and are not rounded: a 5 °F step is
/// reported as ~2.78 °C.
pub fn delta_to_celsius(fahrenheit_delta: f32) -> f32 {
    fahrenheit_delta * 5.0 / 9.0
}
