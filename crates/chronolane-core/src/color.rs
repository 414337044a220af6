//! Color handling for Chronolane charts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Presentation settings arrive as CSS color strings and
//! are parsed here before any shape is emitted.

use std::str::FromStr;

use color::DynamicColor;
use log::warn;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronolane_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Parses `color_str`, falling back to `fallback` when it is not a valid
    /// CSS color.
    ///
    /// Presentation settings are passed through verbatim from the host, so a
    /// bad value is logged and replaced rather than failing the whole chart.
    pub fn new_or(color_str: &str, fallback: Color) -> Self {
        Self::new(color_str).unwrap_or_else(|err| {
            warn!(err; "Falling back to default color");
            fallback
        })
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
