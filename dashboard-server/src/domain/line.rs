//! Rail line type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a line name is not one of the MARTA rail lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rail line: {0:?}")]
pub struct InvalidLine(String);

/// A MARTA rail line.
///
/// The set of lines is fixed. Feeds report lines as upper-case names
/// ("RED", "GOLD"), sometimes with a trailing "LINE".
///
/// # Examples
///
/// ```
/// use dashboard_server::domain::Line;
///
/// assert_eq!(Line::parse("RED").unwrap(), Line::Red);
/// assert_eq!(Line::parse(" gold line ").unwrap(), Line::Gold);
/// assert!(Line::parse("PURPLE").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Line {
    Red,
    Gold,
    Green,
    Blue,
}

impl Line {
    /// Every line, in display order.
    pub const ALL: [Line; 4] = [Line::Red, Line::Gold, Line::Green, Line::Blue];

    /// Parse a line name, ignoring case, surrounding whitespace and a
    /// trailing " LINE".
    pub fn parse(s: &str) -> Result<Self, InvalidLine> {
        let upper = s.trim().to_uppercase();
        let name = upper.strip_suffix(" LINE").unwrap_or(&upper).trim_end();

        match name {
            "RED" => Ok(Line::Red),
            "GOLD" => Ok(Line::Gold),
            "GREEN" => Ok(Line::Green),
            "BLUE" => Ok(Line::Blue),
            _ => Err(InvalidLine(s.to_string())),
        }
    }

    /// Upper-case line name as it appears in feed data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Line::Red => "RED",
            Line::Gold => "GOLD",
            Line::Green => "GREEN",
            Line::Blue => "BLUE",
        }
    }

    /// Hex colour used for route polylines and train markers.
    pub fn color(&self) -> &'static str {
        match self {
            Line::Red => "#CE0E2D",
            Line::Gold => "#FFA500",
            Line::Green => "#008000",
            Line::Blue => "#0000FF",
        }
    }

    /// Bootstrap background class for train cards.
    pub fn css_class(&self) -> &'static str {
        match self {
            Line::Red => "bg-danger",
            Line::Gold => "bg-warning",
            Line::Green => "bg-success",
            Line::Blue => "bg-primary",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Line {
    type Err = InvalidLine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Line::parse(s)
    }
}
