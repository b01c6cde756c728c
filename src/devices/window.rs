//! Operating modes and their permitted hour windows.

use std::fmt;

use super::types::Hour;

const DAY: [Hour; 14] = [7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20];

// Adjacency is list order, so 23 -> 0 is contiguous.
const NIGHT: [Hour; 10] = [21, 22, 23, 0, 1, 2, 3, 4, 5, 6];

const ALL_DAY: [Hour; 24] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23,
];

/// Time-of-day mode selecting a device's permitted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// 07:00 through 20:00.
    Day,
    /// 21:00 through 06:00, spanning midnight.
    Night,
    /// Any hour.
    #[default]
    AllDay,
}

impl Mode {
    /// Parses a mode tag. Unknown or missing tags degrade to [`Mode::AllDay`].
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("day") => Self::Day,
            Some("night") => Self::Night,
            _ => Self::AllDay,
        }
    }

    /// Ordered hours of this mode's window.
    pub fn hours(self) -> &'static [Hour] {
        match self {
            Self::Day => &DAY,
            Self::Night => &NIGHT,
            Self::AllDay => &ALL_DAY,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::AllDay => "allDay",
        })
    }
}

/// Returns the ordered window for a device's mode tag.
///
/// Total: anything other than `"day"` or `"night"` resolves to the
/// all-day window.
pub fn resolve_window(mode: Option<&str>) -> &'static [Hour] {
    Mode::from_tag(mode).hours()
}
