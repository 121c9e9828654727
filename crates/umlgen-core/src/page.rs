//! Standard page formats for composed documents.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Page formats a rendered image can be composed onto.
///
/// The names match external configuration strings (snake_case).
///
/// # Variants
///
/// - `Letter` - US Letter, 8.5 x 11 in (default)
/// - `A4` - ISO A4, 210 x 297 mm
/// - `Legal` - US Legal, 8.5 x 14 in
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
    Legal,
}

impl PageSize {
    /// Returns the page dimensions in PDF points (1/72 in), portrait orientation.
    pub fn size(self) -> Size {
        match self {
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::Legal => Size::new(612.0, 1008.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "letter" => Ok(Self::Letter),
            "a4" => Ok(Self::A4),
            "legal" => Ok(Self::Legal),
            _ => Err("Unsupported page size"),
        }
    }
}

impl From<PageSize> for &'static str {
    fn from(val: PageSize) -> Self {
        match val {
            PageSize::Letter => "letter",
            PageSize::A4 => "a4",
            PageSize::Legal => "legal",
        }
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
