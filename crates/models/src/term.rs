use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Display as FmtDisplay, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{AsRefStr, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

/// Custom error type for parsing term labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTermError {
    EmptyInput,
    UnknownSeason(String),
    InvalidYear(String),
}

impl FmtDisplay for ParseTermError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::EmptyInput => write!(f, "Empty term label"),
            Self::UnknownSeason(season) => write!(f, "Unknown season: {season}"),
            Self::InvalidYear(year) => write!(f, "Invalid academic year: {year}"),
        }
    }
}

impl std::error::Error for ParseTermError {}

/// Season of a term, in the order they occur within one labelled year
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, EnumIter, AsRefStr,
    EnumProperty,
)]
pub enum Season {
    #[strum(serialize = "Spring", ascii_case_insensitive, props(short = "S"))]
    Spring,
    #[strum(serialize = "Summer", ascii_case_insensitive, props(short = "M"))]
    Summer,
    #[strum(serialize = "Fall", ascii_case_insensitive, props(short = "F"))]
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn as_short_str(&self) -> &'static str {
        self.get_str("short").unwrap_or_default()
    }

    pub fn all() -> Vec<Season> {
        Season::iter().collect()
    }
}

/// A term such as "Fall 1402"
///
/// The year is the calendar year of the label, so "Fall 1402" is followed by
/// "Spring 1403".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Term {
    pub season: Season,
    /// Year in the term label
    pub year: u16,
}

impl Term {
    pub fn new(season: Season, year: u16) -> Self {
        Self { season, year }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        // Spring < Summer < Fall inside one labelled year
        self.year
            .cmp(&other.year)
            .then_with(|| self.season.cmp(&other.season))
    }
}

impl FromStr for Term {
    type Err = ParseTermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(season), Some(year)) = (parts.next(), parts.next()) else {
            return if s.trim().is_empty() {
                Err(ParseTermError::EmptyInput)
            } else {
                Err(ParseTermError::InvalidYear(s.trim().to_string()))
            };
        };

        if parts.next().is_some() {
            return Err(ParseTermError::InvalidYear(s.trim().to_string()));
        }

        let season = Season::from_str(season)
            .map_err(|_| ParseTermError::UnknownSeason(season.to_string()))?;
        let year = year
            .parse::<u16>()
            .map_err(|_| ParseTermError::InvalidYear(year.to_string()))?;

        Ok(Self { season, year })
    }
}

impl TryFrom<String> for Term {
    type Error = ParseTermError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.to_string()
    }
}

impl FmtDisplay for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.season.as_str(), self.year)
    }
}
