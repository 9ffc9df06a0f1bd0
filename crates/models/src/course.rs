use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error as DeError, Unexpected},
};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::ParseIntError,
    ops::Deref,
    str::FromStr,
};

/// Identifies a course in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

/// Identifies an elective group in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u32);

impl Deref for CourseId {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for CourseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CourseId(s.trim().parse()?))
    }
}

impl Display for CourseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.0)
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "group #{}", self.0)
    }
}

/// A catalog course, as exported by the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Human-readable course code (e.g., "MATH101")
    pub code: String,
    pub name: String,
    /// Credit weight, always positive
    #[serde(deserialize_with = "positive_credits")]
    pub credits: u8,
    #[serde(default)]
    pub is_elective: bool,
    /// Semester the catalog suggests taking the course in, if any
    #[serde(default)]
    pub recommended_semester: Option<u32>,
}

/// Rejects zero-credit courses when loading exported catalogs
fn positive_credits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let credits = u8::deserialize(deserializer)?;
    if credits == 0 {
        return Err(D::Error::invalid_value(
            Unexpected::Unsigned(0),
            &"a positive credit count",
        ));
    }

    Ok(credits)
}

impl Course {
    pub fn new(id: u32, code: &str, name: &str, credits: u8) -> Self {
        Self {
            id: CourseId(id),
            code: code.to_string(),
            name: name.to_string(),
            credits,
            is_elective: false,
            recommended_semester: None,
        }
    }

    /// Marks the course as an elective
    pub fn elective(mut self) -> Self {
        self.is_elective = true;
        self
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} - {}", self.code, self.name)
    }
}
