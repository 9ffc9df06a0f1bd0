use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{Display, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

/// Letter grade recorded for a course attempt
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
    EnumProperty,
)]
pub enum Grade {
    #[strum(serialize = "A", props(label = "A (4.0)"))]
    #[serde(rename = "A")]
    A,
    #[strum(serialize = "A-", props(label = "A- (3.7)"))]
    #[serde(rename = "A-")]
    AMinus,
    #[strum(serialize = "B+", props(label = "B+ (3.3)"))]
    #[serde(rename = "B+")]
    BPlus,
    #[strum(serialize = "B", props(label = "B (3.0)"))]
    #[serde(rename = "B")]
    B,
    #[strum(serialize = "B-", props(label = "B- (2.7)"))]
    #[serde(rename = "B-")]
    BMinus,
    #[strum(serialize = "C+", props(label = "C+ (2.3)"))]
    #[serde(rename = "C+")]
    CPlus,
    #[strum(serialize = "C", props(label = "C (2.0)"))]
    #[serde(rename = "C")]
    C,
    #[strum(serialize = "D", props(label = "D (1.0)"))]
    #[serde(rename = "D")]
    D,
    #[strum(serialize = "F", props(label = "F (0.0)"))]
    #[serde(rename = "F")]
    F,
    /// Withdrawal, carries no grade points
    #[strum(serialize = "W", props(label = "W (Withdrawal)"))]
    #[serde(rename = "W")]
    W,
}

impl Grade {
    /// Lowest grade that still counts as a pass
    pub const LOWEST_PASSING: Grade = Grade::D;

    /// Grade points on the 4.0 scale, `None` for a withdrawal
    pub fn points(self) -> Option<f32> {
        match self {
            Self::A => Some(4.0),
            Self::AMinus => Some(3.7),
            Self::BPlus => Some(3.3),
            Self::B => Some(3.0),
            Self::BMinus => Some(2.7),
            Self::CPlus => Some(2.3),
            Self::C => Some(2.0),
            Self::D => Some(1.0),
            Self::F => Some(0.0),
            Self::W => None,
        }
    }

    /// Whether this grade meets `threshold` (F and W never do)
    pub fn meets(self, threshold: Grade) -> bool {
        self.is_passing() && self >= threshold
    }

    pub fn is_passing(self) -> bool {
        self >= Self::LOWEST_PASSING
    }

    /// Label shown in transcripts (e.g., "B+ (3.3)")
    pub fn label(self) -> &'static str {
        self.get_str("label").unwrap_or_default()
    }

    pub fn all() -> Vec<Grade> {
        Grade::iter().collect()
    }

    /// Withdrawal sorts below F
    fn rank(self) -> u8 {
        match self {
            Self::W => 0,
            Self::F => 1,
            Self::D => 2,
            Self::C => 3,
            Self::CPlus => 4,
            Self::BMinus => 5,
            Self::B => 6,
            Self::BPlus => 7,
            Self::AMinus => 8,
            Self::A => 9,
        }
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}
