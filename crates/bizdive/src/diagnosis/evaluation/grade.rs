use serde::{Deserialize, Serialize};

/// Discrete maturity band for a total score, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Inclusive lower-bound thresholds, checked highest first. Every finite
    /// score maps to exactly one band; anything below 60 (including negative
    /// input) is a D.
    pub fn from_score(total_score: f64) -> Grade {
        if total_score >= 90.0 {
            Grade::S
        } else if total_score >= 80.0 {
            Grade::A
        } else if total_score >= 70.0 {
            Grade::B
        } else if total_score >= 60.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Grade::S => "Market-leading maturity across the board",
            Grade::A => "Strong fundamentals with isolated gaps",
            Grade::B => "Solid base; several dimensions need structured work",
            Grade::C => "Early maturity; prioritize the weakest dimensions",
            Grade::D => "Foundational stage; build core capabilities first",
        }
    }
}
