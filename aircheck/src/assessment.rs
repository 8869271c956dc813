//! Classifying an air quality index and deciding whether to warn about it.

/// Category of an air quality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl Category {
    /// Category for a 1-based index; None outside 1 through 5.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            1 => Some(Category::Good),
            2 => Some(Category::Fair),
            3 => Some(Category::Moderate),
            4 => Some(Category::Poor),
            5 => Some(Category::VeryPoor),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Good => "Good (0-50)",
            Category::Fair => "Fair (51-100)",
            Category::Moderate => "Moderate (101-150)",
            Category::Poor => "Poor (151-200)",
            Category::VeryPoor => "Very Poor (201+)",
        }
    }
}

/// Label for an index that has no category.
pub const UNKNOWN: &str = "Unknown";

/// Label for the given index, or [UNKNOWN] if out of range.
pub fn classify(index: i32) -> &'static str {
    Category::from_index(index).map_or(UNKNOWN, |c| c.label())
}

/// The provider's index, with its category derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AqiAssessment {
    pub index: i32,
}

impl AqiAssessment {
    pub fn new(index: i32) -> Self {
        AqiAssessment { index }
    }

    pub fn category(&self) -> &'static str {
        classify(self.index)
    }
}

/// Lowest index that triggers an advisory.
pub const ADVISORY_THRESHOLD: i32 = 3;

pub const WARNING: &str = "Warning: The air quality is considered bad.";

/// Recommended precautions, in the order they're listed.
pub const PRECAUTIONS: [&str; 4] = [
    "Limit outdoor activities.",
    "Use air purifiers indoors.",
    "Wear masks if going outside.",
    "Keep windows closed.",
];

/// Shown when no advisory is raised.
pub const ALL_CLEAR: &str = "The air quality is good. Keep the environment the same to maintain it!";

/// Whether to warn about an index, and what to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryDecision {
    pub triggered: bool,
    pub message: Option<String>,
}

/// Decide whether the index warrants an advisory.
///
/// Depends only on the index, never on individual pollutants.
pub fn decide(index: i32) -> AdvisoryDecision {
    if index < ADVISORY_THRESHOLD {
        return AdvisoryDecision {
            triggered: false,
            message: None,
        };
    }
    let mut message = format!("{WARNING}\nRecommended actions:");
    for p in PRECAUTIONS {
        message.push_str("\n- ");
        message.push_str(p);
    }
    AdvisoryDecision {
        triggered: true,
        message: Some(message),
    }
}
