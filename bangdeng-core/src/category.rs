use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Facility category labels shown on the map.
///
/// The label set is closed. `DengueCenter` only appears in the dengue-only
/// collection variant; the other five are the canonical labels used for
/// cyclic reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hospital,
    Pharmacy,
    Vaccine,
    BloodTest,
    Aid,
    DengueCenter,
}

impl Category {
    /// The five canonical labels, in cyclic assignment order.
    pub const CANONICAL: [Category; 5] = [
        Category::Hospital,
        Category::Pharmacy,
        Category::Vaccine,
        Category::BloodTest,
        Category::Aid,
    ];

    /// Every label, including the dengue-only variant.
    pub const ALL: [Category; 6] = [
        Category::Hospital,
        Category::Pharmacy,
        Category::Vaccine,
        Category::BloodTest,
        Category::Aid,
        Category::DengueCenter,
    ];

    /// Storage label (the value of the `type` field).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Pharmacy => "pharmacy",
            Self::Vaccine => "vaccine",
            Self::BloodTest => "blood_test",
            Self::Aid => "aid",
            Self::DengueCenter => "dengue_center",
        }
    }

    /// Human-readable name for console output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hospital => "Hospital",
            Self::Pharmacy => "Pharmacy",
            Self::Vaccine => "Vaccination Site",
            Self::BloodTest => "Blood Test / Diagnostic Site",
            Self::Aid => "Free Aid Clinic",
            Self::DengueCenter => "Dengue Center",
        }
    }

    /// All accepted spellings for this category (case-insensitive matching).
    ///
    /// The storage label is always the first entry.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Hospital => &["hospital", "clinic"],
            Self::Pharmacy => &["pharmacy", "chemist", "drugstore"],
            Self::Vaccine => &["vaccine", "vaccination", "immunization", "immunisation"],
            Self::BloodTest => &["blood_test", "blood test", "blood-test", "diagnostic", "lab"],
            Self::Aid => &["aid", "free clinic", "free_clinic", "charity"],
            Self::DengueCenter => &["dengue_center", "dengue center", "dengue_centre", "dengue"],
        }
    }

    /// Whether this label belongs to the canonical five.
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::DengueCenter)
    }

    /// Cyclic assignment: row `index` maps to `CANONICAL[index % 5]`.
    pub fn cyclic(index: usize) -> Category {
        Self::CANONICAL[index % Self::CANONICAL.len()]
    }

    /// Parse an exact storage label, without aliases.
    pub fn from_label(label: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    /// Parse a category from its label or any alias, ignoring case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.aliases().contains(&lower.as_str()))
            .ok_or_else(|| CoreError::unknown_category(s))
    }
}
