//! Breathing catalog reference data.
//!
//! Categories and techniques are loaded once from fixtures and treated as
//! immutable reference data by the application. Entities validate their
//! invariants on construction so adapters never hand malformed rows to the
//! services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Focus area of a breathing technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreathOrigin {
    Abdomen,
    Chest,
    Nostrils,
    Mouth,
    All,
}

impl BreathOrigin {
    /// Stable wire code persisted in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Abdomen => "ABDOMEN",
            Self::Chest => "CHEST",
            Self::Nostrils => "NOSTRILS",
            Self::Mouth => "MOUTH",
            Self::All => "ALL",
        }
    }

    /// Localized label shown on detail and guide screens.
    ///
    /// The mapping is a fixed table; an unmapped code would fall back to the
    /// raw code string, which is only reachable if the enum grows without
    /// this table being extended.
    pub fn label(self) -> &'static str {
        match self {
            Self::Abdomen => "abdominal breathing",
            Self::Chest => "chest breathing",
            Self::Nostrils => "nasal breathing",
            Self::Mouth => "mouth breathing",
            Self::All => "natural breathing",
        }
    }
}

impl fmt::Display for BreathOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown breath-origin code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBreathOriginError(pub String);

impl fmt::Display for ParseBreathOriginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown breath origin: {}", self.0)
    }
}

impl std::error::Error for ParseBreathOriginError {}

impl FromStr for BreathOrigin {
    type Err = ParseBreathOriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ABDOMEN" => Ok(Self::Abdomen),
            "CHEST" => Ok(Self::Chest),
            "NOSTRILS" => Ok(Self::Nostrils),
            "MOUTH" => Ok(Self::Mouth),
            "ALL" => Ok(Self::All),
            other => Err(ParseBreathOriginError(other.to_owned())),
        }
    }
}

/// Validation errors raised by catalog entity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValidationError {
    EmptyDisplayName,
    NegativePhaseDuration { phase: &'static str, value: i32 },
    NegativeRecommendedMinutes { value: i32 },
}

impl fmt::Display for CatalogValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::NegativePhaseDuration { phase, value } => {
                write!(f, "{phase} duration must be non-negative, got {value}")
            }
            Self::NegativeRecommendedMinutes { value } => {
                write!(f, "recommended minutes must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for CatalogValidationError {}

/// A category grouping related breathing techniques.
///
/// Listing order is by primary key; `position` exists in the reference data
/// but is never used for sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: i32,
    name: Option<String>,
    display_name: String,
    description: Option<String>,
    position: Option<i32>,
}

impl Category {
    /// Validate and construct a category.
    pub fn new(
        id: i32,
        name: Option<String>,
        display_name: impl Into<String>,
        description: Option<String>,
        position: Option<i32>,
    ) -> Result<Self, CatalogValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(CatalogValidationError::EmptyDisplayName);
        }
        Ok(Self {
            id,
            name,
            display_name,
            description,
            position,
        })
    }

    /// Surrogate key; also the listing sort key.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Internal English name, optional.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Localized display name shown to users.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Optional localized description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared position; unused for ordering by design.
    pub fn position(&self) -> Option<i32> {
        self.position
    }
}

/// The four timed phases of one breathing cycle, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingPhases {
    pub inhale_seconds: i32,
    pub hold_after_inhale_seconds: i32,
    pub exhale_seconds: i32,
    pub hold_after_exhale_seconds: i32,
}

impl BreathingPhases {
    fn validate(self) -> Result<Self, CatalogValidationError> {
        let checks = [
            ("inhale", self.inhale_seconds),
            ("hold-after-inhale", self.hold_after_inhale_seconds),
            ("exhale", self.exhale_seconds),
            ("hold-after-exhale", self.hold_after_exhale_seconds),
        ];
        for (phase, value) in checks {
            if value < 0 {
                return Err(CatalogValidationError::NegativePhaseDuration { phase, value });
            }
        }
        Ok(self)
    }

    /// Total duration of one breathing cycle in seconds.
    pub fn cycle_duration_seconds(self) -> i32 {
        self.inhale_seconds
            + self.hold_after_inhale_seconds
            + self.exhale_seconds
            + self.hold_after_exhale_seconds
    }
}

/// Draft carrying unvalidated technique fields into [`Technique::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueDraft {
    pub id: i32,
    pub category_id: i32,
    pub display_name: String,
    pub phases: BreathingPhases,
    pub recommended_minutes: i32,
    pub posture: String,
    pub breath_origin: BreathOrigin,
    pub instructions: String,
    pub sound_cue_default: bool,
    pub haptic_cue_default: bool,
}

/// A named breathing pattern with four timed phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technique {
    id: i32,
    category_id: i32,
    display_name: String,
    phases: BreathingPhases,
    recommended_minutes: i32,
    posture: String,
    breath_origin: BreathOrigin,
    instructions: String,
    sound_cue_default: bool,
    haptic_cue_default: bool,
}

impl Technique {
    /// Validate and construct a technique from a draft.
    pub fn new(draft: TechniqueDraft) -> Result<Self, CatalogValidationError> {
        let TechniqueDraft {
            id,
            category_id,
            display_name,
            phases,
            recommended_minutes,
            posture,
            breath_origin,
            instructions,
            sound_cue_default,
            haptic_cue_default,
        } = draft;

        if display_name.trim().is_empty() {
            return Err(CatalogValidationError::EmptyDisplayName);
        }
        let phases = phases.validate()?;
        if recommended_minutes < 0 {
            return Err(CatalogValidationError::NegativeRecommendedMinutes {
                value: recommended_minutes,
            });
        }

        Ok(Self {
            id,
            category_id,
            display_name,
            phases,
            recommended_minutes,
            posture,
            breath_origin,
            instructions,
            sound_cue_default,
            haptic_cue_default,
        })
    }

    /// Surrogate key.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Owning category.
    pub fn category_id(&self) -> i32 {
        self.category_id
    }

    /// Localized display name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Timed phases of one cycle.
    pub fn phases(&self) -> BreathingPhases {
        self.phases
    }

    /// Recommended total session length in minutes.
    pub fn recommended_minutes(&self) -> i32 {
        self.recommended_minutes
    }

    /// Quick preparation cue (for example "seated").
    pub fn posture(&self) -> &str {
        self.posture.as_str()
    }

    /// Focus area of the breath.
    pub fn breath_origin(&self) -> BreathOrigin {
        self.breath_origin
    }

    /// Detailed step-by-step instructions.
    pub fn instructions(&self) -> &str {
        self.instructions.as_str()
    }

    /// Default state of the sound cue toggle.
    pub fn sound_cue_default(&self) -> bool {
        self.sound_cue_default
    }

    /// Default state of the vibration cue toggle.
    pub fn haptic_cue_default(&self) -> bool {
        self.haptic_cue_default
    }

    /// Total duration of one breathing cycle in seconds.
    pub fn cycle_duration_seconds(&self) -> i32 {
        self.phases.cycle_duration_seconds()
    }
}

/// A category together with its techniques, ordered by technique id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithTechniques {
    pub category: Category,
    pub techniques: Vec<Technique>,
}
