//! Breed constants and validation.
//!
//! A breed carries a size class and four ability scores, each bounded to
//! [`MIN_VALUE_ABILITIES`]..=[`MAX_VALUE_ABILITIES`]. The database enforces the
//! same bounds with `CHECK` constraints (see `20260301000003_create_breeds.sql`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldErrors};
use crate::validation::{required_text, MSG_REQUIRED};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lowest allowed ability score.
pub const MIN_VALUE_ABILITIES: i16 = 1;
/// Highest allowed ability score.
pub const MAX_VALUE_ABILITIES: i16 = 5;

/// JSON names of the four ability-score fields, in response order.
pub const ABILITY_FIELDS: [&str; 4] = [
    "friendliness",
    "trainability",
    "shedding_amount",
    "exercise_needs",
];


// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// Breed size class. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreedSize {
    Tiny,
    Small,
    Medium,
    Large,
}

impl BreedSize {
    pub const ALL: [BreedSize; 4] = [
        BreedSize::Tiny,
        BreedSize::Small,
        BreedSize::Medium,
        BreedSize::Large,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BreedSize::Tiny => "tiny",
            BreedSize::Small => "small",
            BreedSize::Medium => "medium",
            BreedSize::Large => "large",
        }
    }
}

impl fmt::Display for BreedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreedSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BreedSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("\"{s}\" is not a valid choice.")))
    }
}

// ---------------------------------------------------------------------------
// Input / validated record
// ---------------------------------------------------------------------------

/// Request body for creating or fully replacing a breed.
///
/// Every field is optional at the serde level so that missing fields are
/// reported together with range errors instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreedInput {
    pub name: Option<String>,
    pub size: Option<String>,
    pub friendliness: Option<i64>,
    pub trainability: Option<i64>,
    pub shedding_amount: Option<i64>,
    pub exercise_needs: Option<i64>,
}

/// A breed that passed [`validate_breed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBreed {
    pub name: String,
    pub size: BreedSize,
    pub friendliness: i16,
    pub trainability: i16,
    pub shedding_amount: i16,
    pub exercise_needs: i16,
}

/// Validate a breed payload, collecting an error for every offending field.
pub fn validate_breed(input: &BreedInput) -> Result<NewBreed, CoreError> {
    let mut errors = FieldErrors::new();

    let name = required_text(&mut errors, "name", input.name.as_deref());

    let size = match input.size.as_deref() {
        None => {
            errors.add("size", MSG_REQUIRED);
            None
        }
        Some(raw) => match raw.parse::<BreedSize>() {
            Ok(size) => Some(size),
            Err(_) => {
                errors.add("size", format!("\"{raw}\" is not a valid choice."));
                None
            }
        },
    };

    let scores = [
        input.friendliness,
        input.trainability,
        input.shedding_amount,
        input.exercise_needs,
    ];
    let mut valid_scores = [0i16; 4];
    for (slot, (field, value)) in valid_scores
        .iter_mut()
        .zip(ABILITY_FIELDS.into_iter().zip(scores))
    {
        if let Some(score) = ability_score(&mut errors, field, value) {
            *slot = score;
        }
    }

    errors.into_result()?;

    // Both are `Some` once `errors` is empty.
    let (Some(name), Some(size)) = (name, size) else {
        return Err(CoreError::Internal("breed validation lost a field".into()));
    };
    let [friendliness, trainability, shedding_amount, exercise_needs] = valid_scores;

    Ok(NewBreed {
        name,
        size,
        friendliness,
        trainability,
        shedding_amount,
        exercise_needs,
    })
}

/// Check one ability score against the configured bounds.
fn ability_score(errors: &mut FieldErrors, field: &str, value: Option<i64>) -> Option<i16> {
    let Some(value) = value else {
        errors.add(field, MSG_REQUIRED);
        return None;
    };
    if value < i64::from(MIN_VALUE_ABILITIES) {
        errors.add(
            field,
            format!("Ensure this value is greater than or equal to {MIN_VALUE_ABILITIES}."),
        );
        return None;
    }
    if value > i64::from(MAX_VALUE_ABILITIES) {
        errors.add(
            field,
            format!("Ensure this value is less than or equal to {MAX_VALUE_ABILITIES}."),
        );
        return None;
    }
    i16::try_from(value).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
