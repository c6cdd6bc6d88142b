//! Dog validation.

use serde::Deserialize;

use crate::error::{CoreError, FieldErrors};
use crate::types::DbId;
use crate::validation::{required_text, MSG_REQUIRED};

/// Oldest accepted age; ages are stored as `SMALLINT`.
pub const MAX_AGE: i16 = i16::MAX;

/// Request body for creating or fully replacing a dog.
///
/// `breed`, `favorite_food` and `favorite_toy` may be omitted or null. The
/// owner is never read from the body; it is the authenticated caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DogInput {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub breed: Option<DbId>,
    pub gender: Option<String>,
    pub color: Option<String>,
    pub favorite_food: Option<String>,
    pub favorite_toy: Option<String>,
}

/// A dog that passed [`validate_dog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    pub name: String,
    pub age: i16,
    pub breed_id: Option<DbId>,
    pub gender: String,
    pub color: String,
    pub favorite_food: Option<String>,
    pub favorite_toy: Option<String>,
}

/// Validate a dog payload, collecting an error for every offending field.
///
/// Whether `breed` refers to an existing row is a store question and is
/// checked by the caller.
pub fn validate_dog(input: &DogInput) -> Result<NewDog, CoreError> {
    let mut errors = FieldErrors::new();

    let name = required_text(&mut errors, "name", input.name.as_deref());
    let gender = required_text(&mut errors, "gender", input.gender.as_deref());
    let color = required_text(&mut errors, "color", input.color.as_deref());

    let age = match input.age {
        None => {
            errors.add("age", MSG_REQUIRED);
            None
        }
        Some(age) if age < 0 => {
            errors.add("age", "Ensure this value is greater than or equal to 0.");
            None
        }
        Some(age) => match i16::try_from(age) {
            Ok(age) => Some(age),
            Err(_) => {
                errors.add(
                    "age",
                    format!("Ensure this value is less than or equal to {MAX_AGE}."),
                );
                None
            }
        },
    };

    errors.into_result()?;

    let (Some(name), Some(age), Some(gender), Some(color)) = (name, age, gender, color) else {
        return Err(CoreError::Internal("dog validation lost a field".into()));
    };

    Ok(NewDog {
        name,
        age,
        breed_id: input.breed,
        gender,
        color,
        favorite_food: input.favorite_food.clone(),
        favorite_toy: input.favorite_toy.clone(),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn rex() -> DogInput {
        DogInput {
            name: Some("Rex".into()),
            age: Some(3),
            breed: Some(1),
            gender: Some("male".into()),
            color: Some("black".into()),
            favorite_food: Some("kibble".into()),
            favorite_toy: None,
        }
    }

    #[test]
    fn valid_dog_passes() {
        let dog = validate_dog(&rex()).expect("valid dog");
        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.age, 3);
        assert_eq!(dog.breed_id, Some(1));
        assert_eq!(dog.favorite_food.as_deref(), Some("kibble"));
        assert_eq!(dog.favorite_toy, None);
    }

    #[test]
    fn breed_is_optional() {
        let input = DogInput {
            breed: None,
            ..rex()
        };
        assert_eq!(validate_dog(&input).unwrap().breed_id, None);
    }

    #[test]
    fn zero_age_is_allowed() {
        let input = DogInput {
            age: Some(0),
            ..rex()
        };
        assert_eq!(validate_dog(&input).unwrap().age, 0);
    }

    #[test]
    fn negative_age_is_rejected() {
        let input = DogInput {
            age: Some(-1),
            ..rex()
        };
        assert_matches!(validate_dog(&input), Err(CoreError::InvalidFields(fields)) => {
            assert_eq!(fields.fields().collect::<Vec<_>>(), vec!["age"]);
        });
    }

    #[test]
    fn age_beyond_storage_range_is_rejected() {
        let input = DogInput {
            age: Some(i64::from(MAX_AGE) + 1),
            ..rex()
        };
        assert_matches!(validate_dog(&input), Err(CoreError::InvalidFields(fields)) => {
            assert!(fields.contains("age"));
        });
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let input = DogInput {
            breed: Some(4),
            ..DogInput::default()
        };
        assert_matches!(validate_dog(&input), Err(CoreError::InvalidFields(fields)) => {
            assert_eq!(
                fields.fields().collect::<Vec<_>>(),
                vec!["age", "color", "gender", "name"]
            );
        });
    }
}
