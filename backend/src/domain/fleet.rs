//! Fleet entity and creation draft.

use std::fmt;

/// Named grouping of matatus under one operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    pub id: i32,
    pub name: String,
    /// External identifier of the owning operator; indexed but not unique.
    pub operator_id: String,
}

/// Validation errors returned by [`NewFleet::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FleetValidationError {
    EmptyName,
    EmptyOperatorId,
}

impl fmt::Display for FleetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "fleet name must not be empty"),
            Self::EmptyOperatorId => write!(f, "operator id must not be empty"),
        }
    }
}

impl std::error::Error for FleetValidationError {}

/// Validated draft for registering a fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFleet {
    pub name: String,
    pub operator_id: String,
}

impl NewFleet {
    /// Validate and construct a draft from wire-form parts.
    pub fn try_from_parts(name: &str, operator_id: &str) -> Result<Self, FleetValidationError> {
        if name.trim().is_empty() {
            return Err(FleetValidationError::EmptyName);
        }
        if operator_id.trim().is_empty() {
            return Err(FleetValidationError::EmptyOperatorId);
        }
        Ok(Self {
            name: name.trim().to_owned(),
            operator_id: operator_id.trim().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn draft_accepts_name_and_operator() {
        let draft = NewFleet::try_from_parts("Super Metro", "op-77").expect("valid draft");
        assert_eq!(draft.name, "Super Metro");
        assert_eq!(draft.operator_id, "op-77");
    }

    #[rstest]
    #[case("", "op-77", FleetValidationError::EmptyName)]
    #[case("  ", "op-77", FleetValidationError::EmptyName)]
    #[case("Super Metro", "", FleetValidationError::EmptyOperatorId)]
    fn draft_rejects_missing_parts(
        #[case] name: &str,
        #[case] operator_id: &str,
        #[case] expected: FleetValidationError,
    ) {
        let err = NewFleet::try_from_parts(name, operator_id).expect_err("invalid draft");
        assert_eq!(err, expected);
    }
}
