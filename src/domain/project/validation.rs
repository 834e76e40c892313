//! Project validation

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during project validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProjectValidationError {
    #[error("Project name cannot be empty")]
    EmptyName,

    #[error("Project name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Start date cannot be after end date")]
    StartAfterEnd,

    #[error("Start date cannot be after existing end date")]
    StartAfterExistingEnd,

    #[error("End date cannot be before existing start date")]
    EndBeforeExistingStart,

    #[error("Default project cannot be modified")]
    DefaultImmutable,

    #[error("Default project cannot be deleted")]
    DefaultUndeletable,

    #[error("Project has teams assigned")]
    HasTeams,
}

const MAX_PROJECT_NAME_LENGTH: usize = 200;

/// Validate a project name
pub fn validate_project_name(name: &str) -> Result<(), ProjectValidationError> {
    if name.trim().is_empty() {
        return Err(ProjectValidationError::EmptyName);
    }

    if name.chars().count() > MAX_PROJECT_NAME_LENGTH {
        return Err(ProjectValidationError::NameTooLong(MAX_PROJECT_NAME_LENGTH));
    }

    Ok(())
}

/// Validate that a date range is ordered
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ProjectValidationError> {
    if start > end {
        return Err(ProjectValidationError::StartAfterEnd);
    }

    Ok(())
}

/// Merge optional new dates into an existing range.
///
/// Only the supplied bounds are replaced; each supplied bound is checked
/// against the bound it will be paired with.
pub fn merge_date_range(
    current: (NaiveDate, NaiveDate),
    new_start: Option<NaiveDate>,
    new_end: Option<NaiveDate>,
) -> Result<(NaiveDate, NaiveDate), ProjectValidationError> {
    let (start, end) = current;

    match (new_start, new_end) {
        (Some(new_start), Some(new_end)) => {
            validate_date_range(new_start, new_end)?;
            Ok((new_start, new_end))
        }
        (Some(new_start), None) => {
            if new_start > end {
                return Err(ProjectValidationError::StartAfterExistingEnd);
            }
            Ok((new_start, end))
        }
        (None, Some(new_end)) => {
            if new_end < start {
                return Err(ProjectValidationError::EndBeforeExistingStart);
            }
            Ok((start, new_end))
        }
        (None, None) => Ok((start, end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_project_name() {
        assert!(validate_project_name("Alpha").is_ok());
        assert!(validate_project_name("Project with spaces").is_ok());
    }

    #[test]
    fn test_blank_project_name() {
        assert_eq!(
            validate_project_name("   "),
            Err(ProjectValidationError::EmptyName)
        );
    }

    #[test]
    fn test_project_name_too_long() {
        let long_name = "a".repeat(201);
        assert_eq!(
            validate_project_name(&long_name),
            Err(ProjectValidationError::NameTooLong(200))
        );
    }

    #[test]
    fn test_date_range() {
        assert!(validate_date_range(date(2025, 1, 1), date(2025, 12, 31)).is_ok());
        assert!(validate_date_range(date(2025, 1, 1), date(2025, 1, 1)).is_ok());
        assert_eq!(
            validate_date_range(date(2025, 2, 1), date(2025, 1, 31)),
            Err(ProjectValidationError::StartAfterEnd)
        );
    }

    #[test]
    fn test_merge_both_dates() {
        let current = (date(2025, 1, 1), date(2025, 6, 30));

        let merged =
            merge_date_range(current, Some(date(2026, 1, 1)), Some(date(2026, 3, 1))).unwrap();
        assert_eq!(merged, (date(2026, 1, 1), date(2026, 3, 1)));

        // The new pair is checked on its own, not against the current range
        assert_eq!(
            merge_date_range(current, Some(date(2026, 3, 1)), Some(date(2026, 1, 1))),
            Err(ProjectValidationError::StartAfterEnd)
        );
    }

    #[test]
    fn test_merge_start_only() {
        let current = (date(2025, 1, 1), date(2025, 6, 30));

        assert_eq!(
            merge_date_range(current, Some(date(2025, 6, 30)), None).unwrap(),
            (date(2025, 6, 30), date(2025, 6, 30))
        );
        assert_eq!(
            merge_date_range(current, Some(date(2025, 7, 1)), None),
            Err(ProjectValidationError::StartAfterExistingEnd)
        );
    }

    #[test]
    fn test_merge_end_only() {
        let current = (date(2025, 1, 1), date(2025, 6, 30));

        assert_eq!(
            merge_date_range(current, None, Some(date(2025, 1, 1))).unwrap(),
            (date(2025, 1, 1), date(2025, 1, 1))
        );
        assert_eq!(
            merge_date_range(current, None, Some(date(2024, 12, 31))),
            Err(ProjectValidationError::EndBeforeExistingStart)
        );
    }

    #[test]
    fn test_merge_no_dates() {
        let current = (date(2025, 1, 1), date(2025, 6, 30));
        assert_eq!(merge_date_range(current, None, None).unwrap(), current);
    }

    #[test]
    fn test_merge_property_over_offsets() {
        let start = date(2025, 3, 1);
        let end = date(2025, 3, 31);

        for offset in -40i64..40 {
            let candidate = start + chrono::Duration::days(offset);

            let start_only = merge_date_range((start, end), Some(candidate), None);
            assert_eq!(start_only.is_ok(), candidate <= end);

            let end_only = merge_date_range((start, end), None, Some(candidate));
            assert_eq!(end_only.is_ok(), candidate >= start);
        }
    }
}
