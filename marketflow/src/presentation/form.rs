//! Form fields and input validation.

use crate::core::MarketingInput;
use crate::errors::InputValidationError;

/// Industries offered by the form, in display order.
pub const INDUSTRY_OPTIONS: &[&str] = &[
    "AI & Automation",
    "Fashion & Retail",
    "Business Consulting",
    "Financial Technology",
    "Health & Wellness",
    "Technology",
    "E-commerce",
    "SaaS",
    "Education",
    "Manufacturing",
    "Other",
];

/// Preselected industry.
pub const DEFAULT_INDUSTRY: &str = "AI & Automation";

/// Shortest accepted project description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Whether `industry` is one of [`INDUSTRY_OPTIONS`].
#[must_use]
pub fn is_listed_industry(industry: &str) -> bool {
    INDUSTRY_OPTIONS.contains(&industry)
}

/// Checks the form fields in display order and reports the first problem.
///
/// The target market is optional and never rejected.
///
/// # Errors
///
/// Returns an [`InputValidationError`] naming the first invalid field.
pub fn validate_input(input: &MarketingInput) -> Result<(), InputValidationError> {
    if input.company_domain.trim().is_empty() {
        return Err(InputValidationError::new(
            "company_domain",
            "Company domain is required",
        ));
    }
    if input.industry.trim().is_empty() {
        return Err(InputValidationError::new("industry", "Industry is required"));
    }
    if input.project_description.trim().is_empty() {
        return Err(InputValidationError::new(
            "project_description",
            "Project description is required",
        ));
    }
    // Untrimmed length, surrounding whitespace counts.
    if input.project_description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(InputValidationError::new(
            "project_description",
            format!("Project description should be at least {MIN_DESCRIPTION_CHARS} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::SAMPLE_DESCRIPTION;
    use pretty_assertions::assert_eq;

    fn input(domain: &str, industry: &str, description: &str) -> MarketingInput {
        MarketingInput::new(domain, industry, description)
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&input("acme.io", "SaaS", SAMPLE_DESCRIPTION)).is_ok());
    }

    #[test]
    fn test_fields_checked_in_order() {
        let err = validate_input(&input("  ", "", "")).unwrap_err();
        assert_eq!(err.field, "company_domain");
        assert_eq!(err.to_string(), "Company domain is required");

        let err = validate_input(&input("acme.io", " ", "")).unwrap_err();
        assert_eq!(err.to_string(), "Industry is required");

        let err = validate_input(&input("acme.io", "SaaS", "\n\t")).unwrap_err();
        assert_eq!(err.to_string(), "Project description is required");
    }

    #[test]
    fn test_description_length_boundary() {
        let err = validate_input(&input("acme.io", "SaaS", &"x".repeat(49))).unwrap_err();
        assert_eq!(err.to_string(), "Project description should be at least 50 characters");

        assert!(validate_input(&input("acme.io", "SaaS", &"x".repeat(50))).is_ok());
    }

    #[test]
    fn test_description_length_counts_characters() {
        assert!(validate_input(&input("acme.io", "SaaS", &"é".repeat(50))).is_ok());
    }

    #[test]
    fn test_industry_options() {
        assert_eq!(INDUSTRY_OPTIONS.len(), 11);
        assert!(is_listed_industry(DEFAULT_INDUSTRY));
        assert!(is_listed_industry("Other"));
        assert!(!is_listed_industry("saas"));
    }
}
