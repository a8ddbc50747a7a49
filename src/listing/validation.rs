use std::collections::BTreeMap;

use crate::listing::steps::WizardStep;
use crate::models::{ListingDraft, ListingField};

/// Failing fields and the message to show next to each
pub type FieldErrors = BTreeMap<ListingField, String>;

pub const REQUIRED: &str = "required";
pub const NOT_A_PRICE: &str = "must be a non-negative number";
pub const NOT_A_COUNT: &str = "must be a whole number";

/// Parse a price input. Empty input is `Ok(None)`.
pub fn parse_price(raw: &str) -> Result<Option<f64>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(NOT_A_PRICE),
    }
}

/// Parse a room/bathroom count. Empty input is `Ok(None)`.
pub fn parse_count(raw: &str) -> Result<Option<u32>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>().map(Some).map_err(|_| NOT_A_COUNT)
}

fn format_error(field: ListingField, value: &str) -> Option<&'static str> {
    match field {
        ListingField::Price => parse_price(value).err(),
        ListingField::Rooms | ListingField::Bathrooms => parse_count(value).err(),
        _ => None,
    }
}

const FORMATTED_FIELDS: [ListingField; 3] = [
    ListingField::Price,
    ListingField::Rooms,
    ListingField::Bathrooms,
];

/// Errors blocking departure from `step`.
///
/// Required-field checks only cover the step itself; format checks apply to
/// every field that holds a value, wherever it is edited.
pub fn validate_step(draft: &ListingDraft, step: WizardStep) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for &field in step.required_fields() {
        if draft.field(field).trim().is_empty() {
            errors.insert(field, REQUIRED.to_string());
        }
    }

    for field in FORMATTED_FIELDS {
        if errors.contains_key(&field) {
            continue;
        }
        if let Some(message) = format_error(field, draft.field(field)) {
            errors.insert(field, message.to_string());
        }
    }

    errors
}

/// Errors across every step, as checked before submission
pub fn validate_all(draft: &ListingDraft) -> FieldErrors {
    WizardStep::ALL
        .into_iter()
        .flat_map(|step| validate_step(draft, step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ListingDraft {
        let mut draft = ListingDraft::default();
        draft.title = "Modern Studio Apartment".to_string();
        draft.description = "Bright and quiet".to_string();
        draft.location.address = "12 Allen Avenue".to_string();
        draft.location.city = "Ikeja".to_string();
        draft.location.state = "Lagos".to_string();
        draft.price = "2500".to_string();
        draft
    }

    #[test]
    fn price_rules() {
        assert_eq!(parse_price(""), Ok(None));
        assert_eq!(parse_price(" 0 "), Ok(Some(0.0)));
        assert_eq!(parse_price("1999.99"), Ok(Some(1999.99)));
        assert_eq!(parse_price("abc"), Err(NOT_A_PRICE));
        assert_eq!(parse_price("-5"), Err(NOT_A_PRICE));
        assert_eq!(parse_price("inf"), Err(NOT_A_PRICE));
    }

    #[test]
    fn count_rules() {
        assert_eq!(parse_count("3"), Ok(Some(3)));
        assert_eq!(parse_count("2.5"), Err(NOT_A_COUNT));
        assert_eq!(parse_count("-1"), Err(NOT_A_COUNT));
    }

    #[test]
    fn whitespace_only_title_is_missing() {
        let mut draft = complete_draft();
        draft.title = "   ".to_string();
        let errors = validate_step(&draft, WizardStep::BasicInfo);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&ListingField::Title], REQUIRED);
    }

    #[test]
    fn malformed_price_is_reported_from_any_step() {
        let mut draft = complete_draft();
        draft.title.clear();
        draft.price = "abc".to_string();

        let errors = validate_step(&draft, WizardStep::BasicInfo);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[&ListingField::Title], "required");
        assert_eq!(errors[&ListingField::Price], "must be a non-negative number");
    }

    #[test]
    fn empty_price_only_blocks_the_pricing_step() {
        let mut draft = complete_draft();
        draft.price.clear();
        assert!(validate_step(&draft, WizardStep::BasicInfo).is_empty());

        let errors = validate_step(&draft, WizardStep::PricingAndTerms);
        assert_eq!(errors[&ListingField::Price], REQUIRED);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn complete_draft_has_no_errors() {
        assert!(validate_all(&complete_draft()).is_empty());
    }

    #[test]
    fn validate_all_reports_each_field_once() {
        let mut draft = ListingDraft::default();
        draft.rooms = "many".to_string();
        let errors = validate_all(&draft);
        assert_eq!(errors[&ListingField::Rooms], NOT_A_COUNT);
        assert_eq!(errors[&ListingField::Price], REQUIRED);
        assert_eq!(errors.len(), 7);
    }
}
