//! Shared test utilities for the villa-press test suite.
//!
//! Fixture constructors used across module tests: the stock property config,
//! the stock slide id sequence, and a lead form filled with values that pass
//! every validation bound.

use crate::config::PropertyConfig;
use crate::page::LeadForm;

/// The stock demo config — explicit alias so tests read as intent.
pub fn sample_config() -> PropertyConfig {
    PropertyConfig::default()
}

/// Slide ids of the stock config, in display order.
pub fn slide_ids() -> Vec<String> {
    sample_config().slides.iter().map(|s| s.id.clone()).collect()
}

/// A lead form whose every field passes validation against the stock config.
pub fn filled_lead_form() -> LeadForm {
    LeadForm::with_fields(
        "Alexis Baldwin",
        "alexis@example.com",
        "(212) 555-1212",
        "We are a family of four looking for a quiet summer rental close to \
         the village, ideally July.",
        Some("july".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_form_passes_validation() {
        let form = filled_lead_form();
        assert!(form.validate(&sample_config()).is_ok());
    }

    #[test]
    fn slide_ids_match_stock_config() {
        assert_eq!(slide_ids().len(), sample_config().slides.len());
    }
}
