// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

/// The name of the Edudesk application.
pub const APP_NAME: &str = "edudesk";

/// Optional validation rules that are off unless configured.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct ValidationRules {
    /// Reject events whose end date is before their start date.
    #[serde(default)]
    pub end_after_start: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_after_start_is_off_by_default() {
        assert!(!ValidationRules::default().end_after_start);

        let rules: ValidationRules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, ValidationRules::default());

        let rules: ValidationRules = serde_json::from_str(r#"{"end_after_start":true}"#).unwrap();
        assert!(rules.end_after_start);
    }
}
