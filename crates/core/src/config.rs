//! Codec configuration
//!
//! The defaults reproduce the classic behaviour of fixed-width codecs:
//! uppercase digits for non-decimal bases, absent fields reset to their zero
//! value, and lenient width handling (truncate or log instead of failing).
//! `CodecConfig::strict()` turns every width anomaly into an error.

use serde::{Deserialize, Serialize};

/// Letter case for digits above 9 when `base != 10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitCase {
    /// `00FF`
    #[default]
    Upper,
    /// `00ff`
    Lower,
}

/// What happens to a non-optional field whose span decodes as absent
///
/// Optional fields always become `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentPolicy {
    /// Overwrite with the type's zero value (`0`, `""`, ...)
    #[default]
    Reset,
    /// Leave whatever the destination already held
    Keep,
}

/// Options shared by the marshal and unmarshal engines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Digit case for non-decimal integers (default: upper)
    pub digit_case: DigitCase,

    /// Handling of absent non-optional fields (default: reset)
    pub absent_policy: AbsentPolicy,

    /// Fail on width anomalies instead of truncating or logging (default: false)
    ///
    /// Affects integers and text wider than their span, temporal and custom
    /// encodings whose length differs from `len`, and input longer than the
    /// record.
    pub strict_width: bool,
}

impl CodecConfig {
    /// Configuration with `strict_width` enabled
    pub fn strict() -> Self {
        CodecConfig {
            strict_width: true,
            ..CodecConfig::default()
        }
    }

    /// Set the digit case
    pub fn with_digit_case(mut self, digit_case: DigitCase) -> Self {
        self.digit_case = digit_case;
        self
    }

    /// Set the absent policy
    pub fn with_absent_policy(mut self, absent_policy: AbsentPolicy) -> Self {
        self.absent_policy = absent_policy;
        self
    }

    /// Enable or disable strict width checking
    pub fn with_strict_width(mut self, strict_width: bool) -> Self {
        self.strict_width = strict_width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.digit_case, DigitCase::Upper);
        assert_eq!(config.absent_policy, AbsentPolicy::Reset);
        assert!(!config.strict_width);
    }

    #[test]
    fn test_strict() {
        assert!(CodecConfig::strict().strict_width);
    }

    #[test]
    fn test_builders() {
        let config = CodecConfig::default()
            .with_digit_case(DigitCase::Lower)
            .with_absent_policy(AbsentPolicy::Keep)
            .with_strict_width(true);
        assert_eq!(config.digit_case, DigitCase::Lower);
        assert_eq!(config.absent_policy, AbsentPolicy::Keep);
        assert!(config.strict_width);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CodecConfig = serde_json::from_str(r#"{"digit_case":"lower"}"#).unwrap();
        assert_eq!(config.digit_case, DigitCase::Lower);
        assert_eq!(config.absent_policy, AbsentPolicy::Reset);
        assert!(!config.strict_width);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = CodecConfig::strict().with_absent_policy(AbsentPolicy::Keep);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"keep\""));
        let back: CodecConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
