//! Challenge settings — canonical model, sanitization, and resolution.
//!
//! Settings are authored externally and arrive as JSON. Older challenges
//! stored them nested inside the free-form rules blob; newer ones carry a
//! dedicated column. [`resolve`] collapses that chain into one canonical
//! value at challenge load, so nothing downstream ever re-derives settings.

use serde::{Deserialize, Serialize};

/// How long one period lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Daily,
    Weekly,
}

/// Survival challenge parameters.
///
/// Distances and radii are normalized: 0.0 is the center (safest),
/// 1.0 the outer edge. Unknown JSON fields are ignored, missing fields
/// take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalSettings {
    /// Safe-zone radius during the first period.
    pub initial_safe_zone_radius: f32,
    /// Safe-zone radius at the final period.
    pub min_safe_zone_radius: f32,
    /// Fraction of the safe-zone radius beyond which danger begins.
    /// 1.0 means danger starts exactly at the safe-zone edge.
    pub danger_threshold: f32,
    /// Maximum inward movement a participant can earn in one period.
    pub max_movement_per_period: f32,
    pub timeframe: Timeframe,
    /// Lives a participant starts with. Lives lost in danger; 0 = eliminated.
    pub start_lives: u32,
}

impl Default for SurvivalSettings {
    fn default() -> Self {
        Self {
            initial_safe_zone_radius: 1.0,
            min_safe_zone_radius: 0.1,
            danger_threshold: 1.0,
            max_movement_per_period: 0.05,
            timeframe: Timeframe::Daily,
            start_lives: 3,
        }
    }
}

impl SurvivalSettings {
    /// Clamp every field into its legal range, restoring the default for
    /// values that make no sense. Malformed settings degrade a challenge
    /// to defaults; they never fail it.
    pub fn sanitize(mut self) -> Self {
        let defaults = Self::default();

        if !self.initial_safe_zone_radius.is_finite() || self.initial_safe_zone_radius <= 0.0 {
            self.initial_safe_zone_radius = defaults.initial_safe_zone_radius;
        }
        self.initial_safe_zone_radius = self.initial_safe_zone_radius.min(1.0);

        if !self.min_safe_zone_radius.is_finite() || self.min_safe_zone_radius < 0.0 {
            self.min_safe_zone_radius = defaults.min_safe_zone_radius;
        }
        // Invariant: min <= initial.
        if self.min_safe_zone_radius >= self.initial_safe_zone_radius {
            self.min_safe_zone_radius = defaults
                .min_safe_zone_radius
                .min(self.initial_safe_zone_radius);
        }

        if !self.danger_threshold.is_finite() || self.danger_threshold <= 0.0 {
            self.danger_threshold = defaults.danger_threshold;
        }
        self.danger_threshold = self.danger_threshold.min(1.0);

        if !self.max_movement_per_period.is_finite() || self.max_movement_per_period <= 0.0 {
            self.max_movement_per_period = defaults.max_movement_per_period;
        }

        self.start_lives = self.start_lives.max(1);
        self
    }
}

/// Resolve the canonical settings for a challenge, once, at load time.
///
/// Resolution order: dedicated settings column, then the legacy
/// `survival_settings` key nested in the rules blob, then built-in
/// defaults. Whatever wins is sanitized before use.
pub fn resolve(settings_json: Option<&str>, rules_json: Option<&str>) -> SurvivalSettings {
    if let Some(raw) = settings_json.filter(|s| !s.trim().is_empty()) {
        if let Ok(parsed) = serde_json::from_str::<SurvivalSettings>(raw) {
            return parsed.sanitize();
        }
    }
    if let Some(raw) = rules_json.filter(|s| !s.trim().is_empty()) {
        if let Ok(rules) = serde_json::from_str::<serde_json::Value>(raw) {
            if let Some(nested) = rules.get("survival_settings") {
                if let Ok(parsed) =
                    serde_json::from_value::<SurvivalSettings>(nested.clone())
                {
                    return parsed.sanitize();
                }
            }
        }
    }
    SurvivalSettings::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SurvivalSettings::default();
        assert!((s.initial_safe_zone_radius - 1.0).abs() < f32::EPSILON);
        assert!((s.min_safe_zone_radius - 0.1).abs() < f32::EPSILON);
        assert!((s.danger_threshold - 1.0).abs() < f32::EPSILON);
        assert_eq!(s.timeframe, Timeframe::Daily);
        assert_eq!(s.start_lives, 3);
    }

    #[test]
    fn test_resolve_dedicated_column_wins() {
        let dedicated = r#"{"initial_safe_zone_radius":0.8,"timeframe":"weekly"}"#;
        let legacy = r#"{"survival_settings":{"initial_safe_zone_radius":0.5}}"#;
        let s = resolve(Some(dedicated), Some(legacy));
        assert!((s.initial_safe_zone_radius - 0.8).abs() < f32::EPSILON);
        assert_eq!(s.timeframe, Timeframe::Weekly);
        // Missing fields take defaults.
        assert_eq!(s.start_lives, 3);
    }

    #[test]
    fn test_resolve_legacy_nested_fallback() {
        let legacy = r#"{"points_per_day":10,"survival_settings":{"start_lives":5}}"#;
        let s = resolve(None, Some(legacy));
        assert_eq!(s.start_lives, 5);
        assert!((s.min_safe_zone_radius - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_resolve_malformed_falls_back_to_defaults() {
        let s = resolve(Some("not json"), Some("{\"rules\": tru"));
        assert_eq!(s.start_lives, 3);
        let s = resolve(Some(""), None);
        assert_eq!(s.timeframe, Timeframe::Daily);
    }

    #[test]
    fn test_sanitize_min_above_initial() {
        let s = SurvivalSettings {
            initial_safe_zone_radius: 0.5,
            min_safe_zone_radius: 0.9,
            ..Default::default()
        }
        .sanitize();
        assert!(s.min_safe_zone_radius <= s.initial_safe_zone_radius);
    }

    #[test]
    fn test_sanitize_nonsense_values() {
        let s = SurvivalSettings {
            initial_safe_zone_radius: -2.0,
            min_safe_zone_radius: f32::NAN,
            danger_threshold: 0.0,
            max_movement_per_period: -0.1,
            start_lives: 0,
            ..Default::default()
        }
        .sanitize();
        assert!((s.initial_safe_zone_radius - 1.0).abs() < f32::EPSILON);
        assert!(s.min_safe_zone_radius >= 0.0);
        assert!((s.danger_threshold - 1.0).abs() < f32::EPSILON);
        assert!(s.max_movement_per_period > 0.0);
        assert_eq!(s.start_lives, 1);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        // Legacy blobs carry fields the engine does not own.
        let raw = r#"{"start_lives":2,"elimination_policy":"sudden_death","nickname":"x"}"#;
        let s = resolve(Some(raw), None);
        assert_eq!(s.start_lives, 2);
    }
}
