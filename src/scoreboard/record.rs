use serde::Serialize;
use std::collections::BTreeMap;

use crate::fields::FieldClass;

/// Value shown for a score slot with no usable reading.
pub const DEFAULT_SCORE: &str = "0";

/// Aggregated scoreboard readings for one image or frame.
///
/// `score` always holds two entries. Every list is deduplicated and keeps
/// first-seen order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreboardRecord {
    pub score: [String; 2],
    pub quarter: Vec<String>,
    pub down: Vec<String>,
    pub yard_number: Vec<String>,
    pub play_time: Vec<String>,
    pub clock: Vec<String>,
    /// Readings for labels outside the known scoreboard fields.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub other: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    score_seen: bool,
}

impl Default for ScoreboardRecord {
    fn default() -> Self {
        Self {
            score: [DEFAULT_SCORE.to_string(), DEFAULT_SCORE.to_string()],
            quarter: Vec::new(),
            down: Vec::new(),
            yard_number: Vec::new(),
            play_time: Vec::new(),
            clock: Vec::new(),
            other: BTreeMap::new(),
            score_seen: false,
        }
    }
}

impl ScoreboardRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once any Score detection has been applied.
    pub fn has_score(&self) -> bool {
        self.score_seen
    }

    /// Writes a score reading into a slot; empty readings fall back to `"0"`.
    ///
    /// Slots past the second one land in the second.
    pub fn set_score(&mut self, slot: usize, value: String) {
        self.score_seen = true;
        let slot = slot.min(self.score.len() - 1);
        self.score[slot] = if value.is_empty() {
            DEFAULT_SCORE.to_string()
        } else {
            value
        };
    }

    /// Appends a non-empty value to the field's list unless already present.
    pub fn push_value(&mut self, class: &FieldClass, value: String) {
        if value.is_empty() {
            return;
        }
        let Some(list) = self.list_mut(class) else {
            return;
        };
        if !list.contains(&value) {
            list.push(value);
        }
    }

    /// Values collected for a non-score field, if the class has a list.
    pub fn values(&self, class: &FieldClass) -> &[String] {
        match class {
            FieldClass::Quarter => &self.quarter,
            FieldClass::Down => &self.down,
            FieldClass::YardNumber => &self.yard_number,
            FieldClass::PlayTime => &self.play_time,
            FieldClass::Clock => &self.clock,
            other => self
                .other
                .get(other.label())
                .map(|v| v.as_slice())
                .unwrap_or(&[]),
        }
    }

    fn list_mut(&mut self, class: &FieldClass) -> Option<&mut Vec<String>> {
        match class {
            FieldClass::Quarter => Some(&mut self.quarter),
            FieldClass::Down => Some(&mut self.down),
            FieldClass::YardNumber => Some(&mut self.yard_number),
            FieldClass::PlayTime => Some(&mut self.play_time),
            FieldClass::Clock => Some(&mut self.clock),
            FieldClass::Score | FieldClass::Scoreboard => None,
            FieldClass::Personnel(_) | FieldClass::Other(_) => {
                Some(self.other.entry(class.label().to_string()).or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_score_is_zero_zero() {
        let record = ScoreboardRecord::new();
        assert_eq!(record.score, ["0".to_string(), "0".to_string()]);
        assert!(!record.has_score());
    }

    #[test]
    fn test_set_score_clamps_slot() {
        let mut record = ScoreboardRecord::new();
        record.set_score(5, "21".into());
        record.set_score(0, String::new());
        assert_eq!(record.score, ["0".to_string(), "21".to_string()]);
        assert!(record.has_score());
    }

    #[test]
    fn test_push_value_dedups_in_order() {
        let mut record = ScoreboardRecord::new();
        record.push_value(&FieldClass::Clock, "12:00".into());
        record.push_value(&FieldClass::Clock, "11:59".into());
        record.push_value(&FieldClass::Clock, "12:00".into());
        record.push_value(&FieldClass::Clock, String::new());
        assert_eq!(record.clock, vec!["12:00", "11:59"]);
    }

    #[test]
    fn test_unknown_labels_go_to_other() {
        let mut record = ScoreboardRecord::new();
        let team = FieldClass::Other("Team".into());
        record.push_value(&team, "BUF".into());
        assert_eq!(record.values(&team), ["BUF".to_string()]);
        assert!(record.quarter.is_empty());
    }

    #[test]
    fn test_serializes_without_internal_flag() {
        let mut record = ScoreboardRecord::new();
        record.set_score(0, "7".into());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["score"], serde_json::json!(["7", "0"]));
        assert!(json.get("score_seen").is_none());
        assert!(json.get("other").is_none());
    }
}
