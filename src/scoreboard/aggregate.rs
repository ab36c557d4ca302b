use super::record::ScoreboardRecord;
use crate::detector::Detection;
use crate::fields::{normalize, FieldClass};
use crate::geometry::{side_of, Side};

/// Decides which of the two score slots a Score detection fills.
pub trait ScoreSlotStrategy {
    /// Returns 0 or 1; anything larger is treated as 1.
    fn slot(&self, detection: &Detection, image_width: f32, image_height: f32) -> usize;
}

/// Splits a scoreboard at the vertical midline: left half is slot 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct MidpointSplit;

impl ScoreSlotStrategy for MidpointSplit {
    fn slot(&self, detection: &Detection, image_width: f32, _image_height: f32) -> usize {
        match side_of(detection.center_x, image_width) {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Builds one `ScoreboardRecord` from the detections of a single image.
#[derive(Clone, Debug, Default)]
pub struct Aggregator<S = MidpointSplit> {
    strategy: S,
}

impl<S: ScoreSlotStrategy> Aggregator<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Normalizes and folds detections in input order.
    ///
    /// Score slots are last-write-wins; other fields keep the first occurrence
    /// of each distinct value.
    pub fn aggregate<'a, I>(&self, image_width: f32, image_height: f32, detections: I) -> ScoreboardRecord
    where
        I: IntoIterator<Item = &'a Detection>,
    {
        let mut record = ScoreboardRecord::new();

        for detection in detections {
            if detection.field_class == FieldClass::Scoreboard {
                continue;
            }

            let cleaned = normalize(&detection.recognized_text, &detection.field_class);

            match detection.field_class {
                FieldClass::Score => {
                    let slot = self.strategy.slot(detection, image_width, image_height);
                    record.set_score(slot, cleaned);
                }
                ref class => record.push_value(class, cleaned),
            }
        }

        record
    }
}

/// Aggregates with the midline score split.
pub fn aggregate(image_width: f32, image_height: f32, detections: &[Detection]) -> ScoreboardRecord {
    Aggregator::new(MidpointSplit).aggregate(image_width, image_height, detections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(class: FieldClass, x: f32, text: &str) -> Detection {
        Detection::new(class, x, 50.0, 20.0, 10.0).with_text(text)
    }

    #[test]
    fn test_score_sides_with_garbage_right() {
        let detections = vec![
            det(FieldClass::Score, 100.0, "7"),
            det(FieldClass::Score, 700.0, "??"),
        ];
        let record = aggregate(1000.0, 200.0, &detections);
        assert_eq!(record.score, ["7".to_string(), "0".to_string()]);
        assert!(record.has_score());
    }

    #[test]
    fn test_score_last_write_wins_per_side() {
        let detections = vec![
            det(FieldClass::Score, 100.0, "7"),
            det(FieldClass::Score, 900.0, "14"),
            det(FieldClass::Score, 200.0, "10"),
        ];
        let record = aggregate(1000.0, 200.0, &detections);
        assert_eq!(record.score, ["10".to_string(), "14".to_string()]);
    }

    #[test]
    fn test_quarter_dedup() {
        let detections = vec![
            det(FieldClass::Quarter, 400.0, "2ND"),
            det(FieldClass::Quarter, 410.0, "2nd"),
        ];
        let record = aggregate(1000.0, 200.0, &detections);
        assert_eq!(record.quarter, vec!["2nd Quarter"]);
    }

    #[test]
    fn test_empty_readings_dropped_and_marker_skipped() {
        let detections = vec![
            det(FieldClass::Scoreboard, 500.0, "anything"),
            det(FieldClass::PlayTime, 300.0, "--"),
            det(FieldClass::Clock, 300.0, "12:34"),
        ];
        let record = aggregate(1000.0, 200.0, &detections);
        assert!(record.play_time.is_empty());
        assert_eq!(record.clock, vec!["12:34"]);
        assert!(record.other.is_empty());
        assert!(!record.has_score());
    }

    #[test]
    fn test_no_detections() {
        let record = aggregate(1000.0, 200.0, &[]);
        assert_eq!(record, ScoreboardRecord::new());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let detections = vec![
            det(FieldClass::Down, 300.0, "1st&10"),
            det(FieldClass::Quarter, 400.0, "2ND"),
            det(FieldClass::Score, 10.0, "7"),
            det(FieldClass::Score, 900.0, "O"),
        ];
        let record = aggregate(1000.0, 200.0, &detections);
        assert_eq!(record.down, vec!["1St And 10"]);
        assert_eq!(record.quarter, vec!["2nd Quarter"]);
        assert_eq!(record.score, ["7".to_string(), "0".to_string()]);
        assert!(record.yard_number.is_empty());
        assert!(record.play_time.is_empty());
        assert!(record.clock.is_empty());
    }

    struct TopBottomSplit;

    impl ScoreSlotStrategy for TopBottomSplit {
        fn slot(&self, detection: &Detection, _image_width: f32, image_height: f32) -> usize {
            if detection.center_y < image_height / 2.0 { 0 } else { 1 }
        }
    }

    #[test]
    fn test_custom_slot_strategy() {
        let detections = vec![
            Detection::new(FieldClass::Score, 900.0, 20.0, 10.0, 10.0).with_text("21"),
            Detection::new(FieldClass::Score, 100.0, 180.0, 10.0, 10.0).with_text("3"),
        ];
        let record = Aggregator::new(TopBottomSplit).aggregate(1000.0, 200.0, &detections);
        assert_eq!(record.score, ["21".to_string(), "3".to_string()]);
    }
}
