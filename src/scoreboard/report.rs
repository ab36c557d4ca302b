use super::record::ScoreboardRecord;
use crate::fields::FieldClass;

/// Fields printed after the score, in report order.
const REPORT_FIELDS: [FieldClass; 5] = [
    FieldClass::Quarter,
    FieldClass::Down,
    FieldClass::YardNumber,
    FieldClass::PlayTime,
    FieldClass::Clock,
];

/// Renders a field-by-field report. Fields with no readings are omitted.
pub fn render_report(record: &ScoreboardRecord) -> String {
    let mut out = String::from("Final Scoreboard Data:\n");

    if record.has_score() {
        out.push_str(&format!("Score: {}, {}\n", record.score[0], record.score[1]));
    }

    for class in &REPORT_FIELDS {
        let values = record.values(class);
        if !values.is_empty() {
            out.push_str(&format!("{}: {}\n", class.label(), values.join(", ")));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_order_and_omission() {
        let mut record = ScoreboardRecord::new();
        record.push_value(&FieldClass::Clock, "1:02".into());
        record.push_value(&FieldClass::Quarter, "4th Quarter".into());
        record.set_score(1, "21".into());

        let report = render_report(&record);
        assert_eq!(
            report,
            "Final Scoreboard Data:\nScore: 0, 21\nQuarter: 4th Quarter\nClock: 1:02\n"
        );
    }

    #[test]
    fn test_report_joins_multiple_values() {
        let mut record = ScoreboardRecord::new();
        record.push_value(&FieldClass::YardNumber, "35".into());
        record.push_value(&FieldClass::YardNumber, "40".into());

        let report = render_report(&record);
        assert!(report.contains("YardNumber: 35, 40\n"));
        assert!(!report.contains("Score:"));
    }
}
