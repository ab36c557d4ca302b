//! Formation classification from offensive personnel counts.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::detector::Detection;
use crate::fields::{FieldClass, Position};

/// Offensive personnel grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormationLabel {
    Wildcat,
    Empty,
    Jumbo,
    IForm,
    Pistol,
    Singleback,
    Shotgun,
    Unknown,
}

impl FormationLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            FormationLabel::Wildcat => "WILDCAT",
            FormationLabel::Empty => "EMPTY",
            FormationLabel::Jumbo => "JUMBO",
            FormationLabel::IForm => "I_FORM",
            FormationLabel::Pistol => "PISTOL",
            FormationLabel::Singleback => "SINGLEBACK",
            FormationLabel::Shotgun => "SHOTGUN",
            FormationLabel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for FormationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of the four tracked personnel tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PositionTally {
    pub qb: u32,
    pub running_back: u32,
    pub tight_end: u32,
    pub wide_receiver: u32,
}

impl PositionTally {
    /// Counts personnel detections; every other class is ignored.
    pub fn from_detections<'a, I>(detections: I) -> Self
    where
        I: IntoIterator<Item = &'a Detection>,
    {
        let mut tally = Self::default();
        for detection in detections {
            if let FieldClass::Personnel(position) = detection.field_class {
                tally.add(position);
            }
        }
        tally
    }

    pub fn add(&mut self, position: Position) {
        match position {
            Position::Quarterback => self.qb += 1,
            Position::RunningBack => self.running_back += 1,
            Position::TightEnd => self.tight_end += 1,
            Position::WideReceiver => self.wide_receiver += 1,
        }
    }

    pub fn get(&self, position: Position) -> u32 {
        match position {
            Position::Quarterback => self.qb,
            Position::RunningBack => self.running_back,
            Position::TightEnd => self.tight_end,
            Position::WideReceiver => self.wide_receiver,
        }
    }

    pub fn classify(&self) -> FormationLabel {
        classify(self.qb, self.running_back, self.tight_end, self.wide_receiver)
    }
}

/// Ordered decision list; the first matching rule wins.
///
/// JUMBO must be tested before PISTOL/SINGLEBACK since both need one QB and one RB.
pub fn classify(qb: u32, rb: u32, te: u32, wr: u32) -> FormationLabel {
    if qb == 0 {
        FormationLabel::Wildcat
    } else if rb == 0 {
        FormationLabel::Empty
    } else if qb == 1 && rb == 1 && te >= 2 && wr <= 2 {
        FormationLabel::Jumbo
    } else if qb == 1 && rb == 2 {
        FormationLabel::IForm
    } else if qb == 1 && rb == 1 {
        if te >= 1 && wr >= 2 {
            FormationLabel::Pistol
        } else {
            FormationLabel::Singleback
        }
    } else if qb == 1 && rb >= 1 {
        FormationLabel::Shotgun
    } else {
        FormationLabel::Unknown
    }
}

/// Per-label counts over every detection, tracked or not.
pub fn class_counts<'a, I>(detections: I) -> BTreeMap<String, u32>
where
    I: IntoIterator<Item = &'a Detection>,
{
    let mut counts = BTreeMap::new();
    for detection in detections {
        *counts
            .entry(detection.field_class.label().to_string())
            .or_insert(0) += 1;
    }
    counts
}
