use std::fmt;

/// Offensive personnel tags tracked for formation classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Quarterback,
    RunningBack,
    TightEnd,
    WideReceiver,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::TightEnd,
        Position::WideReceiver,
    ];

    /// Detector label for this position.
    pub fn label(self) -> &'static str {
        match self {
            Position::Quarterback => "qb",
            Position::RunningBack => "running_back",
            Position::TightEnd => "tight_end",
            Position::WideReceiver => "wide_receiver",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

/// Category label carried by a detection.
///
/// Unknown labels are kept verbatim in `Other` rather than dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldClass {
    Score,
    Quarter,
    Down,
    YardNumber,
    PlayTime,
    Clock,
    /// Localization marker for the whole scoreboard; carries no value.
    Scoreboard,
    Personnel(Position),
    Other(String),
}

impl FieldClass {
    /// Parses a detector label. Never fails.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Score" => FieldClass::Score,
            "Quarter" => FieldClass::Quarter,
            "Down" => FieldClass::Down,
            "YardNumber" => FieldClass::YardNumber,
            "PlayTime" => FieldClass::PlayTime,
            "Clock" => FieldClass::Clock,
            "SB" => FieldClass::Scoreboard,
            other => match Position::from_label(other) {
                Some(position) => FieldClass::Personnel(position),
                None => FieldClass::Other(other.to_string()),
            },
        }
    }

    /// Detector label for this class.
    pub fn label(&self) -> &str {
        match self {
            FieldClass::Score => "Score",
            FieldClass::Quarter => "Quarter",
            FieldClass::Down => "Down",
            FieldClass::YardNumber => "YardNumber",
            FieldClass::PlayTime => "PlayTime",
            FieldClass::Clock => "Clock",
            FieldClass::Scoreboard => "SB",
            FieldClass::Personnel(position) => position.label(),
            FieldClass::Other(label) => label,
        }
    }

    /// True for classes whose recognizer should only emit digits.
    pub fn digits_only(&self) -> bool {
        matches!(self, FieldClass::Score | FieldClass::YardNumber)
    }
}

impl fmt::Display for FieldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
