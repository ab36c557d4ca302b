//! Static lookup tables used by the normalizer.

/// Letters OCR engines commonly read in place of digits.
pub const CONFUSABLE_DIGITS: [(char, char); 4] = [('O', '0'), ('o', '0'), ('I', '1'), ('l', '1')];

/// Digit substitutions for yard markers captured upside down.
///
/// Each digit maps to the digit it most often reads as when rotated 180°.
pub const INVERTED_DIGITS: [(char, char); 10] = [
    ('6', '9'),
    ('9', '6'),
    ('8', '8'),
    ('2', '2'),
    ('4', '3'),
    ('3', '4'),
    ('5', '5'),
    ('7', '7'),
    ('1', '1'),
    ('0', '0'),
];

fn lookup(table: &[(char, char)], c: char) -> char {
    table
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Replaces letters that look like digits.
pub fn substitute_confusables(text: &str) -> String {
    text.chars().map(|c| lookup(&CONFUSABLE_DIGITS, c)).collect()
}

/// Applies the digit-inversion table to every character.
pub fn invert_digits(text: &str) -> String {
    text.chars().map(|c| lookup(&INVERTED_DIGITS, c)).collect()
}
