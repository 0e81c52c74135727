//! The phone field seam and the candidate number it produces.

use std::sync::LazyLock;

use regex::Regex;

static E164: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{7,14}$").expect("static pattern"));

/// Country-aware phone input, as exposed by the formatting widget.
///
/// The browser implementation wraps the international telephone input
/// library; tests use an in-memory fake.
pub trait PhoneField {
    /// What the user typed, unformatted.
    fn raw(&self) -> String;

    /// The number in international format (`+15551234567`).
    fn number(&self) -> String;

    /// The widget's own validity verdict for [`PhoneField::number`].
    fn is_valid_number(&self) -> bool;

    /// Copies `number` into the form field that is actually submitted.
    fn publish(&self, number: &str);

    /// Stops further edits once the number is accepted.
    fn lock(&self);
}

/// A number read from the field for a single verification attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhoneCandidate {
    pub raw: String,
    pub international: String,
    pub widget_valid: bool,
}

impl PhoneCandidate {
    pub fn read(field: &impl PhoneField) -> Self {
        Self {
            raw: field.raw(),
            international: field.number(),
            widget_valid: field.is_valid_number(),
        }
    }

    /// True when the widget accepts the number and it has E.164 shape.
    ///
    /// Only valid candidates are ever sent to the server.
    pub fn is_valid(&self) -> bool {
        self.widget_valid && E164.is_match(&self.international)
    }
}
