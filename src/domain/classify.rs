//! Value classification into choropleth color bands

use std::fmt;

/// Ascending breakpoints. A value moves into the next band only when it
/// strictly exceeds the breakpoint.
pub const BREAKPOINTS: [f64; 7] = [10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0];

/// Discrete color band of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// Exactly zero
    Neutral,
    /// Up to and including 10 (also negative and NaN values)
    UpTo10,
    Over10,
    Over20,
    Over50,
    Over100,
    Over200,
    Over500,
    Over1000,
}

/// Bands reached by crossing `BREAKPOINTS[i]`.
const CROSSED: [Band; 7] = [
    Band::Over10,
    Band::Over20,
    Band::Over50,
    Band::Over100,
    Band::Over200,
    Band::Over500,
    Band::Over1000,
];

impl Band {
    /// All bands, ascending.
    pub const ALL: [Band; 9] = [
        Band::Neutral,
        Band::UpTo10,
        Band::Over10,
        Band::Over20,
        Band::Over50,
        Band::Over100,
        Band::Over200,
        Band::Over500,
        Band::Over1000,
    ];

    /// Fill color token.
    pub fn color(self) -> &'static str {
        match self {
            Band::Neutral => "#cccccc",
            Band::UpTo10 => "#FFEDA0",
            Band::Over10 => "#FED976",
            Band::Over20 => "#FEB24C",
            Band::Over50 => "#FD8D3C",
            Band::Over100 => "#FC4E2A",
            Band::Over200 => "#E31A1C",
            Band::Over500 => "#BD0026",
            Band::Over1000 => "#800026",
        }
    }

    /// Legend label for the value range of the band.
    pub fn label(self) -> &'static str {
        match self {
            Band::Neutral => "0",
            Band::UpTo10 => "0–10",
            Band::Over10 => "10–20",
            Band::Over20 => "20–50",
            Band::Over50 => "50–100",
            Band::Over100 => "100–200",
            Band::Over200 => "200–500",
            Band::Over500 => "500–1000",
            Band::Over1000 => "1000+",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color())
    }
}

/// Classify a value against the absolute [`BREAKPOINTS`].
pub fn classify(value: f64) -> Band {
    if value == 0.0 {
        return Band::Neutral;
    }
    BREAKPOINTS
        .iter()
        .zip(CROSSED)
        .rev()
        .find(|(breakpoint, _)| value > **breakpoint)
        .map(|(_, band)| band)
        .unwrap_or(Band::UpTo10)
}

/// Classify a value given the dataset maximum.
///
/// The maximum is accepted for callers that track it but does not take part
/// in band selection; the result always equals [`classify`].
pub fn classify_with_max(value: f64, _max_value: f64) -> Band {
    classify(value)
}
