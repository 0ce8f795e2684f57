//! Wind-speed class breaks for marker and legend styling.
//!
//! Emitted as plain data; the rendering layer owns symbols and widgets.

use serde::Serialize;

/// One classification bucket with its RGBA display color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClassBreak {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
    /// RGBA color, fully opaque.
    pub color: [u8; 4],
}

/// The default wind-speed class-break table (km/h).
///
/// Near-white through yellows and reds into purples, so low speeds stay
/// visible on a dark basemap and extremes stand apart.
pub fn wind_speed_breaks() -> Vec<ClassBreak> {
    vec![
        ClassBreak { min: 0.0, max: 4.0, color: [255, 255, 250, 255] },
        ClassBreak { min: 5.0, max: 9.0, color: [255, 237, 160, 255] },
        ClassBreak { min: 10.0, max: 14.0, color: [254, 217, 118, 255] },
        ClassBreak { min: 15.0, max: 19.0, color: [254, 178, 76, 255] },
        ClassBreak { min: 20.0, max: 24.0, color: [253, 141, 60, 255] },
        ClassBreak { min: 25.0, max: 29.0, color: [252, 78, 42, 255] },
        ClassBreak { min: 30.0, max: 34.0, color: [227, 26, 28, 255] },
        ClassBreak { min: 35.0, max: 39.0, color: [204, 0, 51, 255] },
        ClassBreak { min: 40.0, max: 44.0, color: [204, 153, 255, 255] },
        ClassBreak { min: 45.0, max: 49.0, color: [153, 102, 255, 255] },
        ClassBreak { min: 50.0, max: 667.0, color: [102, 0, 153, 255] },
    ]
}

/// Index of the break containing `value`, or `None` when out of range.
pub fn classify(breaks: &[ClassBreak], value: f64) -> Option<usize> {
    breaks
        .iter()
        .position(|class_break| value >= class_break.min && value <= class_break.max)
}
