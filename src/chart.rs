//! Chart and legend payloads built from engine data.
//!
//! Produces plotly-style JSON objects a rendering layer can hand to its
//! charting widget verbatim. No drawing happens here.

use serde_json::{json, Value};

use crate::breaks::ClassBreak;
use crate::distribution::DistributionEntry;

/// Interpolate a slice color from blue (0%) to red (100%).
pub fn percentage_color(percentage: f64) -> [u8; 3] {
    let t = (percentage / 100.0).clamp(0.0, 1.0);
    let red = (255.0 * t).round() as u8;
    let blue = (255.0 * (1.0 - t)).round() as u8;
    [red, 0, blue]
}

fn hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Build a pie-chart JSON payload from distribution entries.
///
/// Labels are the categories, values the raw counts; slice colors follow
/// [`percentage_color`] so hotter slices hold a larger share of the session.
pub fn pie_chart_json(entries: &[DistributionEntry]) -> Value {
    let labels: Vec<&str> = entries.iter().map(|entry| entry.category.as_str()).collect();
    let values: Vec<usize> = entries.iter().map(|entry| entry.count).collect();
    let colors: Vec<String> = entries
        .iter()
        .map(|entry| hex_color(percentage_color(entry.percentage)))
        .collect();

    json!({
        "type": "pie",
        "labels": labels,
        "values": values,
        "marker": { "colors": colors },
        "hovertemplate": "Value=%{label}<br>Records=%{value}<extra></extra>",
        "textinfo": "percent+label",
    })
}

/// Build a legend/renderer JSON payload from a class-break table.
pub fn class_breaks_json(breaks: &[ClassBreak]) -> Value {
    let infos: Vec<Value> = breaks
        .iter()
        .map(|class_break| {
            json!({
                "min": class_break.min,
                "max": class_break.max,
                "color": hex_color([
                    class_break.color[0],
                    class_break.color[1],
                    class_break.color[2],
                ]),
            })
        })
        .collect();
    json!({ "classBreakInfos": infos })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaks::wind_speed_breaks;
    use crate::distribution::distribution;

    #[test]
    fn percentage_color_spans_blue_to_red() {
        assert_eq!(percentage_color(0.0), [0, 0, 255]);
        assert_eq!(percentage_color(100.0), [255, 0, 0]);
        assert_eq!(percentage_color(250.0), [255, 0, 0]);
        let mid = percentage_color(50.0);
        assert_eq!(mid[0], mid[2]);
    }

    #[test]
    fn pie_chart_payload_carries_counts_and_labels() {
        let values: Vec<String> = ["10", "10", "20"].iter().map(|v| v.to_string()).collect();
        let entries = distribution(&values, 3);
        let payload = pie_chart_json(&entries);

        assert_eq!(payload["type"], "pie");
        assert_eq!(payload["labels"][0], "10");
        assert_eq!(payload["values"][0], 2);
        assert_eq!(payload["values"][1], 1);
        assert!(payload["marker"]["colors"][0].as_str().unwrap().starts_with('#'));
    }

    #[test]
    fn class_breaks_payload_matches_table() {
        let breaks = wind_speed_breaks();
        let payload = class_breaks_json(&breaks);
        let infos = payload["classBreakInfos"].as_array().unwrap();
        assert_eq!(infos.len(), breaks.len());
        assert_eq!(infos[0]["min"], 0.0);
        assert_eq!(infos[0]["color"], "#FFFFFA");
    }
}
