//! Vega-lite chart specifications for the presentation adapter.
//!
//! These are plain JSON values: the adapter hands them, together with the
//! view's rows, to whatever widget renders vega-lite. Field names refer to
//! columns of the serialized row data.

use serde_json::{Value, json};

/// Topojson source for the US state outlines used by the choropleths.
pub const US_TOPOJSON_URL: &str =
    "https://cdn.jsdelivr.net/npm/vega-datasets@v1.29.0/data/us-10m.json";

/// A grouped bar chart: `x_field` on the category axis, one bar per
/// `series_field` value, offset and colored by series.
pub fn grouped_bar(x_field: &str, y_field: &str, series_field: &str) -> Value {
    json!({
        "mark": "bar",
        "encoding": {
            "x": {"field": x_field},
            "y": {"field": y_field, "type": "quantitative"},
            "xOffset": {"field": series_field},
            "color": {"field": series_field}
        }
    })
}

/// A multi-series line chart over a period axis.
pub fn period_line(x_field: &str, y_field: &str, series_field: &str) -> Value {
    json!({
        "mark": "line",
        "encoding": {
            "x": {"field": x_field},
            "y": {"field": y_field, "type": "quantitative"},
            "color": {"field": series_field}
        }
    })
}

/// An albersUsa choropleth shading states by `measure`, looking the value up
/// from the supplied row data via the numeric state id.
pub fn state_choropleth(measure: &str) -> Value {
    json!({
        "width": 600,
        "height": 400,
        "data": {
            "url": US_TOPOJSON_URL,
            "format": {"type": "topojson", "feature": "states"}
        },
        "transform": [{
            "lookup": "id",
            "from": {"data": {"name": "source"}, "key": "GEO_ID", "fields": [measure]}
        }],
        "projection": {"type": "albersUsa"},
        "mark": "geoshape",
        "encoding": {
            "color": {"field": measure, "type": "quantitative"}
        }
    })
}
