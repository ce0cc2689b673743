//! Option fragments shared by the built-in strategies.

use serde_json::{Map, Value, json};

use crate::api::ChartProps;
use crate::core::{Column, Row, ValueFormat, omit_num};

use crate::extensions::StrategyContext;

const BAR_GAP_PX: f64 = 10.0;

/// Slider zoom that shows as many bars as fit the instance width.
#[must_use]
pub fn set_zoom(bars_width: f64, ctx: &StrategyContext<'_>, data_len: usize) -> Value {
    let end = ctx.chart_width() / (bars_width + BAR_GAP_PX);
    json!({
        "type": "slider",
        "show": end < data_len as f64 - 1.0,
        "startValue": 0,
        "endValue": end,
    })
}

/// Vertical two-stop gradient fill.
#[must_use]
pub fn linear_gradient(start_color: &str, end_color: &str) -> Value {
    json!({
        "color": {
            "type": "linear",
            "x": 0,
            "y": 0,
            "x2": 0,
            "y2": 1,
            "colorStops": [
                { "offset": 0, "color": start_color },
                { "offset": 1, "color": end_color },
            ],
            "global": false,
        }
    })
}

/// Series skeleton with the transition settings every built-in uses.
#[must_use]
pub fn base_series(kind: &str, props: &ChartProps) -> Map<String, Value> {
    let mut series = Map::new();
    series.insert("type".to_owned(), json!(kind));
    if let Some(id) = &props.chart_id {
        series.insert("id".to_owned(), json!(id));
    }
    series.insert("animationDurationUpdate".to_owned(), json!(1000));
    series.insert("universalTransition".to_owned(), json!(true));
    series
}

#[must_use]
pub fn title_for(props: &ChartProps) -> Value {
    json!({
        "show": !props.title.is_empty(),
        "text": props.title,
        "subtext": props.subtitle,
        "left": "center",
    })
}

/// Splits columns into the category column and the value columns.
#[must_use]
pub fn split_columns(columns: &[Column]) -> Option<(&Column, &[Column])> {
    columns.split_first()
}

#[must_use]
pub fn categories(category: &Column, rows: &[Row]) -> Vec<Value> {
    rows.iter()
        .map(|row| json!(row.text(&category.id).unwrap_or_default()))
        .collect()
}

/// Data item for one value; labelled when abbreviation or a percent format applies.
#[must_use]
pub fn datum(value: Option<f64>, column: &Column, props: &ChartProps) -> Value {
    let Some(value) = value else {
        return Value::Null;
    };
    let formatted = match column.format {
        ValueFormat::Omit => Some(omit_num(value)),
        ValueFormat::Raw if props.omit > 0.0 => Some(omit_num(value)),
        ValueFormat::Percent => Some(format!("{value}%")),
        ValueFormat::Raw => None,
    };
    match formatted {
        Some(text) => json!({ "value": value, "label": { "formatter": text } }),
        None => json!(value),
    }
}

#[must_use]
pub fn series_values(column: &Column, rows: &[Row], props: &ChartProps) -> Vec<Value> {
    rows.iter()
        .map(|row| datum(row.number(&column.id), column, props))
        .collect()
}

#[must_use]
pub fn category_axis(category: &Column, rows: &[Row], props: &ChartProps) -> Value {
    json!({
        "type": "category",
        "name": category.display_label(),
        "data": categories(category, rows),
        "axisLabel": { "rotate": props.rotate },
    })
}

#[must_use]
pub fn value_axis(column: Option<&Column>) -> Value {
    let mut axis = json!({ "type": "value" });
    if let Some(unit) = column.and_then(|column| column.unit.as_deref()) {
        axis["name"] = json!(unit);
    }
    axis
}

#[must_use]
pub fn legend(value_columns: &[Column]) -> Value {
    let names: Vec<&str> = value_columns.iter().map(Column::display_label).collect();
    json!({ "show": names.len() > 1, "data": names, "top": "bottom" })
}
