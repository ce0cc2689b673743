use serde_json::{Value, json};

use crate::core::{Column, RenderConfig, Row};
use crate::extensions::{ChartStrategy, StrategyContext};

use super::common::{
    base_series, category_axis, legend, series_values, set_zoom, split_columns, title_for,
    value_axis,
};

const BAR_WIDTH_PX: f64 = 20.0;

/// Grouped vertical bars; a slider appears once the bars overflow the width.
pub struct BarStrategy;

impl ChartStrategy for BarStrategy {
    fn name(&self) -> &str {
        "bar"
    }

    fn reset_option(
        &self,
        columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig> {
        let (category, value_columns) = split_columns(columns)?;
        if value_columns.is_empty() {
            return None;
        }
        let props = ctx.props();

        let series: Vec<Value> = value_columns
            .iter()
            .map(|column| {
                let mut series = base_series("bar", props);
                series.insert("name".to_owned(), json!(column.display_label()));
                series.insert("barMaxWidth".to_owned(), json!(BAR_WIDTH_PX));
                series.insert(
                    "label".to_owned(),
                    json!({ "show": props.omit > 0.0, "position": "top" }),
                );
                series.insert("data".to_owned(), json!(series_values(column, rows, props)));
                Value::Object(series)
            })
            .collect();

        let group_width = BAR_WIDTH_PX * value_columns.len() as f64;

        Some(RenderConfig::from_value(json!({
            "title": title_for(props),
            "tooltip": { "trigger": "axis" },
            "legend": legend(value_columns),
            "dataZoom": [set_zoom(group_width, ctx, rows.len())],
            "xAxis": category_axis(category, rows, props),
            "yAxis": value_axis(value_columns.first()),
            "series": series,
        })))
    }
}
