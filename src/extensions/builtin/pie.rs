use serde_json::{Value, json};

use crate::core::{Column, RenderConfig, Row};
use crate::extensions::{ChartStrategy, StrategyContext};

use super::common::{base_series, split_columns, title_for};

/// Ring chart: first column names the slices, second column sizes them.
pub struct PieStrategy;

impl ChartStrategy for PieStrategy {
    fn name(&self) -> &str {
        "pie"
    }

    fn reset_option(
        &self,
        columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig> {
        let (name_column, value_columns) = split_columns(columns)?;
        let value_column = value_columns.first()?;
        let props = ctx.props();

        let data: Vec<Value> = rows
            .iter()
            .map(|row| {
                json!({
                    "name": row.text(&name_column.id).unwrap_or_default(),
                    "value": row.number(&value_column.id),
                })
            })
            .collect();
        let names: Vec<Value> = data.iter().map(|item| item["name"].clone()).collect();

        let mut series = base_series("pie", props);
        series.insert("name".to_owned(), json!(value_column.display_label()));
        series.insert("radius".to_owned(), json!(["40%", "70%"]));
        series.insert("avoidLabelOverlap".to_owned(), json!(true));
        series.insert("data".to_owned(), Value::Array(data));

        Some(RenderConfig::from_value(json!({
            "title": title_for(props),
            "tooltip": { "trigger": "item" },
            "legend": { "show": true, "data": names, "top": "bottom" },
            "series": [series],
        })))
    }
}
