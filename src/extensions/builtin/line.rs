use serde_json::{Value, json};

use crate::core::{Column, RenderConfig, Row};
use crate::extensions::{ChartStrategy, StrategyContext};

use super::common::{
    base_series, category_axis, legend, linear_gradient, series_values, split_columns, title_for,
    value_axis,
};

/// One smoothed line per value column over the category column.
pub struct LineStrategy;

impl ChartStrategy for LineStrategy {
    fn name(&self) -> &str {
        "line"
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
        let single = value_columns.len() == 1;

        let series: Vec<Value> = value_columns
            .iter()
            .map(|column| {
                let mut series = base_series("line", props);
                series.insert("name".to_owned(), json!(column.display_label()));
                series.insert("smooth".to_owned(), json!(true));
                series.insert("data".to_owned(), json!(series_values(column, rows, props)));
                if single {
                    series.insert(
                        "areaStyle".to_owned(),
                        linear_gradient("rgba(58, 132, 255, 0.5)", "rgba(58, 132, 255, 0)"),
                    );
                }
                Value::Object(series)
            })
            .collect();

        Some(RenderConfig::from_value(json!({
            "title": title_for(props),
            "tooltip": { "trigger": "axis" },
            "legend": legend(value_columns),
            "xAxis": category_axis(category, rows, props),
            "yAxis": value_axis(value_columns.first()),
            "series": series,
        })))
    }
}
