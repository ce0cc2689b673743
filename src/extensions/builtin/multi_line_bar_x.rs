use serde_json::{Value, json};

use crate::core::{Column, RenderConfig, Row, approximate_num};
use crate::extensions::{ChartStrategy, StrategyContext};

use super::common::{
    base_series, category_axis, legend, series_values, split_columns, title_for, value_axis,
};

/// First value column as bars on the left axis, the rest as lines on the right axis.
pub struct MultiLineBarStrategy;

impl ChartStrategy for MultiLineBarStrategy {
    fn name(&self) -> &str {
        "multi-line-bar-x"
    }

    fn reset_option(
        &self,
        columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig> {
        let (category, value_columns) = split_columns(columns)?;
        let (bar_column, line_columns) = value_columns.split_first()?;
        let props = ctx.props();

        let bar_max = rows
            .iter()
            .filter_map(|row| row.number(&bar_column.id))
            .fold(0.0_f64, f64::max);

        let mut bar = base_series("bar", props);
        bar.insert("name".to_owned(), json!(bar_column.display_label()));
        bar.insert("barMaxWidth".to_owned(), json!(20));
        bar.insert("data".to_owned(), json!(series_values(bar_column, rows, props)));

        let mut series = vec![Value::Object(bar)];
        series.extend(line_columns.iter().map(|column| {
            let mut line = base_series("line", props);
            // Series ids must be unique; only the bar carries `chart_id`.
            line.remove("id");
            line.insert("name".to_owned(), json!(column.display_label()));
            line.insert("yAxisIndex".to_owned(), json!(1));
            line.insert("smooth".to_owned(), json!(true));
            line.insert("data".to_owned(), json!(series_values(column, rows, props)));
            Value::Object(line)
        }));

        let mut left_axis = value_axis(Some(bar_column));
        left_axis["max"] = json!(approximate_num(bar_max));

        Some(RenderConfig::from_value(json!({
            "title": title_for(props),
            "tooltip": { "trigger": "axis" },
            "legend": legend(value_columns),
            "xAxis": category_axis(category, rows, props),
            "yAxis": [left_axis, value_axis(line_columns.first())],
            "series": series,
        })))
    }
}
