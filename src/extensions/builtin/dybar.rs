use serde_json::{Value, json};

use crate::core::{Column, RenderConfig, Row};
use crate::extensions::{ChartStrategy, StrategyContext};

use super::common::{base_series, categories, series_values, split_columns, title_for};

/// Horizontal ranking bars re-sorted by value on every update.
///
/// `zoom_num` caps how many ranks are visible.
pub struct DynamicBarStrategy;

impl ChartStrategy for DynamicBarStrategy {
    fn name(&self) -> &str {
        "dybar"
    }

    fn reset_option(
        &self,
        columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig> {
        let (category, value_columns) = split_columns(columns)?;
        let value_column = value_columns.first()?;
        let props = ctx.props();
        let visible_ranks = (props.zoom_num.max(1.0) - 1.0).floor();

        let mut series = base_series("bar", props);
        series.insert("name".to_owned(), json!(value_column.display_label()));
        series.insert("realtimeSort".to_owned(), json!(true));
        series.insert(
            "label".to_owned(),
            json!({ "show": true, "position": "right", "valueAnimation": true }),
        );
        series.insert(
            "data".to_owned(),
            json!(series_values(value_column, rows, props)),
        );

        Some(RenderConfig::from_value(json!({
            "title": title_for(props),
            "xAxis": { "type": "value", "max": "dataMax" },
            "yAxis": {
                "type": "category",
                "inverse": true,
                "max": visible_ranks,
                "data": categories(category, rows),
                "axisLabel": { "rotate": props.rotate },
                "animationDuration": 300,
                "animationDurationUpdate": 300,
            },
            "animationDuration": 0,
            "animationDurationUpdate": 1000,
            "animationEasing": "linear",
            "animationEasingUpdate": "linear",
            "series": [Value::Object(series)],
        })))
    }
}
