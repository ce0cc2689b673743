use serde_json::{Map, Value, json};

use crate::core::{Column, RenderConfig, Row};
use crate::extensions::{ChartStrategy, StrategyContext};

use super::common::{base_series, title_for};

/// Rows are handed to the treemap as-is, so nested `children` keep working.
pub struct TreemapStrategy;

impl ChartStrategy for TreemapStrategy {
    fn name(&self) -> &str {
        "treemap"
    }

    fn reset_option(
        &self,
        _columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig> {
        let props = ctx.props();
        let data: Vec<Value> = rows
            .iter()
            .map(|row| Value::Object(row.0.clone().into_iter().collect::<Map<_, _>>()))
            .collect();

        let mut series = base_series("treemap", props);
        series.insert("roam".to_owned(), json!(false));
        series.insert("nodeClick".to_owned(), json!(false));
        series.insert("label".to_owned(), json!({ "show": true }));
        series.insert("breadcrumb".to_owned(), json!({ "show": false }));
        series.insert("data".to_owned(), Value::Array(data));

        Some(RenderConfig::from_value(json!({
            "title": title_for(props),
            "series": [Value::Object(series)],
        })))
    }
}
