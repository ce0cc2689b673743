use serde_json::{Value, json};

use crate::core::{Column, RenderConfig, Row};
use crate::extensions::{ChartStrategy, StrategyContext};

use super::common::base_series;

const MIN_SYMBOL_SIZE: f64 = 5.0;
const MAX_SYMBOL_SIZE: f64 = 20.0;

/// Effect-scatter points over the `china` geo map.
///
/// Columns are read positionally as longitude, latitude, name and value.
pub struct MapStrategy;

impl ChartStrategy for MapStrategy {
    fn name(&self) -> &str {
        "map"
    }

    fn reset_option(
        &self,
        columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig> {
        let [lng, lat, name, value, ..] = columns else {
            return None;
        };
        let props = ctx.props();

        let data: Vec<Value> = rows
            .iter()
            .filter_map(|row| {
                let amount = row.number(&value.id)?;
                Some(json!({
                    "value": [
                        row.number(&lng.id)?,
                        row.number(&lat.id)?,
                        row.text(&name.id).unwrap_or_default(),
                        amount,
                    ],
                    "symbolSize": (amount / 10.0).clamp(MIN_SYMBOL_SIZE, MAX_SYMBOL_SIZE),
                }))
            })
            .collect();

        let mut series = base_series("effectScatter", props);
        series.insert("coordinateSystem".to_owned(), json!("geo"));
        series.insert("geoIndex".to_owned(), json!(0));
        series.insert("data".to_owned(), Value::Array(data));

        Some(RenderConfig::from_value(json!({
            "legend": { "show": false },
            "colorBy": "data",
            "tooltip": { "show": true },
            "dataZoom": [{ "type": "inside" }],
            "geo": {
                "roam": false,
                "zoom": 1.1,
                "aspectScale": 0.75,
                "layoutCenter": ["50%", "50%"],
                "layoutSize": "100%",
                "selectedMode": false,
                "map": "china",
            },
            "series": [Value::Object(series)],
        })))
    }
}
