use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartProps;

pub const CHART_PROPS_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPropsJsonContractV1 {
    pub schema_version: u32,
    pub props: ChartProps,
}

impl ChartProps {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartPropsJsonContractV1 {
            schema_version: CHART_PROPS_JSON_SCHEMA_V1,
            props: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart props contract v1: {e}"))
        })
    }

    /// Accepts either a bare props object or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart props json payload: {e}"))
        })?;

        let props = if value.get("schema_version").is_some() {
            let payload: ChartPropsJsonContractV1 = serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse chart props contract: {e}"))
            })?;
            if payload.schema_version != CHART_PROPS_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported chart props schema version: {}",
                    payload.schema_version
                )));
            }
            payload.props
        } else {
            serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse chart props json payload: {e}"))
            })?
        };

        props.validate()?;
        Ok(props)
    }
}
