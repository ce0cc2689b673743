use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{InitOptions, RendererKind, Theme};

/// Component-level configuration handed to strategies on every reconciliation.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Missing fields take the
/// component defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProps {
    /// Chart type identifier resolved through the strategy loader.
    #[serde(rename = "type", default = "default_type_id")]
    pub type_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub renderer: RendererKind,
    #[serde(default)]
    pub use_dirty_rect: bool,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
    /// Layout hints passed through to strategies verbatim.
    #[serde(default)]
    pub omit: f64,
    #[serde(default)]
    pub rotate: f64,
    #[serde(default = "default_zoom_num")]
    pub zoom_num: f64,
    /// Series id used by strategies so transitions animate between chart types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_id: Option<String>,
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            type_id: default_type_id(),
            title: String::new(),
            subtitle: String::new(),
            theme: Theme::default(),
            locale: default_locale(),
            renderer: RendererKind::default(),
            use_dirty_rect: false,
            device_pixel_ratio: default_device_pixel_ratio(),
            omit: 0.0,
            rotate: 0.0,
            zoom_num: default_zoom_num(),
            chart_id: None,
        }
    }
}

impl ChartProps {
    #[must_use]
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = type_id.into();
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        self.title = title.into();
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: RendererKind) -> Self {
        self.renderer = renderer;
        self
    }

    #[must_use]
    pub fn with_device_pixel_ratio(mut self, device_pixel_ratio: f64) -> Self {
        self.device_pixel_ratio = device_pixel_ratio;
        self
    }

    /// Sets the `omit`, `rotate` and `zoom_num` layout hints.
    #[must_use]
    pub fn with_layout(mut self, omit: f64, rotate: f64, zoom_num: f64) -> Self {
        self.omit = omit;
        self.rotate = rotate;
        self.zoom_num = zoom_num;
        self
    }

    #[must_use]
    pub fn with_chart_id(mut self, chart_id: impl Into<String>) -> Self {
        self.chart_id = Some(chart_id.into());
        self
    }

    /// Options fixed at backend init.
    #[must_use]
    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            locale: self.locale.clone(),
            renderer: self.renderer,
            device_pixel_ratio: self.device_pixel_ratio,
            use_dirty_rect: self.use_dirty_rect,
        }
    }

    /// Whether moving from `self` to `next` needs a fresh backend instance.
    #[must_use]
    pub fn requires_reinit(&self, next: &Self) -> bool {
        self.theme != next.theme || self.init_options() != next.init_options()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.device_pixel_ratio.is_finite() || self.device_pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("omit", self.omit),
            ("rotate", self.rotate),
            ("zoomNum", self.zoom_num),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "layout hint `{name}` must be finite"
                )));
            }
        }
        Ok(())
    }
}

fn default_type_id() -> String {
    "pie".to_owned()
}

fn default_locale() -> String {
    "zh-cn".to_owned()
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_zoom_num() -> f64 {
    7.0
}
