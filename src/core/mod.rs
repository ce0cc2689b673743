pub mod number_format;
pub mod render_config;
pub mod types;

pub use number_format::{approximate_num, omit_num};
pub use render_config::RenderConfig;
pub use types::{Column, Row, ValueFormat};
