//! Presentation components shared by the pages

pub mod loading;
pub mod metric_card;

pub use loading::Loading;
pub use metric_card::{MetricCard, Trend};
