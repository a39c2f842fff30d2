//! barwheel-rs: data-admission and scaling engine for live bar charts.
//!
//! Charts ingest one batch per external tick. A capacity policy decides what
//! enters a bounded multi-series buffer, per-series maxima drive the value
//! domains, and a [`render::Renderer`] receives a fresh frame after every
//! mutation. Drawing itself lives outside this crate.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartCore, ChartHandle, ChartKind};
pub use error::{ChartError, ChartResult};
