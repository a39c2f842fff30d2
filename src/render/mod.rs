mod bars;
mod frame;
mod null_renderer;

pub use bars::{BarGeometry, project_bars};
pub use frame::ChartFrame;
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `ChartFrame` after every mutation so
/// drawing code stays isolated from admission and scaling logic.
pub trait Renderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()>;
}
