use crate::core::{Domain, Viewport};
use crate::error::ChartResult;
use crate::render::{ChartFrame, Renderer, project_bars};

/// Headless renderer used by tests and data-only hosts.
///
/// It still validates every frame, and projects bars when given a viewport,
/// so tests catch inconsistent output without a drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub viewport: Option<Viewport>,
    pub frames_rendered: usize,
    pub last_point_count: usize,
    pub last_bar_count: usize,
    pub last_domains: Vec<Domain>,
}

impl NullRenderer {
    #[must_use]
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport: Some(viewport),
            ..Self::default()
        }
    }
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        if let Some(viewport) = self.viewport {
            self.last_bar_count = project_bars(frame, viewport)?.len();
        }
        self.frames_rendered += 1;
        self.last_point_count = frame.len();
        self.last_domains.clone_from(&frame.domains);
        Ok(())
    }
}
