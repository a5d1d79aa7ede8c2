//! Frame sequences growing a chart one day at a time

use crate::renderer::GraphRenderer;
use crate::sink::ChartArtifact;
use crate::style::RenderContext;
use crate::types::AlignedSeries;
use covid_common::Result;

/// Re-renders a chart on ever longer prefixes of its data.
#[derive(Debug)]
pub struct AnimationDriver<'r, R> {
    renderer: &'r R,
}

impl<'r, R> AnimationDriver<'r, R>
where
    R: GraphRenderer<Data = AlignedSeries>,
{
    pub fn new(renderer: &'r R) -> Self {
        Self { renderer }
    }

    /// Lazy frames for prefix lengths `2..=series.max_len()`. Nothing is
    /// rendered until the iterator is advanced.
    pub fn frames<'a>(&self, ctx: &'a RenderContext, series: &'a AlignedSeries) -> Frames<'a, R>
    where
        'r: 'a,
    {
        Frames {
            renderer: self.renderer,
            ctx,
            series,
            next_len: 2,
            max_len: series.max_len(),
        }
    }

    /// Number of frames [`frames`](Self::frames) yields for `series`.
    pub fn frame_count(series: &AlignedSeries) -> usize {
        series.max_len().saturating_sub(1)
    }
}

/// Identifier of frame `index` (1-based) of chart `id`.
pub fn frame_id(id: &str, index: usize) -> String {
    format!("{id}_frame_{index:04}")
}

/// Iterator over animation frames. Clone it to replay the sequence.
#[derive(Debug)]
pub struct Frames<'a, R> {
    renderer: &'a R,
    ctx: &'a RenderContext,
    series: &'a AlignedSeries,
    next_len: usize,
    max_len: usize,
}

impl<R> Clone for Frames<'_, R> {
    fn clone(&self) -> Self {
        Self {
            renderer: self.renderer,
            ctx: self.ctx,
            series: self.series,
            next_len: self.next_len,
            max_len: self.max_len,
        }
    }
}

impl<R> Iterator for Frames<'_, R>
where
    R: GraphRenderer<Data = AlignedSeries>,
{
    type Item = Result<ChartArtifact>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_len > self.max_len {
            return None;
        }
        let len = self.next_len;
        self.next_len += 1;

        tracing::debug!(len, max_len = self.max_len, "Rendering animation frame");
        let frame = self.renderer.render(self.ctx, &self.series.truncated(len));
        Some(frame.map(|artifact| {
            let id = frame_id(artifact.id(), len - 1);
            artifact.with_id(id)
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.max_len + 1).saturating_sub(self.next_len);
        (remaining, Some(remaining))
    }
}

impl<R> ExactSizeIterator for Frames<'_, R> where R: GraphRenderer<Data = AlignedSeries> {}
