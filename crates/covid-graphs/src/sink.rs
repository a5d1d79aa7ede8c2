//! Rendered chart images and where they are written

use covid_common::{sanitize_file_stem, CovidError, Result};
use std::path::{Path, PathBuf};

/// An RGB8 image produced by a renderer, keyed by its output identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    id: String,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ChartArtifact {
    pub fn new(id: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            pixels,
        }
    }

    /// Same image under another identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Destination for rendered charts.
pub trait ImageSink {
    /// Stores `artifact` and returns where it went.
    fn write(&mut self, artifact: &ChartArtifact) -> Result<PathBuf>;
}

/// Writes `<id>.png` files into one directory, created on first write.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File an artifact with identifier `id` is written to.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.png", sanitize_file_stem(id)))
    }
}

impl ImageSink for DirectorySink {
    fn write(&mut self, artifact: &ChartArtifact) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CovidError::sink_write_with_source(&self.dir, "cannot create output directory", e)
        })?;

        let path = self.path_for(artifact.id());
        let expected = artifact.width() as usize * artifact.height() as usize * 3;
        if artifact.pixels().len() != expected {
            return Err(CovidError::sink_write(
                &path,
                format!(
                    "pixel buffer holds {} bytes, expected {expected} for {}x{}",
                    artifact.pixels().len(),
                    artifact.width(),
                    artifact.height()
                ),
            ));
        }

        image::save_buffer(
            &path,
            artifact.pixels(),
            artifact.width(),
            artifact.height(),
            image::ColorType::Rgb8,
        )
        .map_err(|e| CovidError::sink_write_with_source(&path, "PNG encoding failed", e))?;

        tracing::info!(path = %path.display(), id = artifact.id(), "Wrote chart");
        Ok(path)
    }
}

/// Keeps artifacts in memory. Used by tests and by callers that encode
/// frames themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<ChartArtifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[ChartArtifact] {
        &self.artifacts
    }

    pub fn ids(&self) -> Vec<&str> {
        self.artifacts.iter().map(ChartArtifact::id).collect()
    }
}

impl ImageSink for MemorySink {
    fn write(&mut self, artifact: &ChartArtifact) -> Result<PathBuf> {
        self.artifacts.push(artifact.clone());
        Ok(PathBuf::from(artifact.id()))
    }
}
