//! Hand-off of the finished raster to a map overlay.
//!
//! The interactive map itself lives outside this crate. A sink receives the
//! raster together with its bounding box and decides how to publish it.

use crate::error::{PipelineError, Result};
use aqi_common::BoundingBox;
use renderer::{write_png_file, Raster};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything a map layer needs to place the heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayHandoff {
    /// Raster in grid order (row 0 = `lat_min`).
    pub raster: Raster,
    pub bbox: BoundingBox,
    /// Map center as `(lat, lon)`.
    pub center: (f64, f64),
    pub opacity: f64,
    pub zoom_start: u8,
}

impl OverlayHandoff {
    pub fn new(raster: Raster, bbox: BoundingBox, opacity: f64, zoom_start: u8) -> Self {
        Self {
            raster,
            center: bbox.center(),
            bbox,
            opacity,
            zoom_start,
        }
    }

    /// Raster with the northern edge in the first row, as map layers expect.
    pub fn north_up(&self) -> Raster {
        self.raster.flipped_vertically()
    }
}

/// Receiver of finished heatmaps.
pub trait OverlaySink {
    fn publish(&mut self, handoff: &OverlayHandoff) -> Result<()>;
}

/// JSON description of an image overlay, loadable by a web map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayDocument {
    /// Image path, relative to the document.
    pub image: String,
    /// `[[lat_min, lon_min], [lat_max, lon_max]]`
    pub bounds: [[f64; 2]; 2],
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub opacity: f64,
    pub zoom_start: u8,
    pub width: usize,
    pub height: usize,
}

/// Image written beside an overlay document: same stem, `.png` extension.
pub fn overlay_image_path(document_path: &Path) -> PathBuf {
    document_path.with_extension("png")
}

/// Writes a north-up PNG and an [`OverlayDocument`] next to it.
#[derive(Debug, Clone)]
pub struct FileOverlaySink {
    document_path: PathBuf,
    image_path: PathBuf,
}

impl FileOverlaySink {
    /// `document_path` is the JSON file; the image shares its stem with a
    /// `.png` extension.
    pub fn new(document_path: impl Into<PathBuf>) -> Self {
        let document_path = document_path.into();
        let image_path = overlay_image_path(&document_path);
        Self {
            document_path,
            image_path,
        }
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    fn image_reference(&self) -> String {
        self.image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.image_path.display().to_string())
    }
}

impl OverlaySink for FileOverlaySink {
    fn publish(&mut self, handoff: &OverlayHandoff) -> Result<()> {
        if self.image_path == self.document_path {
            return Err(PipelineError::Overlay(format!(
                "overlay document {} would overwrite its own image",
                self.document_path.display()
            )));
        }

        let north_up = handoff.north_up();
        write_png_file(&north_up, &self.image_path)?;

        let document = OverlayDocument {
            image: self.image_reference(),
            bounds: handoff.bbox.corners(),
            center: [handoff.center.0, handoff.center.1],
            opacity: handoff.opacity,
            zoom_start: handoff.zoom_start,
            width: north_up.width(),
            height: north_up.height(),
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| PipelineError::Overlay(e.to_string()))?;
        std::fs::write(&self.document_path, json)
            .map_err(|e| PipelineError::io(&self.document_path, e))?;

        info!(
            document = %self.document_path.display(),
            image = %self.image_path.display(),
            "Published map overlay"
        );
        Ok(())
    }
}

/// Keeps every hand-off in memory.
#[derive(Debug, Default)]
pub struct MemoryOverlaySink {
    pub handoffs: Vec<OverlayHandoff>,
}

impl MemoryOverlaySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&OverlayHandoff> {
        self.handoffs.last()
    }
}

impl OverlaySink for MemoryOverlaySink {
    fn publish(&mut self, handoff: &OverlayHandoff) -> Result<()> {
        self.handoffs.push(handoff.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_path_shares_stem() {
        let sink = FileOverlaySink::new("/tmp/out/heatmap_overlay.json");
        assert_eq!(sink.image_path(), Path::new("/tmp/out/heatmap_overlay.png"));
        assert_eq!(sink.image_reference(), "heatmap_overlay.png");
    }

    #[test]
    fn test_png_document_path_refuses_to_publish() {
        let dir = tempfile::tempdir().unwrap();
        let document = dir.path().join("map.png");
        let mut sink = FileOverlaySink::new(document.clone());
        assert_eq!(sink.image_path(), sink.document_path());

        let raster = Raster::from_pixels(1, 1, vec![0, 128, 0]).unwrap();
        let handoff = OverlayHandoff::new(raster, BoundingBox::new(0.0, 1.0, 0.0, 1.0), 0.6, 12);
        assert!(matches!(sink.publish(&handoff), Err(PipelineError::Overlay(_))));
        assert!(!document.exists());
    }

    #[test]
    fn test_handoff_center_is_bbox_midpoint() {
        let raster = Raster::from_pixels(1, 1, vec![0, 0, 0]).unwrap();
        let handoff = OverlayHandoff::new(raster, BoundingBox::new(10.0, 12.0, 20.0, 24.0), 0.6, 12);
        assert_eq!(handoff.center, (11.0, 22.0));
    }
}
