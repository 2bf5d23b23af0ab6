//! Markers command report data structures.

use super::output::{Output, Report};

/// Every registered marker with its help text.
#[derive(Debug)]
pub struct MarkersReport {
    pub markers: Vec<MarkerInfo>,
}

/// One marker definition.
#[derive(Debug)]
pub struct MarkerInfo {
    pub name: &'static str,
    pub target: &'static str,
    pub shape: &'static str,
    pub summary: Option<String>,
}

impl Report for MarkersReport {
    fn render(&self, out: &mut dyn Output) {
        out.section(&format!("Markers ({})", self.markers.len()));
        for marker in &self.markers {
            out.list_item(&format!("+{} ({}, {})", marker.name, marker.target, marker.shape));
            if let Some(summary) = &marker.summary {
                out.preformatted(&format!("      {}", summary));
            }
        }
    }
}
