//! Loading a document and producing printable layout output.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use folio_layout::{LayoutTree, NodeConfig, NodeId, NodeKind, Rect, Size, compute_layout};
use folio_render::{DrawCommand, PageSetup, RecordingRenderer, paint};
use serde::Serialize;

/// One line of the `rects` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectEntry {
    pub node: NodeId,
    pub kind: &'static str,
    pub parent: Option<NodeId>,
    pub rect: Rect,
}

/// A validated document tree.
pub struct Document {
    pub tree: LayoutTree,
    pub root: NodeId,
}

pub fn load_document(path: &Path) -> Result<Document> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = NodeConfig::from_json_str(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let (tree, root) = config
        .build()
        .with_context(|| format!("invalid document {}", path.display()))?;
    tracing::debug!(nodes = tree.len(), "loaded {}", path.display());
    Ok(Document { tree, root })
}

fn kind_name(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Container => "container",
        NodeKind::Image(_) => "image",
        NodeKind::Text(_) => "text",
        NodeKind::Flex(_) => "flex",
    }
}

impl Document {
    /// Resolved rectangle of every node, in pre-order.
    pub fn rects(&mut self, page: &PageSetup) -> Result<Vec<RectEntry>> {
        let map = compute_layout(&mut self.tree, self.root, page.content_rect())?;
        Ok(map
            .into_iter()
            .map(|(node, rect)| RectEntry {
                node,
                kind: kind_name(self.tree[node].kind()),
                parent: self.tree.parent(node),
                rect,
            })
            .collect())
    }

    /// Paint against a recording renderer and return its display list.
    pub fn display_list(&mut self, mut renderer: RecordingRenderer) -> Result<Vec<DrawCommand>> {
        paint(&mut self.tree, self.root, &mut renderer)?;
        Ok(renderer.into_commands())
    }

    /// Image sources referenced by the document, in tree order.
    pub fn image_sources(&self) -> Vec<&str> {
        self.tree
            .descendants(self.root)
            .filter_map(|id| match self.tree[id].kind() {
                NodeKind::Image(image) => Some(image.source.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Read the pixel size of a local image, relative to `base_dir`.
///
/// Returns `None` when the file is missing or cannot be decoded.
pub fn probe_image_size(base_dir: &Path, source: &str) -> Option<Size> {
    let path = base_dir.join(source);
    if !path.is_file() {
        return None;
    }
    match image::image_dimensions(&path) {
        Ok((width, height)) => Some(Size::new(width as f32, height as f32)),
        Err(e) => {
            tracing::warn!("Failed to read image size of {}: {}", path.display(), e);
            None
        }
    }
}
