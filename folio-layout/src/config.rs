//! JSON document description.
//!
//! A document is one root [`NodeConfig`] with nested children. Building it
//! validates every node (units, fraction ranges, insets, colors) and fills
//! a fresh [`LayoutTree`]; configuration errors surface here and never
//! during resolution.
//!
//! ```json
//! {
//!   "type": "flex",
//!   "mode": "absolute",
//!   "position": [0, 0],
//!   "size": [400, 100],
//!   "gap": 20,
//!   "children": [
//!     { "type": "text", "mode": "proportional", "size": ["50%", "100%"], "content": "Hello" }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::error::LayoutError;
use crate::flex::{AlignItems, FlexDirection, FlexStyle, JustifyContent};
use crate::node::{
    DEFAULT_FONT_SIZE, Geometry, HAlign, ImageContent, ImageFit, Length, LayoutNode,
    MeasurementMode, TextAlign, TextContent, VAlign, VerticalAlign,
};
use crate::primitives::Color;
use crate::tree::{LayoutTree, NodeId};

fn origin() -> [Length; 2] {
    [Length::Number(0.0), Length::Number(0.0)]
}

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

/// One node of a document description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    #[serde(default, alias = "measurementMode")]
    pub mode: MeasurementMode,
    #[serde(default = "origin")]
    pub position: [Length; 2],
    pub size: [Length; 2],
    #[serde(default)]
    pub padding: f32,
    #[serde(default)]
    pub margin: f32,
    #[serde(default)]
    pub border_width: f32,
    /// Hex color, black when absent.
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(flatten)]
    pub kind: KindConfig,
    #[serde(default)]
    pub children: Vec<NodeConfig>,
}

/// Variant-specific fields, selected by `"type"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum KindConfig {
    Container,
    Image {
        source: String,
        #[serde(default)]
        fit: ImageFit,
        #[serde(default)]
        align: Option<HAlign>,
        #[serde(default)]
        valign: Option<VAlign>,
    },
    Text {
        content: String,
        #[serde(default = "default_font_size")]
        font_size: f32,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        align: TextAlign,
        #[serde(default)]
        vertical_align: VerticalAlign,
    },
    Flex {
        #[serde(default)]
        direction: FlexDirection,
        #[serde(default)]
        justify_content: JustifyContent,
        #[serde(default)]
        align_items: AlignItems,
        #[serde(default)]
        gap: f32,
    },
}

fn parse_color(hex: Option<&str>) -> Result<Color, LayoutError> {
    hex.map_or(Ok(Color::BLACK), Color::from_hex)
}

impl NodeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a new tree from this description, returning it with its root.
    pub fn build(&self) -> Result<(LayoutTree, NodeId), LayoutError> {
        let mut tree = LayoutTree::new();
        let root = self.build_into(&mut tree)?;
        Ok((tree, root))
    }

    /// Insert this node and its subtree into `tree` as a detached subtree.
    pub fn build_into(&self, tree: &mut LayoutTree) -> Result<NodeId, LayoutError> {
        let id = tree.insert(self.to_node()?)?;
        for child in &self.children {
            let child_id = child.build_into(tree)?;
            tree.append_child(id, child_id)?;
        }
        Ok(id)
    }

    fn to_node(&self) -> Result<LayoutNode, LayoutError> {
        let geometry = Geometry::parse(self.mode, self.position, self.size)?;

        let node = match &self.kind {
            KindConfig::Container => LayoutNode::container(geometry),
            KindConfig::Image {
                source,
                fit,
                align,
                valign,
            } => LayoutNode::image(
                geometry,
                ImageContent {
                    source: source.clone(),
                    fit: *fit,
                    h_align: *align,
                    v_align: *valign,
                },
            ),
            KindConfig::Text {
                content,
                font_size,
                color,
                align,
                vertical_align,
            } => LayoutNode::text(
                geometry,
                TextContent::new(content.as_str())
                    .font_size(*font_size)
                    .color(parse_color(color.as_deref())?)
                    .align(*align)
                    .vertical_align(*vertical_align),
            ),
            KindConfig::Flex {
                direction,
                justify_content,
                align_items,
                gap,
            } => LayoutNode::flex(
                geometry,
                FlexStyle {
                    direction: *direction,
                    justify_content: *justify_content,
                    align_items: *align_items,
                    gap: *gap,
                },
            ),
        };

        Ok(node
            .padding(self.padding)
            .margin(self.margin)
            .border(self.border_width, parse_color(self.border_color.as_deref())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn builds_nested_document() {
        let config = NodeConfig::from_json_str(
            r##"{
                "type": "flex",
                "size": [400, 100],
                "justifyContent": "space-between",
                "alignItems": "stretch",
                "gap": 8,
                "padding": 4,
                "borderWidth": 1,
                "borderColor": "#336699",
                "children": [
                    { "type": "text", "mode": "proportional", "size": ["50%", "100%"],
                      "content": "Hello", "fontSize": 18, "verticalAlign": "bottom" },
                    { "type": "image", "size": ["64px", 64], "source": "logo.png", "fit": "cover" }
                ]
            }"##,
        )
        .unwrap();

        let (tree, root) = config.build().unwrap();
        assert_eq!(tree.len(), 3);
        let flex = tree[root].as_flex().unwrap();
        assert_eq!(flex.style().justify_content, JustifyContent::SpaceBetween);
        assert_eq!(flex.style().align_items, AlignItems::Stretch);
        assert_eq!(flex.style().gap, 8.0);
        assert_eq!(tree[root].border_style().color, Color::rgb8(0x33, 0x66, 0x99));

        let text = tree.children(root)[0];
        match tree[text].kind() {
            NodeKind::Text(t) => {
                assert_eq!(t.content, "Hello");
                assert_eq!(t.font_size, 18.0);
                assert_eq!(t.vertical_align, VerticalAlign::Bottom);
            }
            other => panic!("expected text, got {other:?}"),
        }
        assert_eq!(tree[text].geometry().size().width, 0.5);

        let image = tree.children(root)[1];
        assert!(matches!(
            tree[image].kind(),
            NodeKind::Image(ImageContent { fit: ImageFit::Cover, .. })
        ));
    }

    #[test]
    fn pixel_size_on_proportional_node_is_a_configuration_error() {
        let config = NodeConfig::from_json_str(
            r#"{ "type": "container", "mode": "proportional", "size": ["120px", "50%"] }"#,
        )
        .unwrap();
        assert!(matches!(config.build(), Err(LayoutError::Configuration(_))));
    }

    #[test]
    fn unknown_unit_fails_while_parsing() {
        let err = NodeConfig::from_json_str(r#"{ "type": "container", "size": ["3em", 10] }"#)
            .unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }

    #[test]
    fn negative_gap_is_rejected() {
        let config =
            NodeConfig::from_json_str(r#"{ "type": "flex", "size": [10, 10], "gap": -4 }"#).unwrap();
        assert!(matches!(config.build(), Err(LayoutError::Configuration(_))));
    }

    #[test]
    fn measurement_mode_alias() {
        let config = NodeConfig::from_json_str(
            r#"{ "type": "container", "measurementMode": "proportional", "size": [0.5, 0.5] }"#,
        )
        .unwrap();
        assert_eq!(config.mode, MeasurementMode::Proportional);
    }
}
