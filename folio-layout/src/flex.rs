//! Flex distribution for flex containers.
//!
//! A distribution pass runs in two phases. Measure maps every child's
//! requested size onto the container's main and cross axes; position walks
//! the children in order, spreading the leftover main-axis space according
//! to `justify_content` and placing each child on the cross axis according
//! to `align_items`. The resulting slots are cached on the container, which
//! the resolver reads when a proportional child is resolved.
//!
//! Nothing is clamped. Overflowing children produce negative leftover space
//! and overlapping slots rather than an error.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::node::{Measurable, MeasurementMode, NodeKind, RequestedSize};
use crate::primitives::Rect;
use crate::resolve::resolve;
use crate::tree::{LayoutTree, NodeId};

// =========================================================================
// Style
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    /// Main axis is horizontal.
    #[default]
    Row,
    /// Main axis is vertical.
    Column,
}

/// Distribution of leftover space on the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Placement on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    Stretch,
}

/// Declared flex behavior of a container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlexStyle {
    pub direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    /// Pixels between adjacent children.
    pub gap: f32,
}

impl FlexStyle {
    pub fn row() -> Self {
        Self::default()
    }

    pub fn column() -> Self {
        Self {
            direction: FlexDirection::Column,
            ..Self::default()
        }
    }

    pub fn justify(mut self, justify_content: JustifyContent) -> Self {
        self.justify_content = justify_content;
        self
    }

    pub fn align(mut self, align_items: AlignItems) -> Self {
        self.align_items = align_items;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }
}

// =========================================================================
// Container + cache
// =========================================================================

/// Slots assigned by one distribution pass, in child order.
pub type FlexCache = IndexMap<NodeId, Rect>;

/// Flex payload of a node: its style and the cache of its last pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexContainer {
    style: FlexStyle,
    /// `None` until the first distribution pass.
    cache: Option<FlexCache>,
}

impl FlexContainer {
    pub fn new(style: FlexStyle) -> Self {
        Self { style, cache: None }
    }

    pub fn style(&self) -> &FlexStyle {
        &self.style
    }

    /// The slot assigned to `child`, if the last pass placed it.
    pub fn slot(&self, child: NodeId) -> Option<Rect> {
        self.cache.as_ref()?.get(&child).copied()
    }

    pub fn slots(&self) -> Option<&FlexCache> {
        self.cache.as_ref()
    }
}

// =========================================================================
// Algorithm
// =========================================================================

/// A child's extent along the container's axes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisSize {
    main: f32,
    cross: f32,
}

/// Measure phase for one child against the container's content rect.
fn measure(direction: FlexDirection, content: Rect, requested: Option<RequestedSize>) -> AxisSize {
    let (width, height) = match requested {
        None => (0.0, 0.0),
        Some(r) => match r.mode {
            MeasurementMode::Absolute => (r.width, r.height),
            MeasurementMode::Proportional => (content.width * r.width, content.height * r.height),
        },
    };
    match direction {
        FlexDirection::Row => AxisSize { main: width, cross: height },
        FlexDirection::Column => AxisSize { main: height, cross: width },
    }
}

/// Leading offset and extra spacing between children for `n` children
/// sharing `remaining` main-axis pixels.
pub fn justify_offsets(justify: JustifyContent, remaining: f32, n: usize) -> (f32, f32) {
    if n == 0 {
        return (0.0, 0.0);
    }
    let count = n as f32;
    match justify {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (remaining, 0.0),
        JustifyContent::Center => (remaining / 2.0, 0.0),
        JustifyContent::SpaceBetween => {
            if n > 1 { (0.0, remaining / (count - 1.0)) } else { (0.0, 0.0) }
        }
        JustifyContent::SpaceAround => (remaining / (2.0 * count), remaining / count),
        JustifyContent::SpaceEvenly => {
            let space = remaining / (count + 1.0);
            (space, space)
        }
    }
}

/// Cross-axis offset and final cross size of a child whose own cross size
/// is `own` inside `content_cross` pixels.
pub fn cross_placement(align: AlignItems, content_cross: f32, own: f32) -> (f32, f32) {
    match align {
        AlignItems::FlexStart => (0.0, own),
        AlignItems::FlexEnd => (content_cross - own, own),
        AlignItems::Center => ((content_cross - own) / 2.0, own),
        AlignItems::Stretch => (0.0, content_cross),
    }
}

/// Compute one slot per requested size inside `content`.
///
/// Pure function of its inputs; [`distribute`] wraps it with tree access
/// and caching.
pub fn layout_slots(style: &FlexStyle, content: Rect, requested: &[Option<RequestedSize>]) -> Vec<Rect> {
    let sizes: Vec<AxisSize> = requested
        .iter()
        .map(|&r| measure(style.direction, content, r))
        .collect();

    let n = sizes.len();
    let (content_main, content_cross) = match style.direction {
        FlexDirection::Row => (content.width, content.height),
        FlexDirection::Column => (content.height, content.width),
    };
    let total_main: f32 = sizes.iter().map(|s| s.main).sum();
    let total_gap = if n > 1 { style.gap * (n - 1) as f32 } else { 0.0 };
    let remaining = content_main - total_main - total_gap;

    if remaining < 0.0 {
        tracing::warn!(remaining, children = n, "flex children overflow their container");
    }

    let (start, between) = justify_offsets(style.justify_content, remaining, n);
    let mut cursor = start;
    let mut slots = Vec::with_capacity(n);

    for (i, size) in sizes.iter().enumerate() {
        let (cross_pos, cross_size) = cross_placement(style.align_items, content_cross, size.cross);
        let slot = match style.direction {
            FlexDirection::Row => {
                Rect::new(content.x + cursor, content.y + cross_pos, size.main, cross_size)
            }
            FlexDirection::Column => {
                Rect::new(content.x + cross_pos, content.y + cursor, cross_size, size.main)
            }
        };
        slots.push(slot);

        cursor += size.main + between;
        if i + 1 < n {
            cursor += style.gap;
        }
    }

    slots
}

/// Run a distribution pass on `container`, replacing its cache.
///
/// Does nothing for nodes that are not flex containers. Fails only when the
/// container's own rectangle cannot be resolved.
pub fn distribute(tree: &mut LayoutTree, container: NodeId, page: Option<Rect>) -> Result<(), LayoutError> {
    let node = &tree[container];
    let Some(flex) = node.as_flex() else {
        return Ok(());
    };
    let style = *flex.style();

    let content = resolve(tree, container, page)?.inset(node.padding);
    let children = node.children.clone();
    let requested: Vec<Option<RequestedSize>> = children
        .iter()
        .map(|&child| tree[child].requested_size())
        .collect();

    let slots = layout_slots(&style, content, &requested);
    tracing::debug!(
        %container,
        children = children.len(),
        ?style,
        "distributed flex container"
    );

    let cache: FlexCache = children.into_iter().zip(slots).collect();
    if let Some(NodeKind::Flex(flex)) = tree.get_mut(container).map(|n| &mut n.kind) {
        flex.cache = Some(cache);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs(width: f32, height: f32) -> Option<RequestedSize> {
        Some(RequestedSize {
            mode: MeasurementMode::Absolute,
            width,
            height,
        })
    }

    fn frac(width: f32, height: f32) -> Option<RequestedSize> {
        Some(RequestedSize {
            mode: MeasurementMode::Proportional,
            width,
            height,
        })
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    // =========================================================================
    // justify_offsets
    // =========================================================================

    #[test]
    fn justify_table() {
        assert_eq!(justify_offsets(JustifyContent::FlexStart, 90.0, 3), (0.0, 0.0));
        assert_eq!(justify_offsets(JustifyContent::FlexEnd, 90.0, 3), (90.0, 0.0));
        assert_eq!(justify_offsets(JustifyContent::Center, 90.0, 3), (45.0, 0.0));
        assert_eq!(justify_offsets(JustifyContent::SpaceBetween, 90.0, 3), (0.0, 45.0));
        assert_eq!(justify_offsets(JustifyContent::SpaceAround, 90.0, 3), (15.0, 30.0));
        assert_eq!(justify_offsets(JustifyContent::SpaceEvenly, 80.0, 3), (20.0, 20.0));
    }

    #[test]
    fn space_between_single_child_has_no_division() {
        assert_eq!(justify_offsets(JustifyContent::SpaceBetween, 300.0, 1), (0.0, 0.0));
    }

    #[test]
    fn justify_with_no_children_is_zero() {
        for mode in [JustifyContent::SpaceAround, JustifyContent::SpaceEvenly] {
            assert_eq!(justify_offsets(mode, 100.0, 0), (0.0, 0.0));
        }
    }

    // =========================================================================
    // cross_placement
    // =========================================================================

    #[test]
    fn cross_table() {
        assert_eq!(cross_placement(AlignItems::FlexStart, 100.0, 40.0), (0.0, 40.0));
        assert_eq!(cross_placement(AlignItems::FlexEnd, 100.0, 40.0), (60.0, 40.0));
        assert_eq!(cross_placement(AlignItems::Center, 100.0, 40.0), (30.0, 40.0));
        assert_eq!(cross_placement(AlignItems::Stretch, 100.0, 40.0), (0.0, 100.0));
    }

    // =========================================================================
    // layout_slots
    // =========================================================================

    #[test]
    fn row_with_gap() {
        let style = FlexStyle::row().gap(20.0);
        let slots = layout_slots(&style, Rect::new(0.0, 0.0, 400.0, 100.0), &[abs(100.0, 50.0), abs(100.0, 50.0)]);
        assert_eq!(slots[0], Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(slots[1], Rect::new(120.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn column_maps_main_axis_to_y() {
        let style = FlexStyle::column().justify(JustifyContent::FlexEnd).align(AlignItems::Center);
        let slots = layout_slots(&style, Rect::new(10.0, 20.0, 200.0, 300.0), &[abs(50.0, 100.0)]);
        assert_eq!(slots[0], Rect::new(10.0 + 75.0, 20.0 + 200.0, 50.0, 100.0));
    }

    #[test]
    fn proportional_children_scale_with_content() {
        let style = FlexStyle::row();
        let slots = layout_slots(&style, Rect::new(0.0, 0.0, 400.0, 200.0), &[frac(0.25, 0.5), frac(0.5, 1.0)]);
        assert_eq!(slots[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(slots[1], Rect::new(100.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn unmeasurable_children_take_no_space() {
        let style = FlexStyle::row().gap(10.0);
        let slots = layout_slots(&style, Rect::new(0.0, 0.0, 400.0, 100.0), &[abs(50.0, 50.0), None, abs(50.0, 50.0)]);
        assert_eq!(slots[1], Rect::new(60.0, 0.0, 0.0, 0.0));
        assert_eq!(slots[2].x, 70.0);
    }

    #[test]
    fn overflow_is_not_clamped() {
        let style = FlexStyle::row().justify(JustifyContent::Center);
        let slots = layout_slots(&style, Rect::new(0.0, 0.0, 100.0, 100.0), &[abs(300.0, 10.0)]);
        assert_eq!(slots[0].x, -100.0);
    }

    #[test]
    fn space_around_row() {
        let style = FlexStyle::row().justify(JustifyContent::SpaceAround);
        let slots = layout_slots(&style, Rect::new(0.0, 0.0, 400.0, 100.0), &[abs(100.0, 10.0), abs(100.0, 10.0)]);
        // remaining 200: start 50, between 100
        assert!(approx(slots[0].x, 50.0));
        assert!(approx(slots[1].x, 250.0));
    }

    #[test]
    fn empty_container_has_no_slots() {
        let slots = layout_slots(&FlexStyle::default(), Rect::new(0.0, 0.0, 10.0, 10.0), &[]);
        assert!(slots.is_empty());
    }
}
