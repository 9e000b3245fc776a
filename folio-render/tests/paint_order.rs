//! Paint traversal against the recording renderer and a custom backend.

use std::cell::RefCell;

use folio_layout::{
    AlignItems, Color, FlexStyle, Geometry, ImageContent, LayoutError, LayoutNode, LayoutTree,
    Point, Rect, TextContent, VerticalAlign,
};
use folio_render::{
    DrawCommand, Margins, PageSetup, RecordingRenderer, RenderError, Renderer, TextStyle, paint,
};

fn op(command: &DrawCommand) -> &'static str {
    match command {
        DrawCommand::Image { .. } => "image",
        DrawCommand::Border { .. } => "border",
        DrawCommand::Text { .. } => "text",
    }
}

fn page_at_origin() -> PageSetup {
    PageSetup::letter().margins(Margins::all(0.0))
}

#[test]
fn paints_image_children_border_text_in_order() {
    let mut tree = LayoutTree::new();
    let root = tree
        .insert(
            LayoutNode::container(Geometry::absolute(0.0, 0.0, 300.0, 200.0))
                .border(2.0, Color::BLACK),
        )
        .unwrap();
    tree.add_child(
        root,
        LayoutNode::image(
            Geometry::absolute(0.0, 0.0, 300.0, 100.0),
            ImageContent::new("hero.png"),
        )
        .border(1.0, Color::GRAY),
    )
    .unwrap();
    tree.add_child(
        root,
        LayoutNode::text(
            Geometry::absolute(0.0, 100.0, 300.0, 100.0),
            TextContent::new("hello").font_size(10.0),
        )
        .border(1.0, Color::GRAY),
    )
    .unwrap();

    let mut renderer = RecordingRenderer::new(page_at_origin());
    paint(&mut tree, root, &mut renderer).unwrap();

    let ops: Vec<_> = renderer.commands().iter().map(op).collect();
    assert_eq!(ops, vec!["image", "border", "border", "text", "border"]);

    match renderer.commands().last() {
        Some(DrawCommand::Border { rect, width, .. }) => {
            assert_eq!(*rect, Rect::new(0.0, 0.0, 300.0, 200.0));
            assert_eq!(*width, 2.0);
        }
        other => panic!("expected the root border last, got {other:?}"),
    }
}

#[test]
fn text_paints_above_descendants() {
    let mut tree = LayoutTree::new();
    let label = tree
        .insert(LayoutNode::text(
            Geometry::absolute(0.0, 0.0, 100.0, 100.0),
            TextContent::new("caption"),
        ))
        .unwrap();
    tree.add_child(
        label,
        LayoutNode::image(
            Geometry::absolute(0.0, 0.0, 100.0, 100.0),
            ImageContent::new("bg.png"),
        ),
    )
    .unwrap();

    let mut renderer = RecordingRenderer::new(page_at_origin());
    paint(&mut tree, label, &mut renderer).unwrap();

    let ops: Vec<_> = renderer.commands().iter().map(op).collect();
    assert_eq!(ops, vec!["image", "text"]);
}

#[test]
fn zero_width_border_is_not_drawn() {
    let mut tree = LayoutTree::new();
    let root = tree
        .insert(
            LayoutNode::container(Geometry::absolute(0.0, 0.0, 10.0, 10.0)).border(0.0, Color::BLACK),
        )
        .unwrap();

    let mut renderer = RecordingRenderer::new(page_at_origin());
    paint(&mut tree, root, &mut renderer).unwrap();
    assert!(renderer.commands().is_empty());
}

#[test]
fn bottom_aligned_text_is_shifted_by_block_height() {
    let mut tree = LayoutTree::new();
    let text = tree
        .insert(
            LayoutNode::text(
                Geometry::absolute(0.0, 100.0, 300.0, 100.0),
                TextContent::new("hello")
                    .font_size(10.0)
                    .vertical_align(VerticalAlign::Bottom),
            )
            .padding(4.0),
        )
        .unwrap();

    let mut renderer = RecordingRenderer::new(page_at_origin());
    paint(&mut tree, text, &mut renderer).unwrap();

    match &renderer.commands()[0] {
        DrawCommand::Text { origin, width, .. } => {
            // one 12px line, anchored at the bottom inset edge (196)
            assert_eq!(origin.x, 4.0);
            assert!((origin.y - 184.0).abs() < 0.01);
            assert_eq!(*width, 292.0);
        }
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn flex_row_images_are_painted_at_their_slots() {
    let mut tree = LayoutTree::new();
    let row = tree
        .insert(LayoutNode::flex(
            Geometry::absolute(0.0, 0.0, 400.0, 100.0),
            FlexStyle::row().gap(20.0),
        ))
        .unwrap();
    for source in ["a.png", "b.png"] {
        tree.add_child(
            row,
            LayoutNode::image(Geometry::absolute(0.0, 0.0, 100.0, 50.0), ImageContent::new(source)),
        )
        .unwrap();
    }

    let mut renderer = RecordingRenderer::new(page_at_origin());
    paint(&mut tree, row, &mut renderer).unwrap();

    let frames: Vec<Rect> = renderer
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Image { frame, .. } => Some(*frame),
            _ => None,
        })
        .collect();
    assert_eq!(
        frames,
        vec![Rect::new(0.0, 0.0, 100.0, 50.0), Rect::new(120.0, 0.0, 100.0, 50.0)]
    );
}

/// Backend with a fixed block height that logs measurement widths.
struct FixedMetrics {
    block_height: f32,
    measured_widths: RefCell<Vec<f32>>,
    origins: Vec<Point>,
}

impl Renderer for FixedMetrics {
    fn page_content_rect(&self) -> Rect {
        Rect::new(50.0, 50.0, 500.0, 700.0)
    }

    fn measure_text_block_height(&self, _text: &str, width: f32, _style: &TextStyle) -> f32 {
        self.measured_widths.borrow_mut().push(width);
        self.block_height
    }

    fn draw_image(&mut self, _image: &ImageContent, _frame: Rect) {}

    fn draw_border(&mut self, _rect: Rect, _width: f32, _color: Color) {}

    fn draw_text(&mut self, _text: &str, origin: Point, _style: &TextStyle) {
        self.origins.push(origin);
    }
}

#[test]
fn flex_laid_out_text_is_measured_inside_padding() {
    let mut tree = LayoutTree::new();
    let row = tree
        .insert(LayoutNode::flex(
            Geometry::proportional(0.0, 0.0, 1.0, 0.2).unwrap(),
            FlexStyle::row().align(AlignItems::Stretch),
        ))
        .unwrap();
    tree.add_child(
        row,
        LayoutNode::text(
            Geometry::proportional(0.0, 0.0, 0.5, 0.0).unwrap(),
            TextContent::new("left"),
        )
        .padding(10.0),
    )
    .unwrap();
    tree.add_child(
        row,
        LayoutNode::text(
            Geometry::proportional(0.0, 0.0, 0.5, 0.0).unwrap(),
            TextContent::new("right").vertical_align(VerticalAlign::Top),
        )
        .padding(10.0),
    )
    .unwrap();

    let mut renderer = FixedMetrics {
        block_height: 20.0,
        measured_widths: RefCell::new(Vec::new()),
        origins: Vec::new(),
    };
    paint(&mut tree, row, &mut renderer).unwrap();

    // Row is 500x140 at (50, 50); each child slot is 250 wide and stretched
    // to 140 tall.
    assert_eq!(*renderer.measured_widths.borrow(), vec![230.0, 230.0]);
    assert_eq!(renderer.origins[0], Point::new(60.0, 50.0 + 70.0 - 10.0));
    assert_eq!(renderer.origins[1], Point::new(310.0, 60.0));
}

#[test]
fn painting_a_flex_child_alone_reports_missing_distribution() {
    let mut tree = LayoutTree::new();
    let row = tree
        .insert(LayoutNode::flex(
            Geometry::absolute(0.0, 0.0, 100.0, 100.0),
            FlexStyle::row(),
        ))
        .unwrap();
    let child = tree
        .add_child(
            row,
            LayoutNode::container(Geometry::proportional(0.0, 0.0, 1.0, 1.0).unwrap()),
        )
        .unwrap();

    let mut renderer = RecordingRenderer::new(page_at_origin());
    let err = paint(&mut tree, child, &mut renderer).unwrap_err();
    assert!(matches!(
        err,
        RenderError::Layout(LayoutError::LayoutNotComputed { .. })
    ));
}

#[test]
fn display_list_serializes() {
    let mut tree = LayoutTree::new();
    let root = tree
        .insert(
            LayoutNode::container(Geometry::absolute(0.0, 0.0, 10.0, 10.0)).border(1.0, Color::BLACK),
        )
        .unwrap();
    let mut renderer = RecordingRenderer::new(page_at_origin());
    paint(&mut tree, root, &mut renderer).unwrap();

    let json = serde_json::to_value(renderer.commands()).unwrap();
    assert_eq!(json[0]["op"], "border");
    assert_eq!(json[0]["width"], 1.0);
}
