//! Image placement inside a resolved frame.

use folio_layout::{HAlign, ImageFit, Rect, Size, VAlign};

fn h_factor(align: HAlign) -> f32 {
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => 0.5,
        HAlign::Right => 1.0,
    }
}

fn v_factor(align: VAlign) -> f32 {
    match align {
        VAlign::Top => 0.0,
        VAlign::Center => 0.5,
        VAlign::Bottom => 1.0,
    }
}

/// Where an image of `intrinsic` size lands inside `frame`.
///
/// `Contain` scales the image to fit inside the frame; `Cover` scales it to
/// fill the frame and overflows on one axis. Leftover (or overflowing)
/// space is split by the alignment hints, centered when absent. An image
/// with a zero dimension fills the frame.
pub fn place_image(
    frame: Rect,
    intrinsic: Size,
    fit: ImageFit,
    h_align: Option<HAlign>,
    v_align: Option<VAlign>,
) -> Rect {
    if intrinsic.width <= 0.0 || intrinsic.height <= 0.0 {
        return frame;
    }

    let sx = frame.width / intrinsic.width;
    let sy = frame.height / intrinsic.height;
    let scale = match fit {
        ImageFit::Contain => sx.min(sy),
        ImageFit::Cover => sx.max(sy),
    };
    let width = intrinsic.width * scale;
    let height = intrinsic.height * scale;

    Rect {
        x: frame.x + (frame.width - width) * h_factor(h_align.unwrap_or_default()),
        y: frame.y + (frame.height - height) * v_factor(v_align.unwrap_or_default()),
        width,
        height,
    }
}
