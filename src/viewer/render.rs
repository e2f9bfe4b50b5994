//! Placement of the transformed image inside the viewport.

use crate::state::{normalize_rotation, ImageTransform};
use kurbo::{Affine, Size, Vec2};

/// Where the image element goes in viewport coordinates. The element is
/// rotated by `rotation` degrees about its own centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

/// Size of `image` at zoom 1: scaled down to fit inside `container`,
/// never scaled up.
pub fn base_size(container: Size, image: Size) -> Size {
    if image.width <= 0.0 || image.height <= 0.0 {
        return Size::ZERO;
    }
    let fit = (container.width / image.width)
        .min(container.height / image.height)
        .min(1.0)
        .max(0.0);
    image * fit
}

/// Composed transform about the viewport centre: translate, then rotate,
/// then scale.
pub fn composed(transform: &ImageTransform, container: Size) -> Affine {
    let centre = container.to_rect().center().to_vec2();
    let translation = Vec2::new(
        f64::from(transform.translation.x),
        f64::from(transform.translation.y),
    );
    let angle = f64::from(normalize_rotation(transform.rotation)).to_radians();
    Affine::translate(centre + translation)
        * Affine::rotate(angle)
        * Affine::scale(f64::from(transform.zoom))
        * Affine::translate(-centre)
}

impl RenderPlacement {
    pub fn compute(transform: &ImageTransform, container: Size, image: Size) -> Self {
        let base = base_size(container, image);
        let size = base * f64::from(transform.zoom);
        // Uniform scale and rotation both act about the centre, so the
        // element's centre only moves by the translation.
        let centre = composed(transform, container) * container.to_rect().center();
        let origin = centre - size.to_vec2() / 2.0;
        Self {
            x: origin.x as f32,
            y: origin.y as f32,
            width: size.width as f32,
            height: size.height as f32,
            rotation: normalize_rotation(transform.rotation) as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ImageRef, Translation};
    use kurbo::Point;

    fn transform(zoom: f32, rotation: i32, x: f32, y: f32) -> ImageTransform {
        ImageTransform {
            image: Some(ImageRef::new("plan.png")),
            zoom,
            rotation,
            translation: Translation::new(x, y),
        }
    }

    fn centre(p: &RenderPlacement) -> Point {
        Point::new(
            f64::from(p.x + p.width / 2.0),
            f64::from(p.y + p.height / 2.0),
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_base_size_fits_without_upscaling() {
        let container = Size::new(400.0, 300.0);
        assert_eq!(base_size(container, Size::new(800.0, 300.0)), Size::new(400.0, 150.0));
        assert_eq!(base_size(container, Size::new(100.0, 50.0)), Size::new(100.0, 50.0));
        assert_eq!(base_size(container, Size::ZERO), Size::ZERO);
    }

    #[test]
    fn test_identity_placement_is_centred() {
        let p = RenderPlacement::compute(
            &transform(1.0, 0, 0.0, 0.0),
            Size::new(400.0, 300.0),
            Size::new(200.0, 100.0),
        );
        assert_eq!((p.x, p.y, p.width, p.height), (100.0, 100.0, 200.0, 100.0));
    }

    #[test]
    fn test_translation_moves_centre_and_zoom_scales() {
        let p = RenderPlacement::compute(
            &transform(2.0, -90, 30.0, -10.0),
            Size::new(400.0, 300.0),
            Size::new(200.0, 100.0),
        );
        assert_eq!((p.width, p.height), (400.0, 200.0));
        assert_eq!(p.rotation, 270.0);
        let c = centre(&p);
        assert!(close(c.x, 230.0) && close(c.y, 140.0));
    }

    #[test]
    fn test_composed_order_is_translate_rotate_scale() {
        let container = Size::new(200.0, 200.0);
        let affine = composed(&transform(2.0, 90, 10.0, 0.0), container);
        // A point 10px right of centre: scaled to 20px, rotated to point
        // down, then shifted 10px right.
        let p = affine * Point::new(110.0, 100.0);
        assert!(close(p.x, 110.0), "{p:?}");
        assert!(close(p.y, 120.0), "{p:?}");
    }
}
