//! Interactive pan / zoom / rotate viewer for a floor plan image.
//!
//! The viewer is a controlled component: the record store owns the
//! authoritative [`ImageTransform`] and the viewer keeps a local mirror
//! for rendering. Two synchronization paths keep them consistent:
//! - outbound: every committed change is reported through `on_change`
//! - inbound: [`TransformViewer::sync`] overwrites the mirror, but only
//!   when the store's [`SyncToken`] differs from the last one seen

pub mod render;
pub mod safe_zone;

use crate::state::{ImageRef, ImageTransform, SyncToken, ZoomBounds, DEFAULT_ROTATION_STEP};
use std::fmt;
use tracing::debug;

/// Outbound setter invoked with the full transform after every change.
pub type ChangeHandler = Box<dyn FnMut(&ImageTransform)>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { last_x: f32, last_y: f32 },
}

pub struct TransformViewer {
    transform: ImageTransform,
    bounds: ZoomBounds,
    rotation_step: i32,
    drag: DragState,
    synced: Option<SyncToken>,
    on_change: ChangeHandler,
}

impl fmt::Debug for TransformViewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformViewer")
            .field("transform", &self.transform)
            .field("bounds", &self.bounds)
            .field("rotation_step", &self.rotation_step)
            .field("drag", &self.drag)
            .field("synced", &self.synced)
            .finish_non_exhaustive()
    }
}

impl TransformViewer {
    pub fn new(initial: ImageTransform, on_change: impl FnMut(&ImageTransform) + 'static) -> Self {
        Self {
            transform: initial,
            bounds: ZoomBounds::default(),
            rotation_step: DEFAULT_ROTATION_STEP,
            drag: DragState::Idle,
            synced: None,
            on_change: Box::new(on_change),
        }
    }

    pub fn with_bounds(mut self, bounds: ZoomBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Steps are taken modulo 360, so rotation stays within `(-360, 360)`.
    pub fn with_rotation_step(mut self, degrees: i32) -> Self {
        self.rotation_step = degrees.rem_euclid(360);
        self
    }

    pub fn transform(&self) -> &ImageTransform {
        &self.transform
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    pub fn has_image(&self) -> bool {
        self.transform.has_image()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Single commit point for local changes. Reports to the host only
    /// when the value actually differs.
    fn commit(&mut self, next: ImageTransform) -> bool {
        if next == self.transform {
            return false;
        }
        self.transform = next;
        (self.on_change)(&self.transform);
        true
    }

    /// Applies `edit` to a copy of the mirror when an image is present.
    fn adjust(&mut self, edit: impl FnOnce(&mut ImageTransform)) -> bool {
        if !self.has_image() {
            return false;
        }
        let mut next = self.transform.clone();
        edit(&mut next);
        self.commit(next)
    }

    /// Inbound sync. Overwrites the mirror with `config` and ends any drag
    /// when `token` has not been seen yet. Never reports back to the host.
    pub fn sync(&mut self, token: SyncToken, config: &ImageTransform) -> bool {
        if self.synced == Some(token) {
            return false;
        }
        debug!(?token, image = ?config.image, "Viewer resynchronized from store");
        self.synced = Some(token);
        self.transform = config.clone();
        self.drag = DragState::Idle;
        true
    }

    /// Sets the image when none is present. Zoom, rotation and translation
    /// are left as they were.
    pub fn select_image(&mut self, image: ImageRef) -> bool {
        if self.has_image() {
            return false;
        }
        let mut next = self.transform.clone();
        next.image = Some(image);
        self.commit(next)
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        if !self.has_image() || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.drag = DragState::Dragging {
            last_x: x,
            last_y: y,
        };
    }

    /// Adds the delta from the previous pointer position to the translation.
    pub fn drag_to(&mut self, x: f32, y: f32) -> bool {
        let DragState::Dragging { last_x, last_y } = self.drag else {
            return false;
        };
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.drag = DragState::Dragging {
            last_x: x,
            last_y: y,
        };
        self.adjust(|t| t.translation = t.translation.offset_by(x - last_x, y - last_y))
    }

    /// Pointer released or left the viewport.
    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn zoom_out(&mut self) -> bool {
        let bounds = self.bounds;
        self.adjust(|t| t.zoom = bounds.decrement(t.zoom))
    }

    pub fn zoom_in(&mut self) -> bool {
        let bounds = self.bounds;
        self.adjust(|t| t.zoom = bounds.increment(t.zoom))
    }

    /// Slider position.
    pub fn set_zoom(&mut self, value: f32) -> bool {
        let bounds = self.bounds;
        self.adjust(|t| t.zoom = bounds.slider(value))
    }

    /// Mouse wheel. Scrolling up zooms in by one step, down zooms out.
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        if delta_y > 0.0 {
            self.zoom_in()
        } else if delta_y < 0.0 {
            self.zoom_out()
        } else {
            false
        }
    }

    pub fn rotate_ccw(&mut self) -> bool {
        let step = self.rotation_step;
        self.adjust(|t| t.rotation = (t.rotation - step) % 360)
    }

    pub fn rotate_cw(&mut self) -> bool {
        let step = self.rotation_step;
        self.adjust(|t| t.rotation = (t.rotation + step) % 360)
    }

    pub fn reset(&mut self) -> bool {
        self.adjust(|t| *t = t.reset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{normalize_rotation, Translation};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn with_image(zoom: f32, rotation: i32, x: f32, y: f32) -> ImageTransform {
        ImageTransform {
            image: Some(ImageRef::new("plan.png")),
            zoom,
            rotation,
            translation: Translation::new(x, y),
        }
    }

    /// Viewer whose outbound updates are collected in the returned log.
    fn recording(initial: ImageTransform) -> (TransformViewer, Rc<RefCell<Vec<ImageTransform>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let viewer = TransformViewer::new(initial, move |t| sink.borrow_mut().push(t.clone()));
        (viewer, log)
    }

    #[test]
    fn test_drag_accumulates_incremental_deltas() {
        let (mut viewer, log) = recording(with_image(1.0, 0, 10.0, -4.0));
        viewer.begin_drag(100.0, 100.0);
        viewer.drag_to(103.0, 98.0);
        viewer.drag_to(110.0, 90.0);
        viewer.drag_to(95.0, 120.0);
        viewer.end_drag();

        assert_eq!(viewer.transform().translation, Translation::new(5.0, 16.0));
        assert_eq!(log.borrow().len(), 3);
        assert!(!viewer.is_dragging());
        assert!(!viewer.drag_to(0.0, 0.0));
    }

    #[test]
    fn test_huge_rotation_step_wraps_instead_of_overflowing() {
        let (viewer, _) = recording(with_image(1.0, 0, 0.0, 0.0));
        let mut viewer = viewer.with_rotation_step(i32::MAX);
        for _ in 0..4 {
            viewer.rotate_cw();
        }
        viewer.rotate_ccw();
        let expected = (3 * i64::from(i32::MAX)).rem_euclid(360) as i32;
        assert_eq!(normalize_rotation(viewer.transform().rotation), expected);
        assert!(viewer.transform().rotation.abs() < 360);
    }

    #[test]
    fn test_drag_without_image_is_ignored() {
        let (mut viewer, log) = recording(ImageTransform::default());
        viewer.begin_drag(0.0, 0.0);
        assert!(!viewer.is_dragging());
        viewer.drag_to(50.0, 50.0);
        assert_eq!(viewer.transform().translation, Translation::ZERO);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_zoom_controls_share_bounds() {
        let (mut viewer, _) = recording(with_image(4.7, 0, 0.0, 0.0));
        for _ in 0..10 {
            viewer.zoom_in();
        }
        assert!(viewer.transform().zoom < viewer.bounds().max());
        assert!((viewer.transform().zoom - 4.9).abs() < 1e-4);

        viewer.set_zoom(0.0);
        assert_eq!(viewer.transform().zoom, 0.1);
        viewer.zoom_out();
        assert_eq!(viewer.transform().zoom, 0.1);

        viewer.wheel(1.0);
        assert!((viewer.transform().zoom - 0.2).abs() < 1e-5);
        viewer.wheel(-1.0);
        assert!((viewer.transform().zoom - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_wraps() {
        let (mut viewer, _) = recording(with_image(1.0, 0, 0.0, 0.0));
        viewer.rotate_ccw();
        assert_eq!(viewer.transform().rotation, -45);
        assert_eq!(normalize_rotation(viewer.transform().rotation), 315);
        for _ in 0..9 {
            viewer.rotate_cw();
        }
        assert_eq!(normalize_rotation(viewer.transform().rotation), 0);
    }

    #[test]
    fn test_reset_restores_defaults_and_keeps_image() {
        let (mut viewer, log) = recording(with_image(3.4, 225, 40.0, -12.0));
        assert!(viewer.reset());
        assert_eq!(viewer.transform(), &with_image(1.0, 0, 0.0, 0.0));
        assert_eq!(log.borrow().len(), 1);
        assert!(!viewer.reset());
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_controls_without_image_change_nothing() {
        let start = ImageTransform {
            image: None,
            zoom: 2.0,
            rotation: 90,
            translation: Translation::new(3.0, 3.0),
        };
        let (mut viewer, log) = recording(start.clone());
        viewer.zoom_in();
        viewer.zoom_out();
        viewer.set_zoom(4.0);
        viewer.wheel(1.0);
        viewer.rotate_cw();
        viewer.rotate_ccw();
        viewer.reset();
        assert_eq!(viewer.transform(), &start);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_select_image_keeps_positioning_and_only_once() {
        let start = ImageTransform {
            image: None,
            zoom: 2.0,
            rotation: 90,
            translation: Translation::new(3.0, 3.0),
        };
        let (mut viewer, log) = recording(start);
        assert!(viewer.select_image(ImageRef::new("first.png")));
        assert_eq!(viewer.transform().zoom, 2.0);
        assert_eq!(viewer.transform().rotation, 90);
        assert!(!viewer.select_image(ImageRef::new("second.png")));
        assert_eq!(
            viewer.transform().image,
            Some(ImageRef::new("first.png"))
        );
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_sync_only_on_new_token() {
        let (mut viewer, log) = recording(ImageTransform::default());
        let first = SyncToken::default();
        assert!(viewer.sync(first, &with_image(2.0, 90, 5.0, 5.0)));
        viewer.zoom_in();
        let edited = viewer.transform().clone();

        // The round-tripped value arrives with the same token: no reset.
        assert!(!viewer.sync(first, &with_image(2.0, 90, 5.0, 5.0)));
        assert_eq!(viewer.transform(), &edited);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_sync_cancels_drag() {
        let (mut viewer, _) = recording(with_image(1.0, 0, 0.0, 0.0));
        viewer.begin_drag(1.0, 1.0);
        let mut store = crate::state::RecordStore::new();
        store.select(crate::state::Selection::New);
        viewer.sync(store.sync_token(), store.editing());
        assert!(!viewer.is_dragging());
        assert!(!viewer.has_image());
    }
}
