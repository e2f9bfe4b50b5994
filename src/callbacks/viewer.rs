//! Transform viewer callbacks.
//!
//! Handles: browse for an image, pointer drag, wheel / button / slider zoom,
//! rotation, reset, and the pure layout callbacks used by the image and the
//! safe-zone overlay.

use crate::callbacks::EditorHandles;
use crate::state::{normalize_rotation, ImageTransform, Translation};
use crate::upload::{check_image_path, pick_image};
use crate::utils::{image_size, ImageCache};
use crate::viewer::render::RenderPlacement;
use crate::viewer::safe_zone::SafeZone;
use crate::viewer::TransformViewer;
use crate::{AppWindow, ImagePlacement, SafeZoneBands};
use kurbo::Size;
use slint::ComponentHandle;
use tracing::{info, warn};

/// Sets up all viewer-related callbacks on the UI.
///
/// # Arguments
/// * `ui` - The AppWindow instance
/// * `handles` - Shared store, viewer and image cache
/// * `safe_zone_margin` - Fraction of the viewport covered by each dimmed band
pub fn setup_viewer_callbacks(ui: &AppWindow, handles: EditorHandles, safe_zone_margin: f64) {
    setup_browse_image(ui, handles.clone());
    setup_pointer(ui, handles.clone());
    setup_zoom(ui, handles.clone());
    setup_rotate_and_reset(ui, handles);
    setup_layout(ui, safe_zone_margin);
}

/// Push the viewer's mirror into the window properties.
pub fn apply_transform(ui: &AppWindow, transform: &ImageTransform, images: &mut ImageCache) {
    match transform.image.as_ref() {
        Some(image) => {
            let decoded = images.load_or_placeholder(image);
            let (w, h) = image_size(&decoded);
            ui.set_image_source(decoded);
            ui.set_natural_width(w);
            ui.set_natural_height(h);
            ui.set_has_image(true);
        }
        None => {
            ui.set_image_source(slint::Image::default());
            ui.set_has_image(false);
        }
    }
    ui.set_view_zoom(transform.zoom);
    ui.set_view_rotation(normalize_rotation(transform.rotation));
    ui.set_pan_x(transform.translation.x);
    ui.set_pan_y(transform.translation.y);
}

/// Wraps a viewer operation so the window is refreshed when it changed
/// something.
fn viewer_action<A>(ui: &AppWindow, handles: &EditorHandles, action: A) -> impl Fn() + 'static
where
    A: Fn(&mut TransformViewer) -> bool + 'static,
{
    let ui_weak = ui.as_weak();
    let handles = handles.clone();
    move || {
        let changed = action(&mut *handles.viewer.borrow_mut());
        if changed {
            if let Some(ui) = ui_weak.upgrade() {
                apply_transform(
                    &ui,
                    handles.viewer.borrow().transform(),
                    &mut handles.images.borrow_mut(),
                );
            }
        }
    }
}

fn setup_browse_image(ui: &AppWindow, handles: EditorHandles) {
    let ui_weak = ui.as_weak();
    ui.on_browse_image(move || {
        if handles.viewer.borrow().has_image() {
            return;
        }
        let Some(path) = pick_image() else { return };

        let image = match check_image_path(&path) {
            Ok(image) => image,
            Err(e) => {
                warn!("Ignoring upload: {e}");
                return;
            }
        };
        // Decode once up front so a broken file never reaches the store.
        if let Err(e) = handles.images.borrow_mut().load(&image) {
            warn!("Ignoring upload: {e}");
            return;
        }

        info!(%image, "Floor plan image selected");
        if handles.viewer.borrow_mut().select_image(image) {
            if let Some(ui) = ui_weak.upgrade() {
                apply_transform(
                    &ui,
                    handles.viewer.borrow().transform(),
                    &mut handles.images.borrow_mut(),
                );
            }
        }
    });
}

fn setup_pointer(ui: &AppWindow, handles: EditorHandles) {
    let viewer = handles.viewer.clone();
    ui.on_pointer_down(move |x, y| {
        viewer.borrow_mut().begin_drag(x, y);
    });

    let moved = {
        let ui_weak = ui.as_weak();
        let handles = handles.clone();
        move |x: f32, y: f32| {
            let changed = handles.viewer.borrow_mut().drag_to(x, y);
            if changed {
                if let Some(ui) = ui_weak.upgrade() {
                    let translation = handles.viewer.borrow().transform().translation;
                    ui.set_pan_x(translation.x);
                    ui.set_pan_y(translation.y);
                }
            }
        }
    };
    ui.on_pointer_moved(moved);

    // Leaving the viewport ends a drag exactly like releasing the button.
    let viewer = handles.viewer.clone();
    ui.on_pointer_up(move || viewer.borrow_mut().end_drag());
    let viewer = handles.viewer;
    ui.on_pointer_left(move || viewer.borrow_mut().end_drag());
}

fn setup_zoom(ui: &AppWindow, handles: EditorHandles) {
    ui.on_zoom_out(viewer_action(ui, &handles, TransformViewer::zoom_out));
    ui.on_zoom_in(viewer_action(ui, &handles, TransformViewer::zoom_in));

    let ui_weak = ui.as_weak();
    let slider_handles = handles.clone();
    ui.on_zoom_slider(move |value| {
        let changed = slider_handles.viewer.borrow_mut().set_zoom(value);
        if let Some(ui) = ui_weak.upgrade() {
            // Snap the thumb back to the committed value even when unchanged.
            ui.set_view_zoom(slider_handles.viewer.borrow().transform().zoom);
            if changed {
                apply_transform(
                    &ui,
                    slider_handles.viewer.borrow().transform(),
                    &mut slider_handles.images.borrow_mut(),
                );
            }
        }
    });

    let ui_weak = ui.as_weak();
    ui.on_wheel_zoom(move |delta| {
        let changed = handles.viewer.borrow_mut().wheel(delta);
        if changed {
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_view_zoom(handles.viewer.borrow().transform().zoom);
            }
        }
    });
}

fn setup_rotate_and_reset(ui: &AppWindow, handles: EditorHandles) {
    ui.on_rotate_ccw(viewer_action(ui, &handles, TransformViewer::rotate_ccw));
    ui.on_rotate_cw(viewer_action(ui, &handles, TransformViewer::rotate_cw));
    ui.on_reset_view(viewer_action(ui, &handles, TransformViewer::reset));
}

fn setup_layout(ui: &AppWindow, safe_zone_margin: f64) {
    ui.on_image_placement(
        |container_w, container_h, image_w, image_h, zoom, rotation, pan_x, pan_y| {
            let transform = ImageTransform {
                image: None,
                zoom,
                rotation,
                translation: Translation::new(pan_x, pan_y),
            };
            let p = RenderPlacement::compute(
                &transform,
                Size::new(f64::from(container_w), f64::from(container_h)),
                Size::new(f64::from(image_w), f64::from(image_h)),
            );
            ImagePlacement {
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
                rotation: p.rotation,
            }
        },
    );

    ui.on_safe_zone(move |container_w, container_h| {
        let zone = SafeZone::compute(
            Size::new(f64::from(container_w), f64::from(container_h)),
            safe_zone_margin,
        );
        let [top, bottom, left, right] = zone.bands();
        SafeZoneBands {
            top: top.height() as f32,
            bottom: bottom.height() as f32,
            left: left.width() as f32,
            right: right.width() as f32,
        }
    });
}
