//! Floor plan editor: a record list, an edit form, and an interactive
//! pan / zoom / rotate viewer for each plan's image.

slint::include_modules!();

pub mod callbacks;
pub mod config;
pub mod scroll;
pub mod state;
pub mod upload;
pub mod utils;
pub mod viewer;

use crate::callbacks::records::{install_form_options, sync_viewer, PlanList};
use crate::callbacks::EditorHandles;
use crate::scroll::ScrollLock;
use crate::state::{BoundsError, RecordStore};
use crate::utils::ImageCache;
use crate::viewer::TransformViewer;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("UI platform error: {0}")]
    Platform(#[from] slint::PlatformError),
    #[error("invalid viewer configuration: {0}")]
    Bounds(#[from] BoundsError),
}

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build the shared editor state with the viewer reporting into the store.
pub fn build_handles(viewer_config: &config::ViewerConfig) -> Result<EditorHandles, BoundsError> {
    let bounds = viewer_config.zoom_bounds()?;
    let store = Rc::new(RefCell::new(RecordStore::new()));
    let initial = store.borrow().editing().clone();
    let sink = store.clone();
    let viewer = TransformViewer::new(initial, move |transform| {
        sink.borrow_mut().set_editing(transform.clone());
    })
    .with_bounds(bounds)
    .with_rotation_step(viewer_config.rotation_step);

    Ok(EditorHandles {
        store,
        viewer: Rc::new(RefCell::new(viewer)),
        images: Rc::new(RefCell::new(ImageCache::new())),
    })
}

/// Wire every callback onto `ui` and bring it in line with the store.
pub fn install(ui: &AppWindow, handles: &EditorHandles, viewer_config: &config::ViewerConfig) {
    let bounds = handles.viewer.borrow().bounds();
    ui.set_zoom_min(bounds.min());
    ui.set_zoom_max(bounds.max());
    ui.set_zoom_step(bounds.step());
    install_form_options(ui);

    let list = PlanList::new(ui);
    callbacks::viewer::setup_viewer_callbacks(ui, handles.clone(), viewer_config.safe_zone_margin);
    callbacks::records::setup_record_callbacks(ui, handles.clone(), list.clone());

    sync_viewer(ui, handles);
    list.refresh(ui, handles);
}

pub fn run() -> Result<(), AppError> {
    init_tracing();
    let config = config::load_config();
    let handles = build_handles(&config.viewer)?;

    let ui = AppWindow::new()?;
    ui.set_dark_theme(config.appearance.is_dark());
    install(&ui, &handles, &config.viewer);

    info!("Floor plan editor started");
    let _scroll_lock = ScrollLock::for_window(&ui);
    ui.run()?;
    Ok(())
}
