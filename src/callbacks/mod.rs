//! Callback handlers for the floor plan editor.
//!
//! This module contains all UI callback implementations organized by functionality:
//! - `viewer` - Image upload, pan, zoom, rotate and reset in the transform viewer
//! - `records` - Record list selection and form submission

pub mod records;
pub mod viewer;

use crate::state::RecordStore;
use crate::utils::ImageCache;
use crate::viewer::TransformViewer;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared state captured by the callback closures.
#[derive(Clone)]
pub struct EditorHandles {
    pub store: Rc<RefCell<RecordStore>>,
    pub viewer: Rc<RefCell<TransformViewer>>,
    pub images: Rc<RefCell<ImageCache>>,
}
