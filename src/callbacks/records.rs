//! Record list and form callbacks.
//!
//! Handles: selecting a saved floor plan, starting a new one, and saving the
//! form. Every selection swaps the store's transform, which the viewer then
//! picks up through its sync token.

use crate::callbacks::viewer::apply_transform;
use crate::callbacks::EditorHandles;
use crate::state::{
    Choice, ExteriorType, FacingDirection, FloorPlanRecord, FloorType, RecordDraft, Selection,
};
use crate::{AppWindow, PlanItem};
use slint::{ComponentHandle, Model, ModelRc, SharedString, VecModel};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

/// Sidebar model plus the record slice it was last built from.
pub struct PlanList {
    model: Rc<VecModel<PlanItem>>,
    built_from: RefCell<Option<Rc<[FloorPlanRecord]>>>,
}

impl PlanList {
    pub fn new(ui: &AppWindow) -> Rc<Self> {
        let model = Rc::new(VecModel::from(Vec::<PlanItem>::new()));
        ui.set_plans(model.clone().into());
        Rc::new(Self {
            model,
            built_from: RefCell::new(None),
        })
    }

    /// Rebuilds rows when the record slice was replaced, then marks the
    /// selected row.
    pub fn refresh(&self, ui: &AppWindow, handles: &EditorHandles) {
        let store = handles.store.borrow();
        let records = store.records();
        let stale = self
            .built_from
            .borrow()
            .as_ref()
            .is_none_or(|built| !Rc::ptr_eq(built, &records));

        if stale {
            let mut images = handles.images.borrow_mut();
            let rows: Vec<PlanItem> = records
                .iter()
                .map(|record| PlanItem {
                    name: record.fields.name.as_str().into(),
                    thumbnail: record
                        .transform
                        .image
                        .as_ref()
                        .map(|image| images.load_or_placeholder(image))
                        .unwrap_or_default(),
                    has_image: record.transform.has_image(),
                    selected: false,
                })
                .collect();
            self.model.set_vec(rows);
            debug!(count = records.len(), "Rebuilt floor plan list");
            *self.built_from.borrow_mut() = Some(records);
        }

        let selection = store.selection();
        for i in 0..self.model.row_count() {
            let Some(mut row) = self.model.row_data(i) else { continue };
            let selected = selection == Selection::Saved(i);
            if row.selected != selected {
                row.selected = selected;
                self.model.set_row_data(i, row);
            }
        }
        ui.set_new_selected(selection == Selection::New);
    }
}

fn options<C: Choice>() -> ModelRc<SharedString> {
    let labels: Vec<SharedString> = C::option_labels().into_iter().map(Into::into).collect();
    ModelRc::new(VecModel::from(labels))
}

/// Fill the drop-down option lists.
pub fn install_form_options(ui: &AppWindow) {
    ui.set_exterior_type_options(options::<ExteriorType>());
    ui.set_facing_options(options::<FacingDirection>());
    ui.set_floor_type_options(options::<FloorType>());
}

pub fn write_form(ui: &AppWindow, draft: &RecordDraft) {
    ui.set_name_text(draft.name.as_str().into());
    ui.set_interior_text(draft.interior_size.as_str().into());
    ui.set_exterior_text(draft.exterior_size.as_str().into());
    ui.set_exterior_type_index(ExteriorType::option_index(draft.exterior_type));
    ui.set_facing_index(FacingDirection::option_index(draft.facing));
    ui.set_floor_type_index(FloorType::option_index(draft.floor_type));
}

pub fn read_form(ui: &AppWindow) -> RecordDraft {
    RecordDraft {
        name: ui.get_name_text().to_string(),
        interior_size: ui.get_interior_text().to_string(),
        exterior_size: ui.get_exterior_text().to_string(),
        exterior_type: ExteriorType::from_option_index(ui.get_exterior_type_index()),
        facing: FacingDirection::from_option_index(ui.get_facing_index()),
        floor_type: FloorType::from_option_index(ui.get_floor_type_index()),
    }
}

/// Inbound sync: hand the store's transform to the viewer if the store
/// swapped it since the viewer last looked.
pub fn sync_viewer(ui: &AppWindow, handles: &EditorHandles) {
    let (token, config) = {
        let store = handles.store.borrow();
        (store.sync_token(), store.editing().clone())
    };
    if handles.viewer.borrow_mut().sync(token, &config) {
        apply_transform(
            ui,
            handles.viewer.borrow().transform(),
            &mut handles.images.borrow_mut(),
        );
    }
}

/// Sets up record list and form callbacks on the UI.
///
/// # Arguments
/// * `ui` - The AppWindow instance
/// * `handles` - Shared store, viewer and image cache
/// * `list` - Sidebar model kept in step with the store
pub fn setup_record_callbacks(ui: &AppWindow, handles: EditorHandles, list: Rc<PlanList>) {
    setup_select_plan(ui, handles.clone(), list.clone());
    setup_new_plan(ui, handles.clone(), list.clone());
    setup_save_plan(ui, handles, list);
}

fn switch_to(ui: &AppWindow, handles: &EditorHandles, list: &PlanList, selection: Selection) {
    if !handles.store.borrow_mut().select(selection) {
        return;
    }
    let draft = handles.store.borrow().draft_for_selection();
    write_form(ui, &draft);
    sync_viewer(ui, handles);
    list.refresh(ui, handles);
    ui.set_status_text(SharedString::new());
}

fn setup_select_plan(ui: &AppWindow, handles: EditorHandles, list: Rc<PlanList>) {
    let ui_weak = ui.as_weak();
    ui.on_select_plan(move |index| {
        let Ok(index) = usize::try_from(index) else { return };
        if let Some(ui) = ui_weak.upgrade() {
            switch_to(&ui, &handles, &list, Selection::Saved(index));
        }
    });
}

fn setup_new_plan(ui: &AppWindow, handles: EditorHandles, list: Rc<PlanList>) {
    let ui_weak = ui.as_weak();
    ui.on_new_plan(move || {
        if let Some(ui) = ui_weak.upgrade() {
            switch_to(&ui, &handles, &list, Selection::New);
        }
    });
}

fn setup_save_plan(ui: &AppWindow, handles: EditorHandles, list: Rc<PlanList>) {
    let ui_weak = ui.as_weak();
    ui.on_save_plan(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let draft = read_form(&ui);
        let validated = draft.validate(handles.store.borrow().editing());
        match validated {
            Ok(fields) => {
                let name = fields.name.clone();
                let index = handles.store.borrow_mut().save(fields);
                list.refresh(&ui, &handles);
                write_form(&ui, &handles.store.borrow().draft_for_selection());
                info!(index, %name, "Floor plan saved");
                ui.set_status_text(format!("Saved floor plan '{name}'").into());
            }
            Err(e) => {
                ui.set_status_text(format!("Cannot save: {e}").into());
            }
        }
    });
}
