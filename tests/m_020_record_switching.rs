// M-020: Switching records swaps the viewer state completely
// Test: Start with two saved plans (image paths from the command line) and switch between them
// Expected: Each selection shows exactly its saved image and positioning; unsaved edits are dropped

use floorplanner::config::ViewerConfig;
use floorplanner::state::{
    ExteriorType, FacingDirection, FloorType, ImageRef, ImageTransform, RecordFields, Selection,
    Translation,
};
use floorplanner::{build_handles, init_tracing, install, AppWindow};
use slint::ComponentHandle;

fn seed(name: &str, floor_type: FloorType) -> RecordFields {
    RecordFields {
        name: name.into(),
        interior_size: "800 sqft".into(),
        exterior_size: "60 sqft".into(),
        exterior_type: ExteriorType::Juliette,
        facing: FacingDirection::West,
        floor_type,
    }
}

fn main() -> Result<(), floorplanner::AppError> {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();
    let (Some(first), Some(second)) = (args.get(1), args.get(2)) else {
        eprintln!("usage: m_020_record_switching <image-a> <image-b>");
        return Ok(());
    };

    let viewer_config = ViewerConfig::default();
    let handles = build_handles(&viewer_config)?;
    {
        let mut store = handles.store.borrow_mut();
        store.set_editing(ImageTransform {
            image: Some(ImageRef::new(first)),
            zoom: 2.0,
            rotation: 90,
            translation: Translation::new(5.0, 5.0),
        });
        store.save(seed("A", FloorType::Studio));
        store.select(Selection::New);
        store.set_editing(ImageTransform {
            image: Some(ImageRef::new(second)),
            ..ImageTransform::default()
        });
        store.save(seed("B", FloorType::TwoBedOneBath));
        store.select(Selection::Saved(0));
    }

    let ui = AppWindow::new()?;
    install(&ui, &handles, &viewer_config);

    println!("=== M-020: Record Switching ===");
    println!("Instructions:");
    println!("1. Plan A is selected: VERIFY image A at zoom 2, rotated 90 degrees, shifted 5px");
    println!("2. Select plan B: VERIFY image B centred, zoom 1, no rotation");
    println!("3. Drag and zoom B without saving, then select A and B again");
    println!("4. VERIFY B is back at its saved state and nothing from A leaked into it");
    println!("5. Click '+': VERIFY the viewer asks for an upload and the form is blank");
    println!("==============================");

    ui.run()?;
    Ok(())
}
