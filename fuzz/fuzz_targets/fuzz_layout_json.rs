#![no_main]

use dgrid_core::GridItem;
use dgrid_layout::{EngineConfig, LayoutEngine, validate_layout};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the decoder or the engine.
    let Ok(items) = serde_json::from_slice::<Vec<GridItem>>(data) else {
        return;
    };
    if items.len() > 64 || items.iter().any(|i| i.bottom() > 1 << 10 || i.x > 1 << 10) {
        return;
    }
    let valid = validate_layout(&items).is_ok();
    match LayoutEngine::new(items, EngineConfig::default()) {
        Ok(mut engine) => {
            assert!(valid, "engine accepted an invalid layout");
            let update = engine.compact();
            let _ = update.net_changes();
            let encoded = serde_json::to_vec(engine.items()).expect("items serialize");
            let decoded: Vec<GridItem> =
                serde_json::from_slice(&encoded).expect("items decode");
            assert_eq!(decoded.as_slice(), engine.items());
        }
        Err(_) => assert!(!valid, "engine rejected a valid layout"),
    }
});
