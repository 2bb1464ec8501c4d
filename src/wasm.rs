use wasm_bindgen::prelude::*;

use crate::model::Moodboard;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Per-category placements for the interactive preview.
#[wasm_bindgen(js_name = resolveLayout)]
pub fn resolve_layout(input: JsValue) -> Result<JsValue, JsValue> {
    let moodboard: Moodboard = serde_wasm_bindgen::from_value(input).map_err(to_js_error)?;
    let layouts = crate::layout_moodboard(&moodboard).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&layouts).map_err(to_js_error)
}

/// Page positions for the export document.
#[wasm_bindgen(js_name = exportLayout)]
pub fn export_layout(input: JsValue) -> Result<JsValue, JsValue> {
    let moodboard: Moodboard = serde_wasm_bindgen::from_value(input).map_err(to_js_error)?;
    let document = crate::export_moodboard(&moodboard).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&document).map_err(to_js_error)
}
