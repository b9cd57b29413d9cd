//! Browser half of tether: lobby, negotiation driver and the game UI.

mod engine;
mod logger;
mod ui;

pub use engine::*;
pub use ui::Ui;

use tether_core::utils::room_id_from_path;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let location = window.location();

    let config = EngineConfig::from_location(&location)?;
    let deep_link = room_id_from_path(&location.pathname()?).map(str::to_owned);

    ClientEngine::launch(config, Ui::bind(&document)?, deep_link)
}
