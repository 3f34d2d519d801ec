//! Browser entry point: installs logging and mounts the app.

use app::App;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already set.
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("mounting Telya Agency site");
    leptos::mount::mount_to_body(App);
}
