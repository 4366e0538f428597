// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ACC-4D WebAssembly Bindings
//!
//! JavaScript/TypeScript API for the schedule engine built with
//! wasm-bindgen. The browser viewer loads its element snapshot in, then
//! drives imports, timeline passes and searches from UI events and applies
//! the returned show/hide/color lists to the vendor SDK.

use wasm_bindgen::prelude::*;

mod api;
mod utils;

pub use api::Schedule4D;
pub use utils::set_panic_hook as init_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the version of ACC-4D
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
