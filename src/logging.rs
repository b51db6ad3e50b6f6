//! Browser console logging
//!
//! Routes through `web_sys::console` when compiled for wasm32. Native builds
//! (unit tests, benches) have no console to talk to, so calls compile away.

#[cfg(target_arch = "wasm32")]
pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

#[cfg(target_arch = "wasm32")]
pub fn error(message: &str) {
    web_sys::console::error_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log(_message: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(_message: &str) {}
