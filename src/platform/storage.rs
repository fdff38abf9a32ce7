//! LocalStorage access
//!
//! Native builds have no storage: reads miss and writes are dropped.

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Read a string value
#[cfg(target_arch = "wasm32")]
pub fn load(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Write a string value. Returns false if storage is unavailable or full.
#[cfg(target_arch = "wasm32")]
pub fn save(key: &str, value: &str) -> bool {
    match local_storage() {
        Some(storage) => storage.set_item(key, value).is_ok(),
        None => false,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save(_key: &str, _value: &str) -> bool {
    false
}
