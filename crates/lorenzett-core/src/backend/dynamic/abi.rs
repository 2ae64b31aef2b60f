//! C ABI exported by native component libraries.
//!
//! A library exports one version symbol plus three symbols per component
//! class, all with C linkage:
//!
//! ```text
//! uint32_t lorenzett_abi_version(void);
//! void*    <Class>_create(const uint8_t* name, size_t name_len);
//! int32_t  <Class>_set_property(void* obj,
//!                               const uint8_t* key, size_t key_len,
//!                               const uint8_t* value_json, size_t value_len);
//! void     <Class>_destroy(void* obj);
//! ```
//!
//! Strings are UTF-8 and not NUL-terminated. Property values are JSON.
//! `<Class>_create` returns null on failure and `<Class>_set_property`
//! returns zero on success.

use std::ffi::c_void;

/// Current ABI version. Libraries reporting anything else are rejected.
pub const LORENZETT_ABI_VERSION: u32 = 1;

/// Name of the exported version symbol.
pub const ABI_VERSION_SYMBOL: &str = "lorenzett_abi_version";

pub type AbiVersionFn = unsafe extern "C" fn() -> u32;

pub type CreateFn = unsafe extern "C" fn(name: *const u8, name_len: usize) -> *mut c_void;

pub type SetPropertyFn = unsafe extern "C" fn(
    instance: *mut c_void,
    key: *const u8,
    key_len: usize,
    value_json: *const u8,
    value_len: usize,
) -> i32;

pub type DestroyFn = unsafe extern "C" fn(instance: *mut c_void);

/// Symbol names a class must export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSymbols {
    pub create: String,
    pub set_property: String,
    pub destroy: String,
}

impl ClassSymbols {
    pub fn for_class(class_name: &str) -> Self {
        Self {
            create: format!("{}_create", class_name),
            set_property: format!("{}_set_property", class_name),
            destroy: format!("{}_destroy", class_name),
        }
    }
}
