//! Test component library
//!
//! Exports the lorenzett C ABI for `CaloNtupleMaker` only, plus counters the
//! tests read back. `DumpCells` is rejected with code 7 and an instance named
//! `broken` cannot be created.

#![allow(non_snake_case)]

use std::ffi::c_void;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

static CREATED: AtomicU64 = AtomicU64::new(0);
static DESTROYED: AtomicU64 = AtomicU64::new(0);
static LAST_PROPERTY: Mutex<String> = Mutex::new(String::new());

const REJECTED_KEY: &str = "DumpCells";
const REJECTED_CODE: i32 = 7;

struct NtupleMaker {
    name: String,
}

unsafe fn utf8<'a>(ptr: *const u8, len: usize) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    std::str::from_utf8(std::slice::from_raw_parts(ptr, len)).ok()
}

#[no_mangle]
pub extern "C" fn lorenzett_abi_version() -> u32 {
    1
}

#[no_mangle]
pub unsafe extern "C" fn CaloNtupleMaker_create(name: *const u8, name_len: usize) -> *mut c_void {
    let name = match utf8(name, name_len) {
        Some(name) if name != "broken" => name.to_string(),
        _ => return std::ptr::null_mut(),
    };
    CREATED.fetch_add(1, Ordering::SeqCst);
    Box::into_raw(Box::new(NtupleMaker { name })) as *mut c_void
}

#[no_mangle]
pub unsafe extern "C" fn CaloNtupleMaker_set_property(
    instance: *mut c_void,
    key: *const u8,
    key_len: usize,
    value_json: *const u8,
    value_len: usize,
) -> i32 {
    if instance.is_null() {
        return 1;
    }
    let (key, value) = match (utf8(key, key_len), utf8(value_json, value_len)) {
        (Some(key), Some(value)) => (key, value),
        _ => return 2,
    };
    if key == REJECTED_KEY {
        return REJECTED_CODE;
    }

    let maker = &*(instance as *const NtupleMaker);
    if let Ok(mut last) = LAST_PROPERTY.lock() {
        *last = format!("{}.{}={}", maker.name, key, value);
    }
    0
}

#[no_mangle]
pub unsafe extern "C" fn CaloNtupleMaker_destroy(instance: *mut c_void) {
    if !instance.is_null() {
        drop(Box::from_raw(instance as *mut NtupleMaker));
        DESTROYED.fetch_add(1, Ordering::SeqCst);
    }
}

#[no_mangle]
pub extern "C" fn test_components_created() -> u64 {
    CREATED.load(Ordering::SeqCst)
}

#[no_mangle]
pub extern "C" fn test_components_destroyed() -> u64 {
    DESTROYED.load(Ordering::SeqCst)
}

/// Copy the last accepted `name.key=json` entry into `buf`, returning its length.
#[no_mangle]
pub unsafe extern "C" fn test_components_last_property(buf: *mut u8, cap: usize) -> usize {
    let last = match LAST_PROPERTY.lock() {
        Ok(last) => last.clone(),
        Err(_) => return 0,
    };
    let len = last.len().min(cap);
    if !buf.is_null() {
        std::ptr::copy_nonoverlapping(last.as_ptr(), buf, len);
    }
    len
}
