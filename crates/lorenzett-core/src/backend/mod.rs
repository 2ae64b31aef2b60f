//! Native backend boundary.
//!
//! Components never talk to a shared library directly. They ask a
//! [`NativeBackend`] to create a [`NativeObject`] and push normalized property
//! values into it. Two backends ship:
//!
//! - [`DynamicBackend`] loads the native library at runtime (`libloading`)
//! - [`MemoryBackend`] records everything in-process, for dry runs and tests

pub mod dynamic;
pub mod memory;

use std::fmt::Debug;

use serde_json::Value;

use crate::Result;

pub use dynamic::DynamicBackend;
pub use memory::{ForwardedProperty, MemoryBackend, MemoryObject};

/// Object living on the native side of the boundary.
pub trait NativeObject: Debug {
    /// Native class this object was created from.
    fn class_name(&self) -> &str;

    /// Instance label given at creation.
    fn name(&self) -> &str;

    /// Forward an already normalized value for `key`.
    fn set_property(&mut self, key: &str, value: &Value) -> Result<()>;
}

/// Factory for native objects.
pub trait NativeBackend {
    /// Create one instance of `class_name` labeled `name`.
    fn create(&self, class_name: &str, name: &str) -> Result<Box<dyn NativeObject>>;
}
