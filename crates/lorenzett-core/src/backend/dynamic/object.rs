//! Native object created through a loaded library.

use std::ffi::c_void;
use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use serde_json::Value;

use super::abi::{ClassSymbols, CreateFn, DestroyFn, SetPropertyFn};
use super::library::SharedLibrary;
use crate::backend::NativeObject;
use crate::{Error, Result};

/// Owned native instance. Destroyed through the library when dropped.
pub struct DynamicObject {
    class: String,
    name: String,
    instance: NonNull<c_void>,
    set_property_fn: SetPropertyFn,
    destroy_fn: DestroyFn,
    /// Keeps the code behind the function pointers mapped.
    library: SharedLibrary,
}

impl DynamicObject {
    pub(crate) fn create(library: &SharedLibrary, class_name: &str, name: &str) -> Result<Self> {
        let symbols = ClassSymbols::for_class(class_name);

        // SAFETY: the symbol types follow the ABI described in `abi`.
        let (create_fn, set_property_fn, destroy_fn) = unsafe {
            (
                library.symbol::<CreateFn>(&symbols.create)?,
                library.symbol::<SetPropertyFn>(&symbols.set_property)?,
                library.symbol::<DestroyFn>(&symbols.destroy)?,
            )
        };

        let raw = unsafe { create_fn(name.as_ptr(), name.len()) };
        let instance = NonNull::new(raw).ok_or_else(|| Error::CreationFailed {
            class: class_name.to_string(),
            name: name.to_string(),
        })?;

        tracing::debug!(class = class_name, name, "Created native object");

        Ok(Self {
            class: class_name.to_string(),
            name: name.to_string(),
            instance,
            set_property_fn,
            destroy_fn,
            library: library.clone(),
        })
    }
}

impl NativeObject for DynamicObject {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_property(&mut self, key: &str, value: &Value) -> Result<()> {
        let payload = serde_json::to_vec(value)?;
        let code = unsafe {
            (self.set_property_fn)(
                self.instance.as_ptr(),
                key.as_ptr(),
                key.len(),
                payload.as_ptr(),
                payload.len(),
            )
        };

        if code != 0 {
            return Err(Error::NativeCall {
                class: self.class.clone(),
                name: self.name.clone(),
                key: key.to_string(),
                code,
            });
        }
        Ok(())
    }
}

impl Drop for DynamicObject {
    fn drop(&mut self) {
        unsafe { (self.destroy_fn)(self.instance.as_ptr()) };
        tracing::debug!(class = %self.class, name = %self.name, "Destroyed native object");
    }
}

impl Debug for DynamicObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicObject")
            .field("class", &self.class)
            .field("name", &self.name)
            .field("library", &self.library.path())
            .finish()
    }
}
