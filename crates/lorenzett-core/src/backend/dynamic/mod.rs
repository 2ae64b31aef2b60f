//! Backend that loads native components from a shared library at runtime.
//!
//! The library is opened with `libloading` (`.so` on Linux, `.dylib` on
//! macOS, `.dll` on Windows) and must export the symbols described in
//! [`abi`].

pub mod abi;
pub mod library;
pub mod object;

pub use abi::{ClassSymbols, LORENZETT_ABI_VERSION};
pub use library::SharedLibrary;
pub use object::DynamicObject;

use super::{NativeBackend, NativeObject};
use crate::config::LibraryConfig;
use crate::Result;

/// [`NativeBackend`] over a dynamically loaded library.
#[derive(Debug, Clone)]
pub struct DynamicBackend {
    library: SharedLibrary,
}

impl DynamicBackend {
    /// Load (or reuse) the library described by `config`.
    pub fn load(config: &LibraryConfig) -> Result<Self> {
        Ok(Self {
            library: SharedLibrary::load(config)?,
        })
    }

    pub fn library(&self) -> &SharedLibrary {
        &self.library
    }
}

impl NativeBackend for DynamicBackend {
    fn create(&self, class_name: &str, name: &str) -> Result<Box<dyn NativeObject>> {
        Ok(Box::new(DynamicObject::create(&self.library, class_name, name)?))
    }
}
