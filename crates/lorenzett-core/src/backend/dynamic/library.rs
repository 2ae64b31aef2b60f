//! Process-wide shared library registry.
//!
//! A library is opened at most once per resolved path and then kept for the
//! lifetime of the process, so asking for it again is cheap and never fails.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::abi::{AbiVersionFn, ABI_VERSION_SYMBOL, LORENZETT_ABI_VERSION};
use crate::config::LibraryConfig;
use crate::{Error, Result};

static REGISTRY: Lazy<Mutex<HashMap<PathBuf, Arc<Library>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Handle to a loaded library. Cloning shares the same handle.
#[derive(Debug, Clone)]
pub struct SharedLibrary {
    path: PathBuf,
    library: Arc<Library>,
}

impl SharedLibrary {
    /// Load the library described by `config`, or reuse it if already loaded.
    pub fn load(config: &LibraryConfig) -> Result<Self> {
        let path = resolve(config);
        let mut registry = REGISTRY.lock();

        if let Some(library) = registry.get(&path) {
            tracing::debug!(path = %path.display(), "Library already loaded");
            return Ok(Self {
                path,
                library: Arc::clone(library),
            });
        }

        let library = unsafe {
            Library::new(&path)
                .map_err(|e| Error::LoadFailed(format!("{}: {}", path.display(), e)))?
        };
        check_abi_version(&library, &path)?;

        let library = Arc::new(library);
        registry.insert(path.clone(), Arc::clone(&library));
        tracing::info!(path = %path.display(), "Loaded native library");

        Ok(Self { path, library })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up `name` and copy the symbol value out.
    ///
    /// # Safety
    /// `T` must match the type of the exported symbol.
    pub(crate) unsafe fn symbol<T: Copy>(&self, name: &str) -> Result<T> {
        self.library
            .get::<T>(name.as_bytes())
            .map(|symbol| *symbol)
            .map_err(|_| Error::SymbolNotFound {
                symbol: name.to_string(),
                library: self.path.display().to_string(),
            })
    }
}

/// Whether the library at `path` has been loaded by this process.
pub fn is_loaded(path: &Path) -> bool {
    REGISTRY.lock().contains_key(path)
}

fn check_abi_version(library: &Library, path: &Path) -> Result<()> {
    let version_fn: AbiVersionFn = unsafe {
        *library
            .get::<AbiVersionFn>(ABI_VERSION_SYMBOL.as_bytes())
            .map_err(|_| Error::SymbolNotFound {
                symbol: ABI_VERSION_SYMBOL.to_string(),
                library: path.display().to_string(),
            })?
    };

    let found = unsafe { version_fn() };
    if found != LORENZETT_ABI_VERSION {
        return Err(Error::AbiMismatch {
            expected: LORENZETT_ABI_VERSION,
            found,
        });
    }
    Ok(())
}

/// Resolve the configured library name to the path handed to the loader.
///
/// Explicit paths are used as-is. Bare names are turned into the platform
/// file name and looked up in the search paths. When none of them contains
/// the file, the bare file name is returned and the system loader searches
/// its own path.
pub fn resolve(config: &LibraryConfig) -> PathBuf {
    let file_name = platform_file_name(&config.name);
    let as_path = Path::new(&file_name);

    if as_path.components().count() > 1 {
        return as_path.to_path_buf();
    }

    config
        .search_paths
        .iter()
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(file_name))
}

fn platform_file_name(name: &str) -> OsString {
    let path = Path::new(name);
    if path.extension().is_some() || path.components().count() > 1 {
        return OsString::from(name);
    }

    let prefix = std::env::consts::DLL_PREFIX;
    if !prefix.is_empty() && name.starts_with(prefix) {
        OsString::from(format!("{}{}", name, std::env::consts::DLL_SUFFIX))
    } else {
        libloading::library_filename(name)
    }
}
