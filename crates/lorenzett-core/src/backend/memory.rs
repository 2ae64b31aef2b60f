//! In-process backend.
//!
//! Records created objects and every forwarded property instead of calling
//! native code. Used to validate a job configuration without the shared
//! library, and as the native double in tests.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use super::{NativeBackend, NativeObject};
use crate::{Error, Result};

/// One property that reached the native side.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardedProperty {
    pub class: String,
    pub name: String,
    pub key: String,
    pub value: Value,
}

#[derive(Debug, Default)]
struct MemoryState {
    created: Vec<(String, String)>,
    forwarded: Vec<ForwardedProperty>,
    rejected_keys: Vec<String>,
}

/// Backend that keeps everything in memory.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every object created by this backend reject `key`, the way a
    /// native setter reports an unknown declared property.
    pub fn rejecting(self, key: impl Into<String>) -> Self {
        self.state.lock().rejected_keys.push(key.into());
        self
    }

    /// `(class, name)` of every object created so far, in creation order.
    pub fn created(&self) -> Vec<(String, String)> {
        self.state.lock().created.clone()
    }

    /// Every property forwarded so far, in call order.
    pub fn forwarded(&self) -> Vec<ForwardedProperty> {
        self.state.lock().forwarded.clone()
    }

    /// Properties forwarded to the instance labeled `name`.
    pub fn forwarded_for(&self, name: &str) -> Vec<ForwardedProperty> {
        self.state
            .lock()
            .forwarded
            .iter()
            .filter(|p| p.name == name)
            .cloned()
            .collect()
    }
}

impl NativeBackend for MemoryBackend {
    fn create(&self, class_name: &str, name: &str) -> Result<Box<dyn NativeObject>> {
        self.state
            .lock()
            .created
            .push((class_name.to_string(), name.to_string()));

        Ok(Box::new(MemoryObject {
            class: class_name.to_string(),
            name: name.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

/// Object created by [`MemoryBackend`].
#[derive(Debug)]
pub struct MemoryObject {
    class: String,
    name: String,
    state: Arc<Mutex<MemoryState>>,
}

impl NativeObject for MemoryObject {
    fn class_name(&self) -> &str {
        &self.class
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_property(&mut self, key: &str, value: &Value) -> Result<()> {
        let mut state = self.state.lock();
        if state.rejected_keys.iter().any(|k| k == key) {
            return Err(Error::NativeCall {
                class: self.class.clone(),
                name: self.name.clone(),
                key: key.to_string(),
                code: -1,
            });
        }

        state.forwarded.push(ForwardedProperty {
            class: self.class.clone(),
            name: self.name.clone(),
            key: key.to_string(),
            value: value.clone(),
        });
        Ok(())
    }
}
