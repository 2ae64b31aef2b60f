//! Property proxies for native reconstruction components.
//!
//! A [`Component`] owns one native object and a local record of every
//! property set on it. Property names are checked against the closed key set
//! of the component's [`ComponentKind`]; an unknown name is a configuration
//! error that stops the job.
//!
//! # Example
//!
//! ```rust
//! use lorenzett_core::backend::MemoryBackend;
//! use lorenzett_core::component::{CaloNtupleMaker, Component};
//! use lorenzett_core::property::PropertyValue;
//!
//! let backend = MemoryBackend::new();
//! let maker = Component::<CaloNtupleMaker>::new(
//!     &backend,
//!     "CaloNtupleMaker",
//!     [("DeltaR", PropertyValue::from(0.1)), ("NtupleName", "output".into())],
//! )?;
//!
//! assert_eq!(maker.get_property("DeltaR")?, Some(&PropertyValue::Float(0.1)));
//! assert_eq!(maker.core().name(), "CaloNtupleMaker");
//! # Ok::<(), lorenzett_core::Error>(())
//! ```

mod macros;
pub mod ntuple_maker;
pub mod ringer_builder;

use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;

use crate::backend::{NativeBackend, NativeObject};
use crate::property::{PropertyType, PropertyValue};
use crate::{Error, Result};

pub use ntuple_maker::{CaloNtupleMaker, NtupleMakerKey};
pub use ringer_builder::{CaloRingerBuilder, RingerBuilderKey};

/// Closed set of property names accepted by one component kind.
pub trait PropertyKey: Copy + Ord + Debug + Display + 'static {
    /// Every accepted key, in declaration order.
    const ALL: &'static [Self];

    /// Property name as seen by the native class.
    fn as_str(&self) -> &'static str;

    /// Type the native side expects for this key.
    fn property_type(&self) -> PropertyType;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

/// A native component class and the properties it accepts.
pub trait ComponentKind {
    /// Native class name, also used in diagnostics.
    const CLASS_NAME: &'static str;

    type Key: PropertyKey;
}

/// Configured proxy for one native component instance.
pub struct Component<K: ComponentKind> {
    name: String,
    core: Box<dyn NativeObject>,
    values: BTreeMap<K::Key, PropertyValue>,
    _kind: PhantomData<K>,
}

impl<K: ComponentKind> Component<K> {
    /// Create the native object labeled `name` and apply `properties` in order.
    ///
    /// The first invalid property aborts construction.
    pub fn new<I, S, V>(backend: &dyn NativeBackend, name: impl Into<String>, properties: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<PropertyValue>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidName(name));
        }

        let core = backend.create(K::CLASS_NAME, &name)?;
        let mut component = Self {
            name,
            core,
            values: BTreeMap::new(),
            _kind: PhantomData,
        };

        for (key, value) in properties {
            component.set_property(key.as_ref(), value)?;
        }

        tracing::debug!(
            class = K::CLASS_NAME,
            name = %component.name,
            properties = component.values.len(),
            "Configured component"
        );
        Ok(component)
    }

    /// Set a property by name.
    ///
    /// Fails with [`Error::InvalidPropertyKey`] when `key` is not accepted by
    /// this component; nothing is stored or forwarded in that case.
    pub fn set_property(&mut self, key: &str, value: impl Into<PropertyValue>) -> Result<()> {
        let key = self.resolve_key(key)?;
        self.set(key, value)
    }

    /// Set a property by typed key.
    ///
    /// The value is normalized and forwarded to the native object first; the
    /// local record is only updated once the native side accepted it.
    pub fn set(&mut self, key: K::Key, value: impl Into<PropertyValue>) -> Result<()> {
        let value = value.into();
        let expected = key.property_type();
        let normalized = expected
            .normalize(&value)
            .ok_or_else(|| Error::InvalidPropertyValue {
                key: key.as_str().to_string(),
                class: K::CLASS_NAME.to_string(),
                expected: expected.to_string(),
                found: format!("{} {}", value.type_name(), value),
            })?;

        self.core.set_property(key.as_str(), &normalized)?;
        tracing::debug!(
            class = K::CLASS_NAME,
            name = %self.name,
            key = key.as_str(),
            value = %normalized,
            "Forwarded property"
        );

        self.values.insert(key, value);
        Ok(())
    }

    /// Most recently set value for `key`, or `None` if it was never set.
    ///
    /// Fails with [`Error::InvalidPropertyKey`] when `key` is not accepted by
    /// this component. The native object is not queried.
    pub fn get_property(&self, key: &str) -> Result<Option<&PropertyValue>> {
        let key = self.resolve_key(key)?;
        Ok(self.get(key))
    }

    pub fn get(&self, key: K::Key) -> Option<&PropertyValue> {
        self.values.get(&key)
    }

    /// Native object, for registration with the surrounding pipeline.
    pub fn core(&self) -> &dyn NativeObject {
        self.core.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_name(&self) -> &'static str {
        K::CLASS_NAME
    }

    /// Stored properties in key declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (K::Key, &PropertyValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn allowed_keys() -> &'static [K::Key] {
        <K::Key as PropertyKey>::ALL
    }

    fn resolve_key(&self, key: &str) -> Result<K::Key> {
        <K::Key as PropertyKey>::parse(key).ok_or_else(|| {
            tracing::error!(
                fatal = true,
                class = K::CLASS_NAME,
                name = %self.name,
                "Property with name {} is not allowed for {} object",
                key,
                K::CLASS_NAME
            );
            Error::InvalidPropertyKey {
                key: key.to_string(),
                class: K::CLASS_NAME.to_string(),
            }
        })
    }
}

impl<K: ComponentKind> Debug for Component<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("class", &K::CLASS_NAME)
            .field("name", &self.name)
            .field("values", &self.values)
            .finish()
    }
}
