//! Job assembly: build every configured component, in order.

use crate::backend::{DynamicBackend, NativeBackend, NativeObject};
use crate::component::{CaloNtupleMaker, CaloRingerBuilder, Component, ComponentKind};
use crate::config::{ComponentConfig, JobConfig};
use crate::property::PropertyValue;
use crate::{Error, Result};

/// A configured component of any known kind.
#[derive(Debug)]
pub enum AnyComponent {
    NtupleMaker(Component<CaloNtupleMaker>),
    RingerBuilder(Component<CaloRingerBuilder>),
}

macro_rules! dispatch {
    ($self:expr, $component:ident => $body:expr) => {
        match $self {
            AnyComponent::NtupleMaker($component) => $body,
            AnyComponent::RingerBuilder($component) => $body,
        }
    };
}

impl AnyComponent {
    /// Build the component described by `config`, dispatching on its class.
    pub fn build(backend: &dyn NativeBackend, config: &ComponentConfig) -> Result<Self> {
        let properties = config.property_values()?;
        let class = config.class.as_str();

        if class == CaloNtupleMaker::CLASS_NAME {
            Component::new(backend, config.name.clone(), properties).map(AnyComponent::NtupleMaker)
        } else if class == CaloRingerBuilder::CLASS_NAME {
            Component::new(backend, config.name.clone(), properties).map(AnyComponent::RingerBuilder)
        } else {
            Err(Error::UnknownClass(config.class.clone()))
        }
    }

    pub fn name(&self) -> &str {
        dispatch!(self, c => c.name())
    }

    pub fn class_name(&self) -> &'static str {
        dispatch!(self, c => c.class_name())
    }

    pub fn core(&self) -> &dyn NativeObject {
        dispatch!(self, c => c.core())
    }

    pub fn set_property(&mut self, key: &str, value: impl Into<PropertyValue>) -> Result<()> {
        dispatch!(self, c => c.set_property(key, value))
    }

    pub fn get_property(&self, key: &str) -> Result<Option<&PropertyValue>> {
        dispatch!(self, c => c.get_property(key))
    }
}

/// Ordered set of configured components.
#[derive(Debug, Default)]
pub struct Job {
    components: Vec<AnyComponent>,
}

impl Job {
    /// Configure every component of `config` against `backend`.
    ///
    /// Stops at the first component that fails to configure.
    pub fn from_config(config: &JobConfig, backend: &dyn NativeBackend) -> Result<Self> {
        config.validate()?;

        let components = config
            .components
            .iter()
            .map(|component| AnyComponent::build(backend, component))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(components = components.len(), "Configured job");
        Ok(Self { components })
    }

    /// Load the native library named by `config` and configure the job.
    ///
    /// `LORENZETT_LIBRARY` and `LORENZETT_LIBRARY_PATH` take effect here.
    pub fn load(config: &JobConfig) -> Result<Self> {
        let library = config.library.clone().with_env_overrides();
        let backend = DynamicBackend::load(&library)?;
        Self::from_config(config, &backend)
    }

    pub fn components(&self) -> &[AnyComponent] {
        &self.components
    }

    pub fn get(&self, name: &str) -> Option<&AnyComponent> {
        self.components.iter().find(|c| c.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AnyComponent> {
        self.components.iter_mut().find(|c| c.name() == name)
    }

    /// Native objects in configuration order, ready to be registered as
    /// pipeline steps.
    pub fn cores(&self) -> impl Iterator<Item = &dyn NativeObject> {
        self.components.iter().map(AnyComponent::core)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
