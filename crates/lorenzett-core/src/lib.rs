//! Configuration proxies for lorenzett calorimeter reconstruction components.
//!
//! The reconstruction itself (cell-to-cluster matching, ring sums, ntuple
//! writing) lives in the native `lorenzett` library. This crate loads that
//! library, creates named component instances in it and forwards a checked,
//! typed set of properties to each of them.
//!
//! # Example
//!
//! ```rust
//! use lorenzett_core::prelude::*;
//!
//! let config = JobConfig::from_toml_str(r#"
//!     [[component]]
//!     class = "CaloNtupleMaker"
//!     name = "CaloNtupleMaker"
//!
//!     [component.properties]
//!     ClusterKey = "Clusters"
//!     DeltaR = 0.1
//!     OutputLevel = "INFO"
//! "#)?;
//!
//! // Dry run against the in-memory backend; `Job::load` uses the real library.
//! let backend = MemoryBackend::new();
//! let job = Job::from_config(&config, &backend)?;
//!
//! let maker = job.get("CaloNtupleMaker").unwrap();
//! assert_eq!(maker.get_property("DeltaR")?, Some(&PropertyValue::Float(0.1)));
//! assert_eq!(job.cores().count(), 1);
//! # Ok::<(), lorenzett_core::Error>(())
//! ```

pub mod backend;
pub mod component;
pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod property;

pub use error::{Error, Result};

/// Re-exports commonly used types.
pub mod prelude {
    pub use crate::backend::{DynamicBackend, MemoryBackend, NativeBackend, NativeObject};
    pub use crate::component::{
        CaloNtupleMaker, CaloRingerBuilder, Component, ComponentKind, NtupleMakerKey,
        PropertyKey, RingerBuilderKey,
    };
    pub use crate::config::{ComponentConfig, JobConfig, LibraryConfig};
    pub use crate::error::{Error, Result};
    pub use crate::job::{AnyComponent, Job};
    pub use crate::property::{OutputLevel, PropertyType, PropertyValue};
}
