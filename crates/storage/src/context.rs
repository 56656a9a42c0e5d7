//! The loaded state of one editing run.

use crate::error::Result;
use crate::file::{load_environments, load_registry, write_registry};
use crate::locate::{locate, RegistryLocation};
use crate::typedef::write_typedefs;
use flagreg_core::{EditOutcome, EditRequest, EditStamp, EnvironmentSet, FlagRegistry};
use std::path::Path;
use tracing::debug;

/// Everything an edit needs: where the files are, the known environments
/// and the current registry.
#[derive(Debug, Clone)]
pub struct FlagContext {
    pub location: RegistryLocation,
    pub environments: EnvironmentSet,
    pub registry: FlagRegistry,
}

impl FlagContext {
    /// Locate the registry from `start`, then load environments and flags.
    pub fn open(start: &Path, config_dir_name: &str) -> Result<Self> {
        let location = locate(start, config_dir_name)?;
        Self::load(location)
    }

    /// Load environments and flags from a known location.
    pub fn load(location: RegistryLocation) -> Result<Self> {
        let environments = load_environments(&location.environments_path())?;
        let registry = load_registry(&location.flags_path())?;
        debug!(flags = registry.len(), environments = environments.len(), "loaded context");

        Ok(Self {
            location,
            environments,
            registry,
        })
    }

    /// Apply an edit to the in-memory registry.
    pub fn apply(
        &mut self,
        request: &EditRequest,
        stamp: &EditStamp,
    ) -> flagreg_core::Result<EditOutcome> {
        self.registry.apply(request, &self.environments, stamp)
    }

    /// Write the registry, then regenerate the declaration file.
    pub fn save(&self) -> Result<()> {
        write_registry(&self.location.flags_path(), &self.registry)?;
        write_typedefs(&self.location.typedef_path(), &self.registry)
    }

    /// Regenerate only the declaration file.
    pub fn write_typedefs(&self) -> Result<()> {
        write_typedefs(&self.location.typedef_path(), &self.registry)
    }
}
