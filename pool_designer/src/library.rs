use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use pool_driver::{DefinitionSet, Driver, DriverError, PartCatalog};
use tracing::info;

use crate::DesignError;

/// A store holding the library graphs and the catalog resolving its parts.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub store: Driver,
    pub catalog: PartCatalog,
}

impl Library {
    /// Imports `definitions` into an empty store.
    pub fn from_definitions(definitions: &DefinitionSet) -> Result<Self, DesignError> {
        let mut library = Self::default();
        definitions.import_library(&library.store, &mut library.catalog)?;
        Ok(library)
    }
}

/// Reads a JSON list of component definitions and imports it.
pub fn load_library<P: AsRef<Path>>(path: P) -> Result<Library, DesignError> {
    let file = File::open(path.as_ref()).map_err(DriverError::from)?;
    let definitions = DefinitionSet::from_reader(BufReader::new(file))?;
    let library = Library::from_definitions(&definitions)?;
    info!(
        "loaded {} definitions from {}: {} library graphs, {} part names",
        definitions.len(),
        path.as_ref().display(),
        library.store.len(),
        library.catalog.len()
    );
    Ok(library)
}
