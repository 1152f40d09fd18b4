use std::{io::Read, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::library::{BasisLibrary, Exclusions};

/// Where basis set files live and which of them are refused.
///
/// ```json
/// { "directory": "/usr/share/basis", "exclusions": { "qmmm": [] } }
/// ```
///
/// A missing `exclusions` object, or a missing list inside it, falls back to the built-in lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    pub directory: PathBuf,
    #[serde(default)]
    pub exclusions: Exclusions,
}

impl LibraryConfig {
    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}

impl From<LibraryConfig> for BasisLibrary {
    fn from(value: LibraryConfig) -> Self {
        let LibraryConfig {
            directory,
            exclusions,
        } = value;

        BasisLibrary::with_exclusions(directory, exclusions)
    }
}
