use std::{
    collections::{hash_map::Entry, HashMap},
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use crate::basis::BasisTable;

use super::{parse_library, BasisError, Exclusions};

/// A directory of basis set library files, one file per basis set named after it.
///
/// Loaded tables are cached. A table only enters the cache once it is completely built,
/// so concurrent lookups either miss or see the whole table.
#[derive(Debug)]
pub struct BasisLibrary {
    directory: PathBuf,
    exclusions: Exclusions,
    cache: RwLock<HashMap<String, Arc<BasisTable>>>,
}

impl BasisLibrary {
    /// A library in `directory` using the built-in exclusion lists
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_exclusions(directory, Exclusions::default())
    }

    pub fn with_exclusions(directory: impl Into<PathBuf>, exclusions: Exclusions) -> Self {
        Self {
            directory: directory.into(),
            exclusions,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }

    /// The file a basis set is read from
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    /// Returns the table of a basis set, reading and parsing its file on the first request.
    ///
    /// `name` must be a single file name inside the library directory.
    pub fn load(&self, name: &str) -> Result<Arc<BasisTable>, BasisError> {
        if Path::new(name).file_name() != Some(OsStr::new(name)) {
            return Err(BasisError::InvalidName {
                name: name.to_owned(),
            });
        }

        if let Some(reason) = self.exclusions.reason(name) {
            return Err(BasisError::Unsupported {
                name: name.to_owned(),
                reason,
            });
        }

        if let Some(table) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            log::trace!("basis set '{name}' served from cache");
            return Ok(Arc::clone(table));
        }

        let path = self.path_for(name);
        let table = Arc::new(parse_named(name, &path)?);
        log::info!(
            "loaded basis set '{name}' with {} elements from '{}'",
            table.len(),
            path.display()
        );

        Ok(self.insert(name, table))
    }

    /// Caches a freshly parsed table. If another thread cached the same name in the
    /// meantime its table wins, so every caller shares one `Arc`.
    fn insert(&self, name: &str, table: Arc<BasisTable>) -> Arc<BasisTable> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        match cache.entry(name.to_owned()) {
            Entry::Occupied(entry) => {
                log::warn!("basis set '{name}' was loaded concurrently, keeping the cached table");
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => Arc::clone(entry.insert(table)),
        }
    }

    /// Drops every cached table
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Parses a single library file, bypassing exclusions and caching.
pub fn parse_file(path: impl AsRef<Path>) -> Result<BasisTable, BasisError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_named(&name, path)
}

fn parse_named(name: &str, path: &Path) -> Result<BasisTable, BasisError> {
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => BasisError::NotFound {
            name: name.to_owned(),
            path: path.to_owned(),
        },
        _ => BasisError::Io {
            path: path.to_owned(),
            source,
        },
    })?;

    let entries = parse_library(&source).map_err(|source| BasisError::Parse {
        name: name.to_owned(),
        source,
    })?;

    Ok(BasisTable::from_entries(entries))
}
