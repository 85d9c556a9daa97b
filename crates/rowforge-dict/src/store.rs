use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::error::{DictError, DictResult};

/// Immutable mapping from category to its ordered sample values.
///
/// Constructed once at process start (or by the offline `build` step) and
/// safe for unsynchronized concurrent reads afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dictionary {
    entries: BTreeMap<Category, Vec<String>>,
}

impl Dictionary {
    /// Wrap a category map, rejecting categories with no samples.
    pub fn new(entries: BTreeMap<Category, Vec<String>>) -> DictResult<Self> {
        for (category, samples) in &entries {
            if samples.is_empty() {
                return Err(DictError::EmptyCategory(category.to_string()));
            }
        }
        Ok(Self { entries })
    }

    /// Read and validate a JSON interchange document.
    pub fn from_interchange(path: &Path) -> DictResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| DictError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: BTreeMap<Category, Vec<String>> =
            serde_json::from_str(&contents).map_err(|source| DictError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(entries)
    }

    /// Deserialize a binary artifact produced by [`build`].
    pub fn load(path: &Path) -> DictResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| DictError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: BTreeMap<Category, Vec<String>> =
            bincode::deserialize(&bytes).map_err(|source| DictError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(entries)
    }

    /// Sample values for a category.
    ///
    /// The returned slice is never empty; absence of the category is the only
    /// failure condition.
    pub fn lookup(&self, category: Category) -> DictResult<&[String]> {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .ok_or_else(|| DictError::CategoryNotFound(category.to_string()))
    }

}

/// Convert a JSON interchange document into a binary dictionary artifact.
///
/// The artifact is written atomically: a failure at any step leaves the
/// destination untouched. Errors name the failing step and path.
pub fn build(source: &Path, artifact: &Path) -> DictResult<()> {
    let dictionary = Dictionary::from_interchange(source)?;
    let bytes = bincode::serialize(&dictionary.entries).map_err(DictError::Encode)?;
    write_bytes_atomic(artifact, &bytes)
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> DictResult<()> {
    let write_err = |source: std::io::Error| DictError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)
        .map_err(write_err)?;
    file.write_all(data).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;

    std::fs::rename(&tmp_path, path).map_err(write_err)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent).map_err(write_err)?;
        }
    }

    Ok(())
}

fn temp_path(path: &Path) -> DictResult<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| DictError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(path: &Path) -> std::io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_missing_category_is_distinct_error() {
        let mut entries = BTreeMap::new();
        entries.insert(Category::City, vec!["Gdansk".to_string()]);
        let dictionary = Dictionary::new(entries).expect("valid dictionary");

        let err = dictionary
            .lookup(Category::Country)
            .expect_err("country is absent");
        assert!(matches!(err, DictError::CategoryNotFound(ref c) if c == "country"));
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut entries = BTreeMap::new();
        entries.insert(Category::State, Vec::new());

        let err = Dictionary::new(entries).expect_err("empty category");
        assert!(matches!(err, DictError::EmptyCategory(ref c) if c == "state"));
    }
}
