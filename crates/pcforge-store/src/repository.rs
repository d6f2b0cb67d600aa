//! Build repositories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pcforge_core::build::PcBuild;
use pcforge_core::BuildId;
use tracing::{debug, info};

use crate::{StoreError, StoreResult};

/// Storage for evaluated builds.
///
/// Records are stored and returned verbatim: a repository never re-prices
/// or re-checks a build.
pub trait BuildRepository {
    /// Store a new build under the next sequential id and return it.
    fn insert(&mut self, build: PcBuild) -> StoreResult<PcBuild>;

    /// Fetch one build.
    fn get(&self, id: &BuildId) -> StoreResult<PcBuild>;

    /// All builds in insertion order.
    fn list(&self) -> StoreResult<Vec<PcBuild>>;

    /// Replace a stored build.
    fn update(&mut self, build: PcBuild) -> StoreResult<()>;

    /// Remove a build. Returns whether one was removed.
    fn delete(&mut self, id: &BuildId) -> StoreResult<bool>;
}

/// Sequence number of a store-assigned id.
fn sequence(id: &BuildId) -> Option<u64> {
    id.as_str().parse().ok()
}

/// In-memory repository keyed by sequence number.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    builds: BTreeMap<u64, PcBuild>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from previously stored builds. Ids that are not sequence
    /// numbers are rejected.
    pub fn from_builds(builds: Vec<PcBuild>) -> StoreResult<Self> {
        let mut map = BTreeMap::new();
        for build in builds {
            let seq = sequence(&build.id).ok_or_else(|| {
                StoreError::Serialization(format!("stored build has non-numeric id {}", build.id))
            })?;
            if map.insert(seq, build).is_some() {
                return Err(StoreError::Serialization(format!(
                    "stored build id {} appears twice",
                    seq
                )));
            }
        }
        Ok(Self { builds: map })
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.builds.keys().next_back().map_or(1, |max| max + 1)
    }

    fn key(&self, id: &BuildId) -> StoreResult<u64> {
        sequence(id)
            .filter(|seq| self.builds.contains_key(seq))
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

impl BuildRepository for MemoryRepository {
    fn insert(&mut self, build: PcBuild) -> StoreResult<PcBuild> {
        let seq = self.next_id();
        let build = build.with_id(BuildId::new(seq.to_string()));
        self.builds.insert(seq, build.clone());
        debug!(build = %build.id, "stored build");
        Ok(build)
    }

    fn get(&self, id: &BuildId) -> StoreResult<PcBuild> {
        sequence(id)
            .and_then(|seq| self.builds.get(&seq))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn list(&self) -> StoreResult<Vec<PcBuild>> {
        Ok(self.builds.values().cloned().collect())
    }

    fn update(&mut self, build: PcBuild) -> StoreResult<()> {
        let key = self.key(&build.id)?;
        self.builds.insert(key, build);
        Ok(())
    }

    fn delete(&mut self, id: &BuildId) -> StoreResult<bool> {
        Ok(sequence(id).and_then(|seq| self.builds.remove(&seq)).is_some())
    }
}

/// Repository persisted as one pretty-printed JSON array.
///
/// The whole file is rewritten after every mutation.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    inner: MemoryRepository,
}

impl JsonFileRepository {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let builds: Vec<PcBuild> = if content.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&content)?
            };
            MemoryRepository::from_builds(builds)?
        } else {
            MemoryRepository::new()
        };
        info!(path = %path.display(), builds = inner.len(), "opened build store");
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the builds, write the copy, then keep it.
    /// A failed write leaves both memory and disk as they were.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryRepository) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut staged = self.inner.clone();
        let out = change(&mut staged)?;
        self.write(&staged)?;
        self.inner = staged;
        Ok(out)
    }

    fn write(&self, builds: &MemoryRepository) -> StoreResult<()> {
        let builds = builds.list()?;
        let content = serde_json::to_string_pretty(&builds)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), builds = builds.len(), "saved build store");
        Ok(())
    }
}

impl BuildRepository for JsonFileRepository {
    fn insert(&mut self, build: PcBuild) -> StoreResult<PcBuild> {
        self.commit(|builds| builds.insert(build))
    }

    fn get(&self, id: &BuildId) -> StoreResult<PcBuild> {
        self.inner.get(id)
    }

    fn list(&self) -> StoreResult<Vec<PcBuild>> {
        self.inner.list()
    }

    fn update(&mut self, build: PcBuild) -> StoreResult<()> {
        self.commit(|builds| builds.update(build))
    }

    fn delete(&mut self, id: &BuildId) -> StoreResult<bool> {
        if self.inner.get(id).is_err() {
            return Ok(false);
        }
        self.commit(|builds| builds.delete(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcforge_core::build::{BuildSelection, Markup};

    fn build(name: &str) -> PcBuild {
        PcBuild::new(name, "", BuildSelection::new(), Markup::default()).unwrap()
    }

    #[test]
    fn test_sequential_ids() {
        let mut repo = MemoryRepository::new();
        let a = repo.insert(build("A")).unwrap();
        let b = repo.insert(build("B")).unwrap();
        assert_eq!(a.id.as_str(), "1");
        assert_eq!(b.id.as_str(), "2");

        assert!(repo.delete(&a.id).unwrap());
        let c = repo.insert(build("C")).unwrap();
        assert_eq!(c.id.as_str(), "3");
    }

    #[test]
    fn test_list_in_insertion_order() {
        let mut repo = MemoryRepository::new();
        for i in 0..11 {
            repo.insert(build(&format!("Build {}", i))).unwrap();
        }
        let names: Vec<_> = repo.list().unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names.first().map(String::as_str), Some("Build 0"));
        assert_eq!(names.last().map(String::as_str), Some("Build 10"));
    }

    #[test]
    fn test_get_missing() {
        let repo = MemoryRepository::new();
        let err = repo.get(&BuildId::new("7")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        let err = repo.get(&BuildId::new("abc")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_update_unknown_build() {
        let mut repo = MemoryRepository::new();
        let err = repo.update(build("A").with_id(BuildId::new("3"))).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let mut repo = MemoryRepository::new();
        assert!(!repo.delete(&BuildId::new("1")).unwrap());
    }

    #[test]
    fn test_from_builds_rejects_non_numeric_id() {
        let err = MemoryRepository::from_builds(vec![build("A")]).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_json_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("builds.json")).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_json_file_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("builds.json");

        let stored = {
            let mut repo = JsonFileRepository::open(&path).unwrap();
            repo.insert(build("Office")).unwrap();
            repo.insert(build("Gaming")).unwrap()
        };

        let repo = JsonFileRepository::open(&path).unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
        assert_eq!(repo.get(&stored.id).unwrap(), stored);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.trim_start().starts_with('['));
    }

    #[test]
    fn test_json_file_failed_write_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where the store expects a directory.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let mut repo = JsonFileRepository::open(blocker.join("builds.json")).unwrap();
        let err = repo.insert(build("Office")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_json_file_failed_update_keeps_stored_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("builds.json");
        let mut repo = JsonFileRepository::open(&path).unwrap();
        let stored = repo.insert(build("Office")).unwrap();

        // Occupy the temp file path with a directory so the rename fails.
        std::fs::create_dir(path.with_extension("json.tmp")).unwrap();
        let mut renamed = stored.clone();
        renamed.name = "Gaming".to_string();
        assert!(repo.update(renamed).is_err());
        assert_eq!(repo.get(&stored.id).unwrap(), stored);
    }

    #[test]
    fn test_json_file_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("builds.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonFileRepository::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
