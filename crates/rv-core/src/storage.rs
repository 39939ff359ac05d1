//! Persistence backends for the world graph.

use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::world::{World, WorldSnapshot};

/// A place the relationship graph is loaded from and committed to.
pub trait Storage {
    /// Load the full graph.
    fn load(&mut self) -> StoreResult<World>;

    /// Persist the full graph. Either the whole graph is written or nothing is.
    fn commit(&mut self, world: &World) -> StoreResult<()>;

    /// Release the connection. Safe to call more than once.
    fn release(&mut self);

    /// Human-readable location of the store, for logs.
    fn describe(&self) -> String;
}

/// Keeps the graph in memory only.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    world: World,
    commits: usize,
}

impl MemoryStorage {
    /// Wrap an in-memory world.
    pub fn new(world: World) -> Self {
        Self { world, commits: 0 }
    }

    /// Number of successful commits.
    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl Storage for MemoryStorage {
    fn load(&mut self) -> StoreResult<World> {
        Ok(self.world.clone())
    }

    fn commit(&mut self, world: &World) -> StoreResult<()> {
        self.world = world.clone();
        self.commits += 1;
        Ok(())
    }

    fn release(&mut self) {}

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// A world JSON file guarded by an OS lock on a `<file>.lock` sibling.
///
/// The lock is taken on open and dropped on [`Storage::release`], on drop,
/// and by the kernel when the process dies. A lock file left behind by a
/// dead session holds no lock and is reused.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Option<File>,
}

impl JsonFileStorage {
    /// Open `path` for exclusive use by this session.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(StoreError::Unavailable {
                source: io::Error::new(ErrorKind::NotFound, "no world file"),
                path,
            });
        }

        let lock_path = sibling(&path, "lock");
        let opened = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path);
        let mut lock = match opened {
            Ok(file) => file,
            Err(source) => return Err(StoreError::Unavailable { path, source }),
        };
        match lock.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Err(StoreError::Locked(path)),
            Err(TryLockError::Error(source)) => {
                return Err(StoreError::Unavailable { path, source });
            }
        }
        if let Err(error) = record_owner(&mut lock) {
            tracing::warn!(path = %lock_path.display(), %error, "could not record lock owner");
        }
        tracing::debug!(path = %path.display(), "world store locked");

        Ok(Self {
            path,
            lock: Some(lock),
        })
    }

    /// Write a fresh world file without taking the lock.
    pub fn create(path: impl AsRef<Path>, world: &World) -> StoreResult<()> {
        write_atomically(path.as_ref(), world)
    }
}

impl Storage for JsonFileStorage {
    fn load(&mut self) -> StoreResult<World> {
        if self.lock.is_none() {
            return Err(StoreError::Closed);
        }
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: WorldSnapshot = serde_json::from_str(&text)?;
        Ok(World::from_snapshot(snapshot)?)
    }

    fn commit(&mut self, world: &World) -> StoreResult<()> {
        if self.lock.is_none() {
            return Err(StoreError::Closed);
        }
        write_atomically(&self.path, world)
    }

    fn release(&mut self) {
        let Some(lock) = self.lock.take() else {
            return;
        };
        match lock.unlock() {
            Ok(()) => tracing::debug!(path = %self.path.display(), "world store released"),
            Err(error) => tracing::warn!(
                path = %self.path.display(),
                %error,
                "could not unlock world store"
            ),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl Drop for JsonFileStorage {
    fn drop(&mut self) {
        self.release();
    }
}

/// Replace the lock file content with this process id.
fn record_owner(lock: &mut File) -> io::Result<()> {
    lock.set_len(0)?;
    writeln!(lock, "{}", std::process::id())
}

/// Write to a temp sibling, then rename over the target.
fn write_atomically(path: &Path, world: &World) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(&world.to_snapshot())?;
    let tmp = sibling(path, "tmp");
    let unavailable = |source| StoreError::Unavailable {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, json).map_err(unavailable)?;
    fs::rename(&tmp, path).map_err(unavailable)
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use tempfile::TempDir;

    fn world_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("world.json");
        JsonFileStorage::create(&path, &sample::marketplace().unwrap()).unwrap();
        path
    }

    #[test]
    fn memory_storage_counts_commits() {
        let mut storage = MemoryStorage::new(sample::marketplace().unwrap());
        let world = storage.load().unwrap();
        storage.commit(&world).unwrap();
        assert_eq!(storage.commits(), 1);
    }

    #[test]
    fn json_storage_roundtrips_world() {
        let dir = TempDir::new().unwrap();
        let path = world_file(&dir);

        let mut storage = JsonFileStorage::open(&path).unwrap();
        let world = storage.load().unwrap();
        assert_eq!(world.player_location().map(|id| id.as_str()), Some("marketplace"));
        assert!(world.validate().is_ok());
    }

    #[test]
    fn second_open_is_locked_out() {
        let dir = TempDir::new().unwrap();
        let path = world_file(&dir);

        let _first = JsonFileStorage::open(&path).unwrap();
        let second = JsonFileStorage::open(&path);
        assert!(matches!(second, Err(StoreError::Locked(_))));
    }

    #[test]
    fn drop_releases_lock() {
        let dir = TempDir::new().unwrap();
        let path = world_file(&dir);

        {
            let _storage = JsonFileStorage::open(&path).unwrap();
            assert!(sibling(&path, "lock").exists());
        }
        assert!(JsonFileStorage::open(&path).is_ok());
    }

    #[test]
    fn release_lets_another_session_in() {
        let dir = TempDir::new().unwrap();
        let path = world_file(&dir);

        let mut first = JsonFileStorage::open(&path).unwrap();
        first.release();
        assert!(JsonFileStorage::open(&path).is_ok());
    }

    #[test]
    fn lock_file_without_owner_is_reclaimed() {
        let dir = TempDir::new().unwrap();
        let path = world_file(&dir);
        fs::write(sibling(&path, "lock"), "4242\n").unwrap();

        let mut storage = JsonFileStorage::open(&path).unwrap();
        assert!(storage.load().is_ok());
        let owner = fs::read_to_string(sibling(&path, "lock")).unwrap();
        assert_eq!(owner.trim(), std::process::id().to_string());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let result = JsonFileStorage::open(dir.path().join("nope.json"));
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("world.json");
        fs::write(&path, "{ not json").unwrap();

        let mut storage = JsonFileStorage::open(&path).unwrap();
        assert!(matches!(storage.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn released_storage_refuses_commits() {
        let dir = TempDir::new().unwrap();
        let path = world_file(&dir);

        let mut storage = JsonFileStorage::open(&path).unwrap();
        let world = storage.load().unwrap();
        storage.release();
        assert!(matches!(storage.commit(&world), Err(StoreError::Closed)));
    }
}
