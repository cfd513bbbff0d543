//! Links file cache with throttled, non-blocking reload.

use arc_swap::ArcSwap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, TryLockError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, trace, warn};

use super::source::LinkSource;
use crate::domain::link_map::LinkMap;
use crate::infrastructure::store::{self, LoadError};

/// Result of a single reload check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// This interval was already checked, or another reload holds the guard.
    Skipped,
    /// The file was checked and its modification time has not changed.
    Unchanged,
    /// A new snapshot was installed.
    Reloaded { entries: usize },
}

/// State owned by whichever task holds the reload guard.
#[derive(Debug)]
struct ReloadState {
    /// Modification time of the file behind the installed snapshot.
    modified: SystemTime,
}

/// Link source backed by a file on disk.
///
/// Reads are a single atomic load of the current snapshot. Each read may also
/// trigger a reload check, limited to one per `check_interval`: wall-clock
/// time is divided into buckets of that length and only the first read in a
/// new bucket looks at the file.
///
/// Only one check runs at a time. The guard is acquired with `try_lock`, so a
/// read that loses the race serves the current snapshot instead of waiting. A
/// failed reload is logged and the previous snapshot keeps being served; the
/// next bucket retries.
pub struct ReloadingLinks {
    path: PathBuf,
    check_interval: Duration,
    current: ArcSwap<LinkMap>,
    /// Last interval bucket a reload check ran in.
    last_checked: AtomicU64,
    reload: Mutex<ReloadState>,
}

impl ReloadingLinks {
    /// Loads the links file at `path` and returns a cache serving it.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of the initial load. There is no empty
    /// serving state, so a file that cannot be loaded at startup is fatal.
    pub fn new(path: impl Into<PathBuf>, check_interval: Duration) -> Result<Self, LoadError> {
        Self::new_at(path, check_interval, SystemTime::now())
    }

    /// Same as [`Self::new`] with an explicit current time.
    ///
    /// The interval bucket containing `now` counts as already checked.
    pub fn new_at(
        path: impl Into<PathBuf>,
        check_interval: Duration,
        now: SystemTime,
    ) -> Result<Self, LoadError> {
        let path = path.into();

        let modified = modified_time(&path)?;
        let links = store::load(&path)?;

        info!(
            path = %path.display(),
            entries = links.len(),
            "Loaded links"
        );

        Ok(Self {
            last_checked: AtomicU64::new(bucket(now, check_interval)),
            path,
            check_interval,
            current: ArcSwap::from_pointee(links),
            reload: Mutex::new(ReloadState { modified }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// Returns the current snapshot after an opportunistic reload check at `now`.
    ///
    /// Never returns an error: reload failures are logged and the previous
    /// snapshot is returned.
    pub fn links_at(&self, now: SystemTime) -> Arc<LinkMap> {
        match self.reload_if_changed(now) {
            Ok(ReloadOutcome::Reloaded { entries }) => {
                info!(path = %self.path.display(), entries, "Reloaded links");
            }
            Ok(ReloadOutcome::Unchanged) => {
                debug!(path = %self.path.display(), "Links file unchanged");
            }
            Ok(ReloadOutcome::Skipped) => {}
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to reload links, serving previous snapshot"
                );
            }
        }

        self.current.load_full()
    }

    /// Reloads the links file if a new interval bucket has started and the
    /// file's modification time changed since the last successful load.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of a failed stat or load. The installed
    /// snapshot is left untouched in that case.
    pub fn reload_if_changed(&self, now: SystemTime) -> Result<ReloadOutcome, LoadError> {
        let bucket = bucket(now, self.check_interval);
        if self.last_checked.load(Ordering::Acquire) == bucket {
            return Ok(ReloadOutcome::Skipped);
        }

        let mut state = match self.reload.try_lock() {
            Ok(state) => state,
            Err(TryLockError::WouldBlock) => {
                trace!("Reload already in progress");
                return Ok(ReloadOutcome::Skipped);
            }
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        // The previous guard holder may have just checked this bucket.
        if self.last_checked.swap(bucket, Ordering::AcqRel) == bucket {
            return Ok(ReloadOutcome::Skipped);
        }

        let modified = modified_time(&self.path)?;
        if modified == state.modified {
            return Ok(ReloadOutcome::Unchanged);
        }

        let links = store::load(&self.path)?;
        let entries = links.len();

        self.current.store(Arc::new(links));
        state.modified = modified;

        Ok(ReloadOutcome::Reloaded { entries })
    }
}

impl LinkSource for ReloadingLinks {
    fn links(&self) -> Arc<LinkMap> {
        self.links_at(SystemTime::now())
    }
}

/// Index of the `interval`-long wall-clock bucket containing `now`.
fn bucket(now: SystemTime, interval: Duration) -> u64 {
    let since_epoch = now.duration_since(UNIX_EPOCH).unwrap_or_default();
    let bucket = since_epoch.as_millis() / interval.as_millis().max(1);
    u64::try_from(bucket).unwrap_or(u64::MAX)
}

fn modified_time(path: &Path) -> Result<SystemTime, LoadError> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    const INTERVAL: Duration = Duration::from_secs(5);

    fn t0() -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn write_links(path: &Path, contents: &str, modified: SystemTime) {
        fs::write(path, contents).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    fn setup(contents: &str) -> (TempDir, PathBuf, ReloadingLinks) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.json");
        write_links(&path, contents, t0() - Duration::from_secs(60));
        let cache = ReloadingLinks::new_at(&path, INTERVAL, t0()).unwrap();
        (dir, path, cache)
    }

    fn target_of(map: &LinkMap, name: &str) -> Option<String> {
        map.get(name).map(|t| t.as_str().to_string())
    }

    #[test]
    fn test_bucket_rounds_down() {
        assert_eq!(bucket(t0(), INTERVAL), bucket(t0() + Duration::from_millis(4_999), INTERVAL));
        assert_ne!(bucket(t0(), INTERVAL), bucket(t0() + INTERVAL, INTERVAL));
    }

    #[test]
    fn test_initial_load_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ReloadingLinks::new(dir.path().join("missing.json"), INTERVAL);
        assert!(matches!(missing, Err(LoadError::Io { .. })));

        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        let invalid = ReloadingLinks::new(&path, INTERVAL);
        assert!(matches!(invalid, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_serves_initial_snapshot() {
        let (_dir, _path, cache) = setup(r#"{"a": "http://dst/a"}"#);
        let links = cache.links_at(t0());
        assert_eq!(target_of(&links, "a").as_deref(), Some("http://dst/a"));
    }

    #[test]
    fn test_change_is_not_seen_before_next_bucket() {
        let (_dir, path, cache) = setup(r#"{"a": "http://dst/old"}"#);
        write_links(&path, r#"{"a": "http://dst/new"}"#, t0());

        let before = t0() + Duration::from_millis(4_999);
        assert_eq!(cache.reload_if_changed(before).unwrap(), ReloadOutcome::Skipped);
        assert_eq!(
            target_of(&cache.links_at(before), "a").as_deref(),
            Some("http://dst/old")
        );

        let after = t0() + INTERVAL;
        assert_eq!(
            target_of(&cache.links_at(after), "a").as_deref(),
            Some("http://dst/new")
        );
    }

    #[test]
    fn test_at_most_one_check_per_bucket() {
        let (_dir, path, cache) = setup(r#"{"a": "http://dst/a"}"#);
        let next = t0() + INTERVAL;

        assert_eq!(cache.reload_if_changed(next).unwrap(), ReloadOutcome::Unchanged);

        write_links(&path, r#"{"a": "http://dst/b"}"#, t0());
        assert_eq!(cache.reload_if_changed(next).unwrap(), ReloadOutcome::Skipped);

        assert_eq!(
            cache.reload_if_changed(next + INTERVAL).unwrap(),
            ReloadOutcome::Reloaded { entries: 1 }
        );
    }

    #[test]
    fn test_unchanged_modification_time_skips_load() {
        let (_dir, path, cache) = setup(r#"{"a": "http://dst/a"}"#);
        write_links(
            &path,
            r#"{"a": "http://dst/ignored"}"#,
            t0() - Duration::from_secs(60),
        );

        assert_eq!(
            cache.reload_if_changed(t0() + INTERVAL).unwrap(),
            ReloadOutcome::Unchanged
        );
        assert_eq!(
            target_of(&cache.links_at(t0() + INTERVAL), "a").as_deref(),
            Some("http://dst/a")
        );
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let (_dir, path, cache) = setup(r#"{"a": "http://dst/a"}"#);

        write_links(&path, r#"{"a": "not a url"}"#, t0());
        assert!(cache.reload_if_changed(t0() + INTERVAL).is_err());

        let links = cache.links_at(t0() + INTERVAL * 2);
        assert_eq!(target_of(&links, "a").as_deref(), Some("http://dst/a"));

        // fixed file is picked up on a later bucket
        write_links(&path, r#"{"a": "http://dst/fixed"}"#, t0() + INTERVAL);
        let links = cache.links_at(t0() + INTERVAL * 3);
        assert_eq!(target_of(&links, "a").as_deref(), Some("http://dst/fixed"));
    }

    #[test]
    fn test_deleted_file_keeps_previous_snapshot() {
        let (_dir, path, cache) = setup(r#"{"a": "http://dst/a"}"#);
        fs::remove_file(&path).unwrap();

        let err = cache.reload_if_changed(t0() + INTERVAL).unwrap_err();
        assert!(err.is_io());
        assert_eq!(cache.links_at(t0() + INTERVAL * 2).len(), 1);
    }

    #[test]
    fn test_busy_guard_skips_without_consuming_bucket() {
        let (_dir, path, cache) = setup(r#"{"a": "http://dst/a"}"#);
        write_links(&path, r#"{"a": "http://dst/b"}"#, t0());
        let next = t0() + INTERVAL;

        {
            let _held = cache.reload.lock().unwrap();
            assert_eq!(cache.reload_if_changed(next).unwrap(), ReloadOutcome::Skipped);
            assert_eq!(
                target_of(&cache.links_at(next), "a").as_deref(),
                Some("http://dst/a")
            );
        }

        assert_eq!(
            cache.reload_if_changed(next).unwrap(),
            ReloadOutcome::Reloaded { entries: 1 }
        );
    }

    #[test]
    fn test_held_snapshot_survives_reload() {
        let (_dir, path, cache) = setup(r#"{"a": "http://dst/a"}"#);
        let held = cache.links_at(t0());

        write_links(&path, r#"{"b": "http://dst/b"}"#, t0());
        let fresh = cache.links_at(t0() + INTERVAL);

        assert_eq!(target_of(&held, "a").as_deref(), Some("http://dst/a"));
        assert!(held.get("b").is_none());
        assert!(fresh.get("a").is_none());
        assert_eq!(target_of(&fresh, "b").as_deref(), Some("http://dst/b"));
    }

    #[test]
    fn test_concurrent_reads_see_whole_snapshots() {
        let old = r#"{"a": "http://dst/1", "b": "http://dst/1"}"#;
        let new = r#"{"a": "http://dst/2", "b": "http://dst/2", "c": "http://dst/2"}"#;
        let (_dir, path, cache) = setup(old);
        write_links(&path, new, t0());

        let old_map = store::parse(Path::new("old.json"), old).unwrap();
        let new_map = store::parse(Path::new("new.json"), new).unwrap();
        let next = t0() + INTERVAL;

        std::thread::scope(|s| {
            for _ in 0..16 {
                s.spawn(|| {
                    for _ in 0..200 {
                        let links = cache.links_at(next);
                        assert!(*links == old_map || *links == new_map);
                    }
                });
            }
        });

        assert_eq!(*cache.links_at(next), new_map);
    }
}
