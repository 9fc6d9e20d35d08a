//! Sequential directory walker built on jwalk.

use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use logsweep_core::{ScanError, SweepConfig};

/// A non-directory entry found during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Base name, used for pattern matching.
    pub file_name: String,
    /// Depth below the root (the root itself is 0).
    pub depth: usize,
}

impl Candidate {
    /// Create a candidate, deriving the base name from the path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = base_name(&path);
        Self {
            path,
            file_name,
            depth: 0,
        }
    }
}

/// Walks a directory tree one entry at a time.
///
/// Entries are visited serially in file name order. Directories are
/// recursed into but never yielded; everything else, including symlinks
/// and hidden files, is yielded as a [`Candidate`].
#[derive(Debug, Clone)]
pub struct LogWalker {
    root: PathBuf,
    max_depth: Option<usize>,
    follow_links: bool,
}

impl LogWalker {
    /// Create a walker rooted at `root` with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
            follow_links: false,
        }
    }

    /// Create a walker from the traversal settings of a sweep config.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self::new(config.effective_root())
            .with_max_depth(config.max_depth)
            .with_follow_links(config.follow_links)
    }

    /// Limit how deep the walk descends.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Follow symbolic links.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Root of the walk.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start walking.
    ///
    /// Fails immediately if the root cannot be inspected. Later walk errors
    /// are yielded in place; callers decide whether to stop.
    pub fn candidates(&self) -> Result<Candidates, ScanError> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| ScanError::io(&self.root, e))?;

        if !metadata.is_dir() {
            let single = Candidate::from_path(self.root.clone());
            return Ok(Candidates {
                inner: Box::new(std::iter::once(Ok(single))),
            });
        }

        let walker = WalkDir::new(&self.root)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(self.follow_links)
            .min_depth(0)
            .max_depth(self.max_depth.unwrap_or(usize::MAX));

        let root = self.root.clone();
        let inner = walker.into_iter().filter_map(move |entry| match entry {
            Ok(mut entry) => {
                let path = entry.path();
                if entry.file_type().is_dir() {
                    // jwalk still yields a directory it failed to read
                    if let Some(err) = entry.read_children_error.take() {
                        return Some(Err(walk_error(err, &path)));
                    }
                    debug!(path = %path.display(), "entering directory");
                    return None;
                }
                Some(Ok(Candidate {
                    file_name: entry.file_name().to_string_lossy().into_owned(),
                    depth: entry.depth(),
                    path,
                }))
            }
            Err(err) => Some(Err(walk_error(err, &root))),
        });

        Ok(Candidates {
            inner: Box::new(inner),
        })
    }
}

/// Iterator over the candidates of a walk.
pub struct Candidates {
    inner: Box<dyn Iterator<Item = Result<Candidate, ScanError>>>,
}

impl Iterator for Candidates {
    type Item = Result<Candidate, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Map a jwalk error, classifying it by I/O kind when there is one.
fn walk_error(err: jwalk::Error, fallback: &Path) -> ScanError {
    let path = err
        .path()
        .map_or_else(|| fallback.to_path_buf(), Path::to_path_buf);
    let message = err.to_string();

    match err.into_io_error() {
        Some(source) => ScanError::io(path, source),
        None => ScanError::Walk { path, message },
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(walker: &LogWalker) -> Vec<String> {
        walker
            .candidates()
            .unwrap()
            .map(|c| c.unwrap().file_name)
            .collect()
    }

    #[test]
    fn test_walk_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("archive")).unwrap();
        fs::write(temp.path().join("archive/old-20240101.log"), "x").unwrap();
        fs::write(temp.path().join("app-20240301.log"), "x").unwrap();

        let found = names(&LogWalker::new(temp.path()));

        assert_eq!(found, vec!["app-20240301.log", "old-20240101.log"]);
    }

    #[test]
    fn test_walk_includes_hidden_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".app-20240301.log"), "x").unwrap();

        let found = names(&LogWalker::new(temp.path()));

        assert_eq!(found, vec![".app-20240301.log"]);
    }

    #[test]
    fn test_walk_respects_max_depth() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::write(temp.path().join("top.log"), "x").unwrap();
        fs::write(temp.path().join("a/b/deep.log"), "x").unwrap();

        let found = names(&LogWalker::new(temp.path()).with_max_depth(Some(1)));

        assert_eq!(found, vec!["top.log"]);
    }

    #[test]
    fn test_walk_missing_root() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = LogWalker::new(&missing).candidates().err().unwrap();

        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_walk_file_root() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("app-20240301.log");
        fs::write(&file, "x").unwrap();

        let found: Vec<Candidate> = LogWalker::new(&file)
            .candidates()
            .unwrap()
            .map(Result::unwrap)
            .collect();

        assert_eq!(found, vec![Candidate::from_path(&file)]);
    }

    #[cfg(unix)]
    fn lock(dir: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(dir, fs::Permissions::from_mode(0o000)).unwrap();
        // Root ignores permission bits
        fs::read_dir(dir).is_err()
    }

    #[cfg(unix)]
    fn unlock(dir: &Path) {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_reports_unreadable_directory() {
        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("app-20240101.log"), "x").unwrap();
        fs::write(temp.path().join("app-20240301.log"), "x").unwrap();

        if !lock(&locked) {
            unlock(&locked);
            return;
        }
        let results: Vec<_> = LogWalker::new(temp.path()).candidates().unwrap().collect();
        unlock(&locked);

        let errors: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ScanError::PermissionDenied { .. }));
        assert_eq!(errors[0].path(), locked.as_path());

        let files: Vec<_> = results
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|c| c.file_name.as_str())
            .collect();
        assert_eq!(files, vec!["app-20240301.log"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_reports_unreadable_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("logs");
        fs::create_dir(&root).unwrap();

        if !lock(&root) {
            unlock(&root);
            return;
        }
        let first = LogWalker::new(&root).candidates().unwrap().next();
        unlock(&root);

        assert!(matches!(first, Some(Err(ScanError::PermissionDenied { .. }))));
    }

    #[test]
    fn test_from_config() {
        let config = SweepConfig::builder()
            .root("")
            .pattern("(?P<date>.*)")
            .keep_days(3i64)
            .max_depth(2usize)
            .build()
            .unwrap();

        let walker = LogWalker::from_config(&config);

        assert_eq!(walker.root(), Path::new("."));
        assert_eq!(walker.max_depth, Some(2));
    }
}
