use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations the swapper needs
pub trait FolderOps {
    fn is_dir(&self, path: &Path) -> bool;

    fn exists(&self, path: &Path) -> bool;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Names of the immediate subdirectories of `dir`
    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<String>>;

    /// Whether both paths resolve to the same directory on disk
    fn same_dir(&self, a: &Path, b: &Path) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

pub struct StdFolders;

impl FolderOps for StdFolders {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupied
        fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        debug!("Renaming {} -> {}", from.display(), to.display());
        fs::rename(from, to)
    }

    fn list_dirs(&self, dir: &Path) -> io::Result<Vec<String>> {
        // RUST LEARNING: `filter_map()` combines filter + map, dropping None values
        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();
        names.sort();
        Ok(names)
    }
}
