use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::errors::WikiError;
use crate::titles;
use crate::types::Page;

/// Flat-file persistence for pages.
///
/// Every page lives as `<title>.txt` directly under the root directory;
/// there is no metadata, no atomicity, and no coordination between
/// concurrent writers (last write wins).
#[derive(Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        debug!("creating PageStore rooted at {:?}", root);
        Self { root }
    }

    fn page_path(&self, title: &str) -> PathBuf {
        self.root.join(format!("{}.txt", title))
    }

    /// Write the page body to its file, creating or truncating it.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title);
        debug!("writing page '{}' to {:?}", page.title, path);

        let mut file = open_owner_only(&path).map_err(|e| {
            error!("failed to open {:?} for writing: {}", path, e);
            WikiError::Io(e)
        })?;
        file.write_all(page.body.as_bytes()).map_err(|e| {
            error!("failed to write {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("saved page '{}' ({} bytes)", page.title, page.body.len());
        Ok(())
    }

    /// Read a page fully into memory.
    ///
    /// A missing file is reported as `NotFound` so callers can treat the
    /// page as not yet created; any other failure is an I/O error.
    pub fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        debug!("reading page '{}' from {:?}", title, path);

        match fs::read_to_string(&path) {
            Ok(body) => {
                info!("loaded page '{}' ({} bytes)", title, body.len());
                Ok(Page {
                    title: title.to_string(),
                    body,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("page '{}' does not exist", title);
                Err(WikiError::NotFound)
            }
            Err(e) => {
                error!("failed to read {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    /// Check whether a page file exists for the title.
    pub fn exists(&self, title: &str) -> bool {
        self.page_path(title).is_file()
    }

    /// List the titles of all stored pages, sorted case-insensitively.
    ///
    /// Only `*.txt` files whose stems are valid titles count as pages;
    /// anything else in the directory is skipped.
    pub fn list(&self) -> Result<Vec<String>, WikiError> {
        let mut result = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(OsStr::to_str) != Some("txt") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(OsStr::to_str) else {
                continue;
            };
            if !titles::is_valid(stem) {
                debug!("skipping non-page file {:?}", path);
                continue;
            }
            result.push(stem.to_string());
        }
        result.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
        info!("listed {} pages under {:?}", result.len(), self.root);
        Ok(result)
    }
}

/// Open a page file for create-or-truncate writing with owner-only
/// permission (0600). The mode applies only when the file is created.
#[cfg(unix)]
fn open_owner_only(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_owner_only(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store(dir: &tempfile::TempDir) -> PageStore {
        PageStore::new(dir.path().to_path_buf())
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        let page = Page {
            title: "TestPage".to_string(),
            body: "hello".to_string(),
        };
        store.save(&page).expect("save page");

        let loaded = store.load("TestPage").expect("load page");
        assert_eq!(loaded, page);
    }

    #[test]
    fn load_missing_page_is_not_found() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        assert!(matches!(store.load("Missing"), Err(WikiError::NotFound)));
    }

    #[test]
    fn load_non_utf8_file_is_an_io_error() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        // present on disk, but not readable as UTF-8 text
        fs::write(dir.path().join("Binary.txt"), [0xff, 0xfe, 0x01]).expect("write bytes");

        assert!(matches!(store.load("Binary"), Err(WikiError::Io(_))));
    }

    #[test]
    fn save_truncates_existing_file() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        store
            .save(&Page {
                title: "Note".to_string(),
                body: "a longer first body".to_string(),
            })
            .expect("first save");
        store
            .save(&Page {
                title: "Note".to_string(),
                body: "short".to_string(),
            })
            .expect("second save");

        assert_eq!(store.load("Note").expect("load").body, "short");
    }

    #[test]
    fn save_writes_title_dot_txt() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        store
            .save(&Page {
                title: "Layout".to_string(),
                body: "x".to_string(),
            })
            .expect("save");

        assert!(dir.path().join("Layout.txt").is_file());
    }

    #[test]
    fn exists_reflects_saved_pages() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        assert!(!store.exists("FrontPage"));
        store
            .save(&Page {
                title: "FrontPage".to_string(),
                body: "welcome".to_string(),
            })
            .expect("save");
        assert!(store.exists("FrontPage"));
    }

    #[test]
    fn list_returns_sorted_titles() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        for title in ["zebra", "Alpha", "mango"] {
            store
                .save(&Page {
                    title: title.to_string(),
                    body: String::new(),
                })
                .expect("save");
        }

        assert_eq!(store.list().expect("list"), vec!["Alpha", "mango", "zebra"]);
    }

    #[test]
    fn list_skips_non_page_files() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        store
            .save(&Page {
                title: "Real".to_string(),
                body: String::new(),
            })
            .expect("save");
        fs::write(dir.path().join("notes.md"), "not a page").expect("write md");
        fs::write(dir.path().join("bad title.txt"), "invalid stem").expect("write bad");
        fs::write(dir.path().join(".hidden.txt"), "dotfile").expect("write hidden");
        fs::create_dir(dir.path().join("subdir.txt")).expect("create dir");

        assert_eq!(store.list().expect("list"), vec!["Real"]);
    }

    #[test]
    fn load_body_preserves_newlines() {
        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        let body = "line one\nline two\n";
        store
            .save(&Page {
                title: "Multi".to_string(),
                body: body.to_string(),
            })
            .expect("save");

        assert_eq!(store.load("Multi").expect("load").body, body);
    }

    #[cfg(unix)]
    #[test]
    fn save_creates_owner_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("create temp dir");
        let store = store(&dir);

        store
            .save(&Page {
                title: "Secret".to_string(),
                body: "x".to_string(),
            })
            .expect("save");

        let mode = fs::metadata(dir.path().join("Secret.txt"))
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
