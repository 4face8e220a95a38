//! Repository operations.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::index::{Index, IndexEntry};
use crate::infra::{read_file, write_file_atomic};
use crate::log::{LogIterator, LogOptions};
use crate::objects::oid::OID_HEX_LEN;
use crate::objects::{Blob, Commit, ObjectStore, Oid};
use crate::refs::HeadRef;
use crate::show::CommitDiff;

/// Name of the repository directory inside the working directory.
pub const REPO_DIR: &str = ".groot";

const OBJECTS_DIR: &str = "objects";
const HEAD_FILE: &str = "HEAD";
const INDEX_FILE: &str = "index";

/// What [`Repository::init`] found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// A new repository was created.
    Created,
    /// A repository already existed and was left as is.
    AlreadyInitialized,
}

/// A groot repository.
///
/// This is the main entry point: it owns the paths of the object store,
/// HEAD and the staging index, and every operation goes through it.
#[derive(Debug)]
pub struct Repository {
    /// The root directory of the working tree.
    work_dir: PathBuf,
    /// The path to the `.groot` directory.
    repo_dir: PathBuf,
    /// Whether this handle created the repository.
    init_status: InitStatus,
}

impl Repository {
    /// Initializes a repository in `path`, or opens the one already there.
    ///
    /// Creates `.groot/objects`, an empty `HEAD` and an empty `index` if
    /// they are missing. Running it on an initialized repository changes
    /// nothing and reports [`InitStatus::AlreadyInitialized`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use groot::{InitStatus, Repository};
    ///
    /// let repo = Repository::init("path/to/project").unwrap();
    /// if repo.init_status() == InitStatus::AlreadyInitialized {
    ///     println!("already initialized");
    /// }
    /// ```
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo_dir = path.join(REPO_DIR);

        fs::create_dir_all(repo_dir.join(OBJECTS_DIR))?;

        let created = create_new_file(&repo_dir.join(HEAD_FILE), b"")?;
        create_new_file(&repo_dir.join(INDEX_FILE), b"[]")?;

        let init_status = if created {
            InitStatus::Created
        } else {
            InitStatus::AlreadyInitialized
        };

        let work_dir = path.canonicalize()?;
        let repo_dir = work_dir.join(REPO_DIR);

        match init_status {
            InitStatus::Created => info!(path = %repo_dir.display(), "initialized repository"),
            InitStatus::AlreadyInitialized => {
                debug!(path = %repo_dir.display(), "repository already initialized")
            }
        }

        Ok(Repository {
            work_dir,
            repo_dir,
            init_status,
        })
    }

    /// Opens an existing repository without creating anything.
    ///
    /// # Errors
    ///
    /// `Error::NotARepository` if `path` has no `.groot` directory with an
    /// `objects` directory and a `HEAD` file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let work_dir = path
            .canonicalize()
            .map_err(|_| Error::NotARepository(path.to_path_buf()))?;
        let repo_dir = work_dir.join(REPO_DIR);

        if !repo_dir.join(OBJECTS_DIR).is_dir() || !repo_dir.join(HEAD_FILE).is_file() {
            return Err(Error::NotARepository(path.to_path_buf()));
        }

        Ok(Repository {
            work_dir,
            repo_dir,
            init_status: InitStatus::AlreadyInitialized,
        })
    }

    /// Returns the path to the working directory.
    pub fn path(&self) -> &Path {
        &self.work_dir
    }

    /// Returns the path to the `.groot` directory.
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Returns whether opening this handle created the repository.
    pub fn init_status(&self) -> InitStatus {
        self.init_status
    }

    /// Returns the object store.
    pub fn object_store(&self) -> ObjectStore {
        ObjectStore::new(self.repo_dir.join(OBJECTS_DIR))
    }

    fn head_ref(&self) -> HeadRef {
        HeadRef::new(self.repo_dir.join(HEAD_FILE))
    }

    fn index_path(&self) -> PathBuf {
        self.repo_dir.join(INDEX_FILE)
    }

    /// Reads the staging index. A missing index file reads as empty.
    pub fn read_index(&self) -> Result<Index> {
        match read_file(self.index_path()) {
            Ok(data) => Index::parse(&data),
            Err(Error::PathNotFound(_)) => Ok(Index::empty()),
            Err(e) => Err(e),
        }
    }

    fn write_index(&self, index: &Index) -> Result<()> {
        write_file_atomic(self.index_path(), &index.to_bytes()?)
    }

    /// Returns the staged entries in the order they were added.
    pub fn staged(&self) -> Result<Vec<IndexEntry>> {
        Ok(self.read_index()?.into_entries())
    }

    /// Stages a file for the next commit.
    ///
    /// Relative paths are resolved against the working directory. The file's
    /// content is stored as a blob and an entry is appended to the index,
    /// even if the same path is already staged.
    ///
    /// Returns the Oid of the stored content.
    ///
    /// # Errors
    ///
    /// `Error::PathNotFound` if the file does not exist, or `Error::Io` if it
    /// cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use groot::Repository;
    ///
    /// let repo = Repository::init(".").unwrap();
    /// let oid = repo.add("notes.txt").unwrap();
    /// println!("{}", oid);
    /// ```
    pub fn add<P: AsRef<Path>>(&self, path: P) -> Result<Oid> {
        let path = path.as_ref();
        let full_path = self.work_dir.join(path);

        let content = read_file(&full_path).map_err(|e| match e {
            Error::PathNotFound(_) => Error::PathNotFound(path.to_path_buf()),
            e => e,
        })?;

        let oid = self.object_store().put(&content)?;
        let staged_path = self.staged_path(path, &full_path);

        let mut index = self.read_index()?;
        index.stage(staged_path.clone(), oid);
        self.write_index(&index)?;

        info!(path = %staged_path, oid = %oid.short(), "staged file");
        Ok(oid)
    }

    /// Picks the path recorded in the index for a file given to `add`.
    ///
    /// Paths inside the working directory are recorded relative to it;
    /// anything else is recorded as given. Separators are always `/`.
    fn staged_path(&self, path: &Path, full_path: &Path) -> String {
        let relative = if path.is_absolute() {
            full_path
                .canonicalize()
                .ok()
                .and_then(|p| p.strip_prefix(&self.work_dir).ok().map(Path::to_path_buf))
        } else {
            None
        };

        let path = relative.as_deref().unwrap_or(path);
        let parts: Vec<_> = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        if path.is_absolute() {
            path.to_string_lossy().into_owned()
        } else {
            parts.join("/")
        }
    }

    /// Records the staged files as a new commit and makes it HEAD.
    ///
    /// The new commit's parent is the current HEAD (none for the first
    /// commit). Committing with nothing staged is allowed and records an
    /// empty file list. The index is cleared afterwards.
    ///
    /// The commit object, HEAD and the cleared index are written in that
    /// order, each with its own atomic rename. The last two are not atomic
    /// with respect to each other: if the index write fails after HEAD has
    /// moved, the new commit stands and its entries stay staged.
    ///
    /// Returns the Oid of the new commit.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use groot::Repository;
    ///
    /// let repo = Repository::init(".").unwrap();
    /// repo.add("notes.txt").unwrap();
    /// let oid = repo.commit("Add notes").unwrap();
    /// ```
    pub fn commit(&self, message: &str) -> Result<Oid> {
        let mut index = self.read_index()?;
        let head = self.head_ref();
        let parent = head.read()?;

        let data = Commit::encode(message, index.entries(), parent)?;
        let oid = self.object_store().put(&data)?;

        // HEAD first: a failure after this point leaves entries staged,
        // never a cleared index with no commit holding them.
        head.write(&oid)?;
        index.clear();
        self.write_index(&index)?;

        info!(
            oid = %oid.short(),
            parent = ?parent.map(|p| p.short()),
            "created commit"
        );
        Ok(oid)
    }

    /// Returns the current HEAD commit, or `None` before the first commit.
    pub fn head(&self) -> Result<Option<Oid>> {
        self.head_ref().read()
    }

    /// Retrieves a commit by its Oid.
    ///
    /// # Errors
    ///
    /// - `Error::ObjectNotFound` if no such object exists.
    /// - `Error::InvalidObject` if the object is not a commit.
    pub fn get_commit(&self, oid: &Oid) -> Result<Commit> {
        self.object_store().read_commit(oid)
    }

    /// Retrieves a blob by its Oid.
    pub fn blob(&self, oid: &Oid) -> Result<Blob> {
        self.object_store().read_blob(oid)
    }

    /// Resolves a full or abbreviated (at least 4 characters) hex Oid.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidOid` if the string is malformed or the prefix is
    ///   ambiguous.
    /// - `Error::ObjectNotFound` if no object matches the prefix.
    pub fn resolve_short_oid(&self, short_oid: &str) -> Result<Oid> {
        if short_oid.len() == OID_HEX_LEN {
            return Oid::from_hex(short_oid);
        }

        let matches = self.object_store().find_objects_by_prefix(short_oid)?;

        match matches.as_slice() {
            [] => Err(Error::ObjectNotFound(short_oid.to_string())),
            [oid] => Ok(*oid),
            _ => Err(Error::InvalidOid(format!(
                "ambiguous short OID: {} ({} matches)",
                short_oid,
                matches.len()
            ))),
        }
    }

    /// Returns an iterator over the history, starting at the current HEAD.
    ///
    /// HEAD is read once, here; the iterator does not observe later commits.
    pub fn log(&self) -> Result<LogIterator> {
        self.log_with_options(LogOptions::default())
    }

    /// Returns an iterator over the history with options applied.
    pub fn log_with_options(&self, options: LogOptions) -> Result<LogIterator> {
        let start = match options.get_from() {
            Some(_) => None,
            None => self.head()?,
        };
        Ok(LogIterator::with_options(self.object_store(), start, options))
    }

    /// Computes what the commit named by `id` changed relative to its parent.
    ///
    /// `id` may be a full Oid or an unambiguous prefix of at least 4 hex
    /// characters. Returns `Ok(None)` if no such commit exists, including
    /// when `id` is not a well-formed Oid at all.
    ///
    /// # Errors
    ///
    /// Fails if `id` is an ambiguous prefix, names an object that is not a
    /// commit, or an object exists but cannot be read. Blobs or a parent
    /// missing from the store show up as [`FileChange::Missing`] entries.
    ///
    /// [`FileChange::Missing`]: crate::show::FileChange::Missing
    pub fn show_commit(&self, id: &str) -> Result<Option<CommitDiff>> {
        let well_formed = (4..=OID_HEX_LEN).contains(&id.len())
            && id.chars().all(|c| c.is_ascii_hexdigit());
        if !well_formed {
            debug!(id, "malformed commit id");
            return Ok(None);
        }

        let oid = match self.resolve_short_oid(id) {
            Ok(oid) => oid,
            Err(Error::ObjectNotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        let commit = match self.get_commit(&oid) {
            Ok(commit) => commit,
            Err(Error::ObjectNotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        CommitDiff::compute(&self.object_store(), commit).map(Some)
    }
}

/// Creates `path` with `content` unless it already exists.
///
/// Returns `true` if the file was created.
fn create_new_file(path: &Path, content: &[u8]) -> Result<bool> {
    match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(mut file) => {
            file.write_all(content)?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(Error::Io(e)),
    }
}
