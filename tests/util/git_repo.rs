use std::fs;
use std::path::{Path, PathBuf};

use git2::{BranchType, Oid, Repository, Signature};

/// A real repository on disk, built with libgit2.
pub struct GitRepo {
    pub dir: PathBuf,
    pub repo: Repository,
}

impl GitRepo {
    pub fn init(dir: &Path) -> Self {
        fs::create_dir_all(dir).unwrap();
        let repo = Repository::init(dir).unwrap();
        Self {
            dir: dir.to_path_buf(),
            repo,
        }
    }

    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn stage(&self, name: &str) {
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
    }

    /// Stages everything and commits it on HEAD.
    pub fn commit_all(&self, message: &str) -> Oid {
        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("test", "test@example.com").unwrap();

        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parents: Vec<_> = parents.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    pub fn current_branch(&self) -> String {
        self.repo.head().unwrap().shorthand().unwrap().to_string()
    }

    /// Creates a local branch `name` at HEAD and makes it the upstream of the current branch.
    pub fn track_new_branch(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(name, &head, false).unwrap();
        let mut current = self
            .repo
            .find_branch(&self.current_branch(), BranchType::Local)
            .unwrap();
        current.set_upstream(Some(name)).unwrap();
    }

    pub fn detach_head(&self) {
        let oid = self.repo.head().unwrap().target().unwrap();
        self.repo.set_head_detached(oid).unwrap();
    }
}

/// Creates `dir` with an empty `.git` directory inside, which is detected but cannot be opened.
pub fn fake_repo(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir.join(".git")).unwrap();
    dir.to_path_buf()
}
