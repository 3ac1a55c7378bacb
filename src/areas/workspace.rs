//! Working directory operations
//!
//! The workspace is the user-owned directory the repository snapshots. The
//! scanner turns it into a tree graph; materialization rewrites it from a
//! commit. The persistence file at the root is the only entry either side
//! skips.

use crate::artifacts::core::{IoResultExt, Result};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeLine};
use crate::areas::storage::STORAGE_FILE;
use std::path::Path;
use walkdir::WalkDir;

/// Everything one scan produces: the root tree plus every intermediate
/// object, ready for idempotent insertion into the stores
#[derive(Debug)]
pub struct ScanProducts {
    pub root_id: ObjectId,
    pub root: Tree,
    pub blobs: Vec<(ObjectId, Blob)>,
    pub trees: Vec<(ObjectId, Tree)>,
}

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hash the working directory into a tree graph
    ///
    /// Directories are walked depth-first with entries in lexicographic
    /// name order, so identical contents always produce identical ids.
    /// Entry paths are recorded relative to the workspace root; subtree
    /// paths end with `/`.
    pub fn scan(&self) -> Result<ScanProducts> {
        let mut blobs = Vec::new();
        let mut trees = Vec::new();
        let (root_id, root) = self.scan_dir(&self.path, "", &mut blobs, &mut trees)?;

        Ok(ScanProducts {
            root_id,
            root,
            blobs,
            trees,
        })
    }

    fn scan_dir(
        &self,
        dir: &Path,
        prefix: &str,
        blobs: &mut Vec<(ObjectId, Blob)>,
        trees: &mut Vec<(ObjectId, Tree)>,
    ) -> Result<(ObjectId, Tree)> {
        let mut lines = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry
                .map_err(std::io::Error::from)
                .with_path(dir.to_path_buf())?;
            let name = entry.file_name().to_string_lossy().to_string();

            // the persistence file lives at the root, nowhere else
            if prefix.is_empty() && name == STORAGE_FILE {
                continue;
            }

            if entry.file_type().is_dir() {
                let subtree_path = format!("{}{}/", prefix, name);
                let (id, tree) = self.scan_dir(entry.path(), &subtree_path, blobs, trees)?;
                lines.push(TreeLine::Tree {
                    id,
                    tree,
                    path: subtree_path,
                });
            } else {
                let content = std::fs::read_to_string(entry.path()).with_path(entry.path())?;
                let blob = Blob::new(content);
                let id = blob.object_id()?;
                blobs.push((id.clone(), blob.clone()));
                lines.push(TreeLine::Blob {
                    id,
                    blob,
                    path: format!("{}{}", prefix, name),
                });
            }
        }

        let tree = Tree::new(lines);
        let id = tree.object_id()?;
        trees.push((id.clone(), tree.clone()));
        Ok((id, tree))
    }

    /// Rewrite the working directory to match a commit's snapshot
    ///
    /// Clears everything except the persistence file, then restores every
    /// blob line of the commit's tree graph, subtrees included.
    pub fn reset(&self, commit: &Commit) -> Result<()> {
        self.clear()?;
        self.restore_tree(commit.tree())
    }

    fn clear(&self) -> Result<()> {
        for entry in std::fs::read_dir(&self.path).with_path(self.path.to_path_buf())? {
            let entry = entry.with_path(self.path.to_path_buf())?;
            if entry.file_name().to_string_lossy() == STORAGE_FILE {
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type().with_path(&path)?;
            if file_type.is_dir() {
                std::fs::remove_dir_all(&path).with_path(&path)?;
            } else {
                std::fs::remove_file(&path).with_path(&path)?;
            }
        }

        Ok(())
    }

    fn restore_tree(&self, tree: &Tree) -> Result<()> {
        for line in tree.lines() {
            match line {
                TreeLine::Blob { blob, path, .. } => {
                    let target = self.path.join(path);
                    if let Some(parent) = target.parent() {
                        std::fs::create_dir_all(parent).with_path(parent)?;
                    }
                    std::fs::write(&target, blob.content()).with_path(&target)?;
                }
                TreeLine::Tree { tree, .. } => self.restore_tree(tree)?,
            }
        }

        Ok(())
    }
}
