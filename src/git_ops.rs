use crate::error::{ReleaseError, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Wrapper around git2 Repository for the publishing half of a release.
///
/// Provides high-level abstractions for the operations relcut needs:
/// staging files, committing, creating an annotated tag, and pushing both
/// to a remote.
pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Opens the git repository at the given path.
    ///
    /// The path is an explicit input rather than the ambient working
    /// directory so that callers (and tests) control exactly which tree is
    /// released.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Successfully opened repository wrapper
    /// * `Err` - If the path is not inside a git repository
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| ReleaseError::config(format!("not a git repository: {}", e)))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| ReleaseError::config("bare repositories cannot be released"))?
            .to_path_buf();
        Ok(GitRepo { repo, workdir })
    }

    /// The repository's working directory root.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Returns the name of the currently checked-out branch.
    ///
    /// # Returns
    /// * `Ok(name)` - Branch name (e.g. "main")
    /// * `Err` - If HEAD is detached or not a branch
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(ReleaseError::config(
                "HEAD is detached; check out a branch before releasing",
            ));
        }
        head.shorthand()
            .map(|s| s.to_string())
            .ok_or_else(|| ReleaseError::config("branch name is not valid UTF-8"))
    }

    /// Stages a set of workdir-relative paths into the index.
    ///
    /// Required paths must exist (the release tools were supposed to have
    /// written them); optional paths are staged only when present.
    ///
    /// # Arguments
    /// * `required` - Paths that must exist, e.g. the regenerated changelog
    /// * `optional` - Paths staged only if they exist on disk
    ///
    /// # Returns
    /// * `Ok(staged)` - The paths actually added to the index
    /// * `Err` - If a required path is missing or the index cannot be written
    pub fn stage(&self, required: &[&str], optional: &[&str]) -> Result<Vec<String>> {
        let mut index = self.repo.index()?;
        let mut staged = Vec::new();

        for rel in required {
            if !self.workdir.join(rel).exists() {
                return Err(ReleaseError::config(format!(
                    "expected file '{}' was not produced",
                    rel
                )));
            }
            index.add_path(Path::new(rel))?;
            staged.push(rel.to_string());
        }

        for rel in optional {
            if self.workdir.join(rel).exists() {
                index.add_path(Path::new(rel))?;
                staged.push(rel.to_string());
            }
        }

        index.write()?;
        Ok(staged)
    }

    /// Commits the current index on HEAD with the given message.
    ///
    /// # Returns
    /// * `Ok(oid)` - The new commit's full hex id
    /// * `Err` - If the tree cannot be written or the commit fails
    pub fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(oid.to_string())
    }

    /// Creates an annotated tag pointing at the current HEAD commit.
    ///
    /// # Arguments
    /// * `tag_name` - Name of the tag to create (tagged version form)
    /// * `message` - Annotation message
    pub fn create_annotated_tag(&self, tag_name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(tag_name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    /// Pushes the given branch to a remote.
    pub fn push_branch(&self, remote_name: &str, branch: &str) -> Result<()> {
        self.push_refspec(remote_name, &format!("refs/heads/{}", branch))
    }

    /// Pushes a tag to a remote.
    pub fn push_tag(&self, remote_name: &str, tag_name: &str) -> Result<()> {
        self.push_refspec(remote_name, &format!("refs/tags/{}", tag_name))
    }

    /// Pushes a single refspec to a remote with SSH credential support.
    ///
    /// Attempts SSH keys from `~/.ssh/` in order of preference, then the SSH
    /// agent, then default credentials.
    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| ReleaseError::config(format!("no remote named '{}'", remote_name)))?;

        let mut push_options = git2::PushOptions::new();

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Catch per-reference rejections during the push
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        match remote.push(&[refspec], Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.class() == git2::ErrorClass::Net {
                    Err(ReleaseError::tool(
                        "git push",
                        format!("network error: {}", e),
                    ))
                } else if e.class() == git2::ErrorClass::Reference {
                    Err(ReleaseError::tool(
                        "git push",
                        format!("reference error: {}", e),
                    ))
                } else {
                    Err(ReleaseError::tool(
                        "git push",
                        format!("failed to push '{}': {}", refspec, e),
                    ))
                }
            }
        }
    }
}
