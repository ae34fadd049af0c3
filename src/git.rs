use std::path::Path;

use git2::{BranchType, Repository};

use crate::error::{Error, Result};

/// Rename the branch checked out in the repository containing `repo_dir`
///
/// Returns the old branch name.
pub fn rename_current_branch(repo_dir: &Path, new_name: &str) -> Result<String> {
    let repo = Repository::discover(repo_dir).map_err(|_| Error::NotInGitRepo)?;
    let head = repo.head()?;
    if !head.is_branch() {
        return Err(Error::DetachedHead);
    }

    let old_name = head.shorthand().ok_or(Error::DetachedHead)?.to_string();
    let mut branch = repo.find_branch(&old_name, BranchType::Local)?;
    branch.rename(new_name, false)?;

    tracing::info!(from = %old_name, to = new_name, "renamed branch");
    Ok(old_name)
}
