//! Cloning the source repository and stripping its git metadata

use super::command;
use crate::error::{EngineError, Result};
use crate::VCS_DIR;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

const URL_SCHEMES: &[&str] = &["git", "ssh", "http", "https"];

/// Check that `href` looks like a clonable git URL and return the repository name.
///
/// Accepts `git://`, `ssh://`, `http(s)://` URLs and scp-style `user@host:path`,
/// all of which must end in `.git` (a trailing `/` is tolerated).
pub fn verify_git_url(href: &str) -> Result<String> {
    let invalid = || EngineError::InvalidUrl(href.to_string());

    let path = match Url::parse(href) {
        Ok(url) if URL_SCHEMES.contains(&url.scheme()) && url.host_str().is_some() => {
            url.path().to_string()
        }
        Ok(_) => return Err(invalid()),
        // scp-like syntax is not a URL: git@github.com:owner/repo.git
        Err(_) => {
            let (host, path) = href.split_once(':').ok_or_else(invalid)?;
            let host = host.rsplit('@').next().unwrap_or(host);
            if host.is_empty() || host.contains('/') || path.is_empty() {
                return Err(invalid());
            }
            path.to_string()
        }
    };

    repository_name(&path).ok_or_else(invalid)
}

/// Directory name git gives a clone of `path`: its last segment minus `.git`
fn repository_name(path: &str) -> Option<String> {
    let last = path.trim_end_matches('/').rsplit('/').next()?;
    let name = last.strip_suffix(".git")?;

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

/// Clone one branch of `href` into `parent/name`, returning the new working tree root.
///
/// `name` is the repository name returned by [`verify_git_url`].
pub async fn clone_repository(
    href: &str,
    branch: &str,
    parent: &Path,
    name: &str,
) -> Result<PathBuf> {
    command::run(parent, "git", &["clone", href, "-b", branch, name], None).await?;
    Ok(parent.join(name))
}

/// Remove the `.git` directory of the working tree. Absent metadata is fine.
pub async fn remove_vcs_metadata(root: &Path) -> Result<()> {
    let path = root.join(VCS_DIR);
    match fs::remove_dir_all(&path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(EngineError::io("remove", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url() {
        assert_eq!(
            verify_git_url("https://github.com/owner/skeleton.git").unwrap(),
            "skeleton"
        );
        assert_eq!(
            verify_git_url("https://github.com/owner/skeleton.git/").unwrap(),
            "skeleton"
        );
    }

    #[test]
    fn test_ssh_and_git_schemes() {
        assert_eq!(
            verify_git_url("ssh://git@example.com:2222/team/app.git").unwrap(),
            "app"
        );
        assert_eq!(verify_git_url("git://example.com/app.git").unwrap(), "app");
    }

    #[test]
    fn test_scp_style_url() {
        assert_eq!(
            verify_git_url("git@github.com:owner/my-template.git").unwrap(),
            "my-template"
        );
    }

    #[test]
    fn test_invalid_urls() {
        for href in [
            "",
            "not a url",
            "https://github.com/owner/repo",
            "ftp://example.com/repo.git",
            "file:///tmp/repo.git",
            "https://github.com/.git",
            "git@github.com:",
        ] {
            let err = verify_git_url(href).unwrap_err();
            assert!(matches!(err, EngineError::InvalidUrl(_)), "{}", href);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clone_into_given_name() {
        let dir = tempfile::tempdir().unwrap();
        let upstream = dir.path().join("upstream");
        std::fs::create_dir(&upstream).unwrap();
        std::fs::write(upstream.join("README.md"), "hello").unwrap();

        let git = |args: &[&str]| {
            std::process::Command::new("git")
                .args(["-c", "user.name=test", "-c", "user.email=test@example.com"])
                .args(args)
                .current_dir(&upstream)
                .output()
        };
        match git(&["init", "-q"]) {
            Ok(out) if out.status.success() => {}
            // no git on this machine
            _ => return,
        }
        git(&["symbolic-ref", "HEAD", "refs/heads/trunk"]).unwrap();
        git(&["add", "README.md"]).unwrap();
        assert!(git(&["commit", "-q", "-m", "init"]).unwrap().status.success());

        let href = upstream.to_string_lossy().to_string();
        let root = clone_repository(&href, "trunk", dir.path(), "skeleton")
            .await
            .unwrap();

        assert_eq!(root, dir.path().join("skeleton"));
        assert_eq!(std::fs::read_to_string(root.join("README.md")).unwrap(), "hello");
        assert!(root.join(".git").exists());
    }

    #[tokio::test]
    async fn test_remove_vcs_metadata() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/master").unwrap();
        std::fs::write(dir.path().join("keep.txt"), "").unwrap();

        remove_vcs_metadata(dir.path()).await.unwrap();

        assert!(!dir.path().join(".git").exists());
        assert!(dir.path().join("keep.txt").exists());
    }

    #[tokio::test]
    async fn test_remove_missing_vcs_metadata_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        remove_vcs_metadata(dir.path()).await.unwrap();
    }
}
