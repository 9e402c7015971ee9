// src/file.rs

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::config::consts::{BACKUP_SUFFIX, TMP_SUFFIX};

/// One rendered output file, held in memory until the whole run succeeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self { path: path.into(), contents: contents.into() }
    }
}

/// Write every artifact or none of them.
///
/// Each artifact goes to `<path>.partial` first; only when all temp files are
/// written are they moved into place. Existing targets are parked as
/// `<path>.previous` while that happens. If any move fails, every target
/// already replaced is put back, so existing outputs are left untouched.
pub fn write_all_or_nothing(artifacts: &[Artifact]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(artifacts.len());

    for a in artifacts {
        let tmp = temp_path(&a.path);
        if let Err(e) = stage_one(&tmp, a) {
            loge!("Output: staging {} failed: {e}", a.path.display());
            let _ = fs::remove_file(&tmp);
            discard(&staged);
            return Err(e);
        }
        staged.push((tmp, a.path.as_path()));
    }

    let mut committed: Vec<Committed<'_>> = Vec::with_capacity(staged.len());
    for (tmp, dest) in &staged {
        match commit_one(tmp, dest) {
            Ok(backup) => committed.push(Committed { dest: *dest, backup }),
            Err(e) => {
                loge!("Output: moving {} into place failed: {e}", dest.display());
                roll_back(&committed);
                discard(&staged);
                return Err(e);
            }
        }
    }

    for c in &committed {
        if let Some(b) = &c.backup {
            let _ = fs::remove_file(b);
        }
    }
    Ok(committed.iter().map(|c| c.dest.to_path_buf()).collect())
}

/// A target already replaced, with where its previous contents were parked.
struct Committed<'a> {
    dest: &'a Path,
    backup: Option<PathBuf>,
}

fn commit_one(tmp: &Path, dest: &Path) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    if dest.is_dir() {
        return Err(format!("Output path is a directory: {}", dest.display()).into());
    }
    let backup = if dest.exists() {
        let b = backup_path(dest);
        fs::rename(dest, &b)?;
        Some(b)
    } else {
        None
    };
    if let Err(e) = fs::rename(tmp, dest) {
        if let Some(b) = &backup {
            let _ = fs::rename(b, dest);
        }
        return Err(e.into());
    }
    Ok(backup)
}

fn roll_back(committed: &[Committed<'_>]) {
    for c in committed.iter().rev() {
        let restored = match &c.backup {
            Some(b) => fs::rename(b, c.dest),
            None => fs::remove_file(c.dest),
        };
        if let Err(e) = restored {
            loge!("Output: could not restore {}: {e}", c.dest.display());
        }
    }
}

fn stage_one(tmp: &Path, a: &Artifact) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = a.path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut f = fs::File::create(tmp)?;
    f.write_all(a.contents.as_bytes())?;
    f.sync_all()?;
    Ok(())
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}

pub fn temp_path(dest: &Path) -> PathBuf {
    with_suffix(dest, TMP_SUFFIX)
}

fn backup_path(dest: &Path) -> PathBuf {
    with_suffix(dest, BACKUP_SUFFIX)
}

fn with_suffix(dest: &Path, suffix: &str) -> PathBuf {
    let mut s = dest.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}
