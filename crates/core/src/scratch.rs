// Copyright 2026 Ceph Bench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scratch files removed on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A file in the system temp directory that is deleted when dropped.
///
/// Generated artifacts (the deployment bundle, action parameter files)
/// only exist so an external CLI can read them; the guard keeps them from
/// piling up across invocations.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Write `contents` to a uniquely named file under the temp dir.
    ///
    /// The name is `<prefix>-<pid>-<random>.<ext>`, unique per process
    /// and per call.
    pub fn create(prefix: &str, ext: &str, contents: &str) -> io::Result<Self> {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let name = format!("{prefix}-{}-{}.{ext}", std::process::id(), &suffix[..8]);
        let path = std::env::temp_dir().join(name);
        fs::write(&path, contents)?;
        Ok(Self { path })
    }

    /// Path to the scratch file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
