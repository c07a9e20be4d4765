// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::shared::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes generated connection artifacts to the local filesystem.
pub trait ArtifactWriter {
    fn read_base_template(&self, path: &Path) -> Result<String>;
    fn write_sparkmagic_conf(&self, path: &Path, contents: &str) -> Result<PathBuf>;
    fn write_krb5_conf(&self, path: &Path, contents: &str) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Default)]
pub struct FileArtifactWriter;

impl FileArtifactWriter {
    pub fn new() -> Self {
        Self
    }

    fn write(&self, path: &Path, contents: &str) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
        Ok(path.to_path_buf())
    }
}

impl ArtifactWriter for FileArtifactWriter {
    fn read_base_template(&self, path: &Path) -> Result<String> {
        debug!(path = %path.display(), "Reading SparkMagic base template");
        Ok(fs::read_to_string(path)?)
    }

    fn write_sparkmagic_conf(&self, path: &Path, contents: &str) -> Result<PathBuf> {
        let written = self.write(path, contents)?;
        info!(path = %written.display(), "Updated SparkMagic configuration");
        Ok(written)
    }

    fn write_krb5_conf(&self, path: &Path, contents: &str) -> Result<PathBuf> {
        let written = self.write(path, contents)?;
        info!(path = %written.display(), "Updated Kerberos configuration");
        Ok(written)
    }
}
