//! Asset directory inventory, for diagnosing an install

use crate::host::{AssetHost, HostError};
use crate::layout::AssetLayout;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How many file names each directory report lists
pub const SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryReport {
    pub label: &'static str,
    pub path: PathBuf,
    /// `None` when the directory does not exist
    pub file_count: Option<usize>,
    /// First file names in case-insensitive order
    pub sample: Vec<String>,
}

impl DirectoryReport {
    pub fn exists(&self) -> bool {
        self.file_count.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inventory {
    pub root: PathBuf,
    pub directories: Vec<DirectoryReport>,
}

/// Report what is on disk under the gobo icon, reflector icon and HDRI directories
pub fn inventory(host: &impl AssetHost, layout: &AssetLayout) -> Result<Inventory, HostError> {
    let dirs = [
        ("Icons", layout.gobo_icons_dir()),
        ("Reflectors", layout.reflector_icons_dir()),
        ("HDRI", layout.hdri_dir()),
    ];

    let mut directories = Vec::with_capacity(dirs.len());
    for (label, path) in dirs {
        let report = match host.list_directory(&path)? {
            Some(mut names) => {
                names.sort_by_key(|name| name.to_lowercase());
                let file_count = names.len();
                names.truncate(SAMPLE_SIZE);
                DirectoryReport {
                    label,
                    path,
                    file_count: Some(file_count),
                    sample: names,
                }
            }
            None => DirectoryReport {
                label,
                path,
                file_count: None,
                sample: Vec::new(),
            },
        };
        directories.push(report);
    }

    Ok(Inventory {
        root: layout.root().to_path_buf(),
        directories,
    })
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Assets: {}", self.root.display())?;
        for dir in &self.directories {
            let state = if dir.exists() { "Exists" } else { "Missing" };
            writeln!(f, "{}: {} ({})", dir.label, dir.path.display(), state)?;
        }
        for dir in &self.directories {
            if let Some(count) = dir.file_count {
                writeln!(f, "{} files: {}", dir.label, count)?;
                for name in &dir.sample {
                    writeln!(f, "  {name}")?;
                }
            }
        }
        Ok(())
    }
}
