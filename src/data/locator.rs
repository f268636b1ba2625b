use std::path::{Path, PathBuf};

use crate::error::EdaError;

/// File name of the passenger dataset.
pub const DATASET_FILE: &str = "train.csv";

// ---------------------------------------------------------------------------
// Candidate path list
// ---------------------------------------------------------------------------

/// Ordered list of places the dataset may live, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePaths(Vec<PathBuf>);

impl CandidatePaths {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        CandidatePaths(paths.into_iter().map(Into::into).collect())
    }

    /// The standard search order:
    ///
    /// 1. `train.csv` in the working directory
    /// 2. `data/train.csv` in the working directory
    /// 3. `train.csv` next to the executable
    /// 4. `data/train.csv` next to the executable
    /// 5. `~/OneDrive/Desktop/train.csv`
    ///
    /// Entries whose base directory cannot be determined are left out.
    pub fn standard() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        Self::standard_from(exe_dir.as_deref(), home_dir().as_deref())
    }

    fn standard_from(exe_dir: Option<&Path>, home: Option<&Path>) -> Self {
        let mut paths = vec![
            PathBuf::from(DATASET_FILE),
            Path::new("data").join(DATASET_FILE),
        ];
        if let Some(dir) = exe_dir {
            paths.push(dir.join(DATASET_FILE));
            paths.push(dir.join("data").join(DATASET_FILE));
        }
        if let Some(home) = home {
            paths.push(home.join("OneDrive").join("Desktop").join(DATASET_FILE));
        }
        CandidatePaths(paths)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

// ---------------------------------------------------------------------------
// Locating
// ---------------------------------------------------------------------------

/// Return the first candidate that exists on disk.
pub fn locate(candidates: &CandidatePaths) -> Result<PathBuf, EdaError> {
    locate_with(candidates, |p| p.exists())
}

/// Return the first candidate accepted by `exists`.
///
/// Probing stops at the first hit; later candidates are never checked.
pub fn locate_with(
    candidates: &CandidatePaths,
    mut exists: impl FnMut(&Path) -> bool,
) -> Result<PathBuf, EdaError> {
    for path in candidates.paths() {
        log::debug!("probing {}", path.display());
        if exists(path) {
            log::info!("using dataset at {}", path.display());
            return Ok(path.clone());
        }
    }
    Err(EdaError::DatasetNotFound {
        attempted: candidates.paths().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_first_existing_and_stops_probing() {
        let candidates = CandidatePaths::new(["a.csv", "b.csv", "c.csv", "d.csv"]);
        let mut probed = Vec::new();
        let found = locate_with(&candidates, |p| {
            probed.push(p.to_path_buf());
            p == Path::new("b.csv") || p == Path::new("d.csv")
        })
        .unwrap();

        assert_eq!(found, PathBuf::from("b.csv"));
        assert_eq!(probed, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
    }

    #[test]
    fn every_ordering_picks_earliest_hit() {
        let hits = ["x", "z"];
        let orders = [["x", "y", "z"], ["y", "z", "x"], ["z", "x", "y"], ["y", "x", "z"]];
        for order in orders {
            let candidates = CandidatePaths::new(order);
            let found = locate_with(&candidates, |p| hits.iter().any(|h| p == Path::new(h))).unwrap();
            let expected = order.iter().find(|c| hits.contains(c)).unwrap();
            assert_eq!(found, PathBuf::from(expected));
        }
    }

    #[test]
    fn none_existing_lists_attempts() {
        let candidates = CandidatePaths::new(["missing/one.csv", "missing/two.csv"]);
        let err = locate_with(&candidates, |_| false).unwrap_err();
        assert_eq!(
            err,
            EdaError::DatasetNotFound {
                attempted: vec!["missing/one.csv".into(), "missing/two.csv".into()],
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("missing/one.csv"));
        assert!(msg.contains("missing/two.csv"));
        assert!(msg.contains("--data"));
    }

    #[test]
    fn finds_real_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("data").join(DATASET_FILE);
        std::fs::create_dir_all(present.parent().unwrap()).unwrap();
        std::fs::write(&present, "Survived\n1\n").unwrap();

        let candidates = CandidatePaths::new([dir.path().join(DATASET_FILE), present.clone()]);
        assert_eq!(locate(&candidates).unwrap(), present);
    }

    #[test]
    fn standard_order_has_five_entries() {
        let exe = Path::new("/opt/eda/bin");
        let home = Path::new("/home/me");
        let standard = CandidatePaths::standard_from(Some(exe), Some(home));
        assert_eq!(
            standard.paths(),
            &[
                PathBuf::from("train.csv"),
                PathBuf::from("data/train.csv"),
                PathBuf::from("/opt/eda/bin/train.csv"),
                PathBuf::from("/opt/eda/bin/data/train.csv"),
                PathBuf::from("/home/me/OneDrive/Desktop/train.csv"),
            ]
        );
    }
}
