use crate::utils::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Create the output directory if it does not already exist.
pub fn ensure_outdir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Build the conventional `<query>_blastx_<db>.tab` output path, so that a
/// result file records which query, program and database produced it.
pub fn tab_output_path(outdir: &Path, query: &Path, db_title: &str) -> PathBuf {
    let stem = query
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "query".to_string());
    outdir.join(format!("{}_blastx_{}.tab", stem, db_title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_output_path_naming() {
        let path = tab_output_path(
            Path::new("out"),
            Path::new("data/sequences/lipase.fasta"),
            "reference_protein",
        );
        assert_eq!(
            path,
            Path::new("out").join("lipase_blastx_reference_protein.tab")
        );
    }

    #[test]
    fn test_ensure_outdir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("output");
        ensure_outdir(&target).unwrap();
        assert!(target.is_dir());
        ensure_outdir(&target).unwrap();
    }
}
