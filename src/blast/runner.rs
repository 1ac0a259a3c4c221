use crate::utils::{Error, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Wraps the two BLAST+ invocations the pipeline needs: building a protein
/// database with `makeblastdb` and running a translated-nucleotide query
/// against it with `blastx`.
pub struct BlastRunner {
    makeblastdb_exe: String,
    blastx_exe: String,
}

impl Default for BlastRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl BlastRunner {
    pub fn new() -> Self {
        BlastRunner {
            makeblastdb_exe: "makeblastdb".to_string(),
            blastx_exe: "blastx".to_string(),
        }
    }

    /// Override the executable names, e.g. for installations outside PATH.
    pub fn with_executables(makeblastdb_exe: &str, blastx_exe: &str) -> Self {
        BlastRunner {
            makeblastdb_exe: makeblastdb_exe.to_string(),
            blastx_exe: blastx_exe.to_string(),
        }
    }

    /// Build a protein database from the multi-record FASTA at `reference`,
    /// writing the database artifacts to `db_path`.
    pub fn make_db(&self, reference: &Path, title: &str, db_path: &Path) -> Result<()> {
        self.run(
            Command::new(&self.makeblastdb_exe)
                .arg("-in")
                .arg(reference)
                .arg("-dbtype")
                .arg("prot")
                .arg("-title")
                .arg(title)
                .arg("-out")
                .arg(db_path),
        )?;
        Ok(())
    }

    /// Query the nucleotide sequence at `query` against the protein database
    /// at `db_path`, writing tabular (outfmt 6) results to `out_path`.
    ///
    /// Partial-write behavior on failure belongs to the tool itself; a run
    /// that exits 0 without producing `out_path` is still treated as a
    /// failed invocation.
    pub fn blastx(&self, query: &Path, db_path: &Path, out_path: &Path) -> Result<()> {
        self.run(
            Command::new(&self.blastx_exe)
                .arg("-query")
                .arg(query)
                .arg("-db")
                .arg(db_path)
                .arg("-outfmt")
                .arg("6")
                .arg("-out")
                .arg(out_path),
        )?;
        if !out_path.exists() {
            return Err(Error::ToolInvocation(format!(
                "{} exited successfully but wrote no output at {}",
                self.blastx_exe,
                out_path.display()
            )));
        }
        Ok(())
    }

    fn run(&self, command: &mut Command) -> Result<Output> {
        let exe = command.get_program().to_string_lossy().into_owned();
        log::debug!("Invoking {:?}", command);
        let output = command
            .output()
            .map_err(|e| Error::ToolInvocation(format!("could not run {}: {}", exe, e)))?;
        if !output.stdout.is_empty() {
            log::debug!(
                "{} stdout: {}",
                exe,
                String::from_utf8_lossy(&output.stdout).trim()
            );
        }
        if !output.stderr.is_empty() {
            log::debug!(
                "{} stderr: {}",
                exe,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        if !output.status.success() {
            return Err(Error::ToolInvocation(format!(
                "{} exited with {}: {}",
                exe,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output)
    }
}
