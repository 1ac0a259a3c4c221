use crate::utils::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Column order of BLAST tabular (outfmt 6) output.
pub const OUTFMT6_COLUMNS: [&str; 12] = [
    "query",
    "subject",
    "pc_identity",
    "aln_length",
    "mismatches",
    "gaps_opened",
    "query_start",
    "query_end",
    "subject_start",
    "subject_end",
    "e_value",
    "bitscore",
];

/// One row of BLAST tabular output. Coordinates are 1-based inclusive;
/// rows keep the aligner's own ranking order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlignmentHit {
    pub query: String,
    pub subject: String,
    pub pc_identity: f64,
    pub aln_length: u64,
    pub mismatches: u64,
    pub gaps_opened: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub subject_start: u64,
    pub subject_end: u64,
    pub e_value: f64,
    pub bitscore: f64,
}

impl AlignmentHit {
    /// Subject accession without the trailing version suffix
    /// (`CAR42190.1` -> `CAR42190`), the key used for annotation lookups.
    pub fn subject_accession(&self) -> &str {
        self.subject.split('.').next().unwrap_or(&self.subject)
    }
}

/// Load a tab-separated, headerless, 12-column alignment table, preserving
/// row order as written by the aligner.
pub fn load_hits(path: &Path) -> Result<Vec<AlignmentHit>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(file);

    let mut hits = Vec::new();
    for (idx, row) in reader.deserialize().enumerate() {
        let hit: AlignmentHit = row.map_err(|e| {
            Error::Parse(format!("{} row {}: {}", path.display(), idx + 1, e))
        })?;
        hits.push(hit);
    }
    Ok(hits)
}

/// The best hit is the row with the maximum bitscore; ties keep the
/// earliest row, which is also the aligner's own ranking order.
pub fn best_hit(hits: &[AlignmentHit]) -> Option<&AlignmentHit> {
    let mut best: Option<&AlignmentHit> = None;
    for hit in hits {
        match best {
            None => best = Some(hit),
            Some(current) if hit.bitscore > current.bitscore => best = Some(hit),
            Some(_) => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Error;
    use std::io::Write;

    fn write_table(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".tab").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const TWO_ROWS: &str = "gene_x\tCAR42190.1\t95.0\t287\t14\t0\t1\t861\t1\t287\t1e-100\t500.0\n\
                            gene_x\tCAR40123.1\t34.2\t120\t70\t4\t90\t449\t3\t118\t2e-12\t71.2\n";

    #[test]
    fn test_load_preserves_rows_and_values() {
        let file = write_table(TWO_ROWS);
        let hits = load_hits(file.path()).unwrap();
        assert_eq!(hits.len(), 2);

        let first = &hits[0];
        assert_eq!(first.query, "gene_x");
        assert_eq!(first.subject, "CAR42190.1");
        assert_eq!(first.pc_identity, 95.0);
        assert_eq!(first.aln_length, 287);
        assert_eq!(first.mismatches, 14);
        assert_eq!(first.gaps_opened, 0);
        assert_eq!(first.query_start, 1);
        assert_eq!(first.query_end, 861);
        assert_eq!(first.subject_start, 1);
        assert_eq!(first.subject_end, 287);
        assert_eq!(first.e_value, 1e-100);
        assert_eq!(first.bitscore, 500.0);

        // Row order is file order, not score order
        assert_eq!(hits[1].subject, "CAR40123.1");
    }

    #[test]
    fn test_wrong_column_count_is_parse_error() {
        let file = write_table("gene_x\tCAR42190.1\t95.0\t287\t14\t0\t1\t861\t1\t287\t1e-100\n");
        let err = load_hits(file.path()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn test_non_numeric_field_is_parse_error() {
        let file =
            write_table("gene_x\tCAR42190.1\thigh\t287\t14\t0\t1\t861\t1\t287\t1e-100\t500.0\n");
        let err = load_hits(file.path()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
    }

    #[test]
    fn test_empty_table_loads_as_no_hits() {
        let file = write_table("");
        let hits = load_hits(file.path()).unwrap();
        assert!(hits.is_empty());
        assert!(best_hit(&hits).is_none());
    }

    fn hit(subject: &str, bitscore: f64) -> AlignmentHit {
        AlignmentHit {
            query: "q".to_string(),
            subject: subject.to_string(),
            pc_identity: 90.0,
            aln_length: 100,
            mismatches: 10,
            gaps_opened: 0,
            query_start: 1,
            query_end: 300,
            subject_start: 1,
            subject_end: 100,
            e_value: 1e-50,
            bitscore,
        }
    }

    #[test]
    fn test_best_hit_takes_max_bitscore() {
        let hits = vec![hit("a", 120.0), hit("b", 410.5), hit("c", 33.0)];
        assert_eq!(best_hit(&hits).unwrap().subject, "b");
    }

    #[test]
    fn test_best_hit_tie_keeps_earliest_row() {
        let hits = vec![hit("a", 410.5), hit("b", 410.5)];
        assert_eq!(best_hit(&hits).unwrap().subject, "a");
    }

    #[test]
    fn test_subject_accession_strips_version() {
        assert_eq!(hit("CAR42190.1", 1.0).subject_accession(), "CAR42190");
        assert_eq!(hit("CAR42190", 1.0).subject_accession(), "CAR42190");
    }
}
