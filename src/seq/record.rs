use itertools::Itertools;

/// A single sequence loaded from a FASTA file, read-only for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    pub desc: Option<String>,
    pub residues: String,
}

impl SequenceRecord {
    /// Number of residues in the sequence.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Re-render the record as FASTA text, 60 residues per line.
    pub fn to_fasta(&self) -> String {
        let mut out = String::with_capacity(self.residues.len() + self.id.len() + 16);
        out.push('>');
        out.push_str(&self.id);
        if let Some(desc) = &self.desc {
            out.push(' ');
            out.push_str(desc);
        }
        out.push('\n');
        for chunk in &self.residues.chars().chunks(60) {
            out.extend(chunk);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_residues() {
        let record = SequenceRecord {
            id: "seq1".to_string(),
            desc: None,
            residues: "ATGCATGC".to_string(),
        };
        assert_eq!(record.len(), 8);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_to_fasta_wraps_at_60() {
        let record = SequenceRecord {
            id: "seq1".to_string(),
            desc: Some("putative lipase".to_string()),
            residues: "A".repeat(130),
        };
        let text = record.to_fasta();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ">seq1 putative lipase");
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2].len(), 60);
        assert_eq!(lines[3].len(), 10);
        assert_eq!(lines.len(), 4);
    }
}
