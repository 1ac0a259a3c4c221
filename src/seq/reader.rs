use super::SequenceRecord;
use crate::utils::{Error, Result};
use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read as ioRead};
use std::path::Path;

/// Open a FASTA file for reading, transparently decompressing gzipped input.
pub fn open_fasta_reader(path: &Path) -> Result<fasta::Reader<BufReader<Box<dyn ioRead>>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path)?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(fasta::Reader::new(Box::new(gz_decoder) as Box<dyn ioRead>))
        } else {
            Err(Error::Format(format!(
                "Invalid gzip header: {}",
                path.display()
            )))
        }
    } else {
        Ok(fasta::Reader::new(Box::new(file) as Box<dyn ioRead>))
    }
}

/// Read exactly one sequence record from a FASTA file. A file with zero
/// records, more than one record, or malformed FASTA is a format error.
pub fn read_single_record(path: &Path) -> Result<SequenceRecord> {
    let reader = open_fasta_reader(path)?;
    let mut records = reader.records();

    let first = match records.next() {
        Some(record) => {
            record.map_err(|e| Error::Format(format!("{}: {}", path.display(), e)))?
        }
        None => {
            return Err(Error::Format(format!(
                "{}: expected exactly one sequence record, found none",
                path.display()
            )))
        }
    };
    first
        .check()
        .map_err(|e| Error::Format(format!("{}: {}", path.display(), e)))?;

    if records.next().is_some() {
        return Err(Error::Format(format!(
            "{}: expected exactly one sequence record, found more",
            path.display()
        )));
    }

    Ok(SequenceRecord {
        id: first.id().to_string(),
        desc: first.desc().map(str::to_string),
        residues: String::from_utf8_lossy(first.seq()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Error;
    use std::io::Write;

    fn write_fasta(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".fasta")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_single_record() {
        let file = write_fasta(">gene_x partial CDS\nATGCATGCAT\nGCATGC\n");
        let record = read_single_record(file.path()).unwrap();
        assert_eq!(record.id, "gene_x");
        assert_eq!(record.desc.as_deref(), Some("partial CDS"));
        assert_eq!(record.residues, "ATGCATGCATGCATGC");
        assert_eq!(record.len(), 16);
    }

    #[test]
    fn test_empty_file_is_format_error() {
        let file = write_fasta("");
        let err = read_single_record(file.path()).unwrap_err();
        assert!(matches!(err, Error::Format(_)), "got {:?}", err);
    }

    #[test]
    fn test_two_records_is_format_error() {
        let file = write_fasta(">a\nATGC\n>b\nGGCC\n");
        let err = read_single_record(file.path()).unwrap_err();
        assert!(matches!(err, Error::Format(_)), "got {:?}", err);
    }

    #[test]
    fn test_gzipped_input() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut file = tempfile::Builder::new()
            .suffix(".fasta.gz")
            .tempfile()
            .unwrap();
        let mut encoder = GzEncoder::new(&mut file, Compression::default());
        encoder.write_all(b">gz_seq\nATGCATGC\n").unwrap();
        encoder.finish().unwrap();
        file.flush().unwrap();

        let record = read_single_record(file.path()).unwrap();
        assert_eq!(record.id, "gz_seq");
        assert_eq!(record.len(), 8);
    }
}
