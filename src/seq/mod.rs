mod reader;
mod record;

pub use reader::{open_fasta_reader, read_single_record};
pub use record::SequenceRecord;
