mod kegg;
mod uniprot;

pub use kegg::{parse_gene_matches, GeneMatch, Kegg, KeggRecord, KEGG_BASE_URL};
pub use uniprot::{genus_counts, parse_records, ProteinRecord, UniProt, UNIPROT_BASE_URL};
