use crate::utils::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const UNIPROT_BASE_URL: &str = "https://rest.uniprot.org";

/// Column set requested from the search endpoint. Kept compact: enough to
/// identify the protein, its function and the gene name used to chain into
/// the pathway lookup.
const SEARCH_FIELDS: &str = "accession,id,protein_name,gene_names,organism_name,ec";

/// One row of a UniProt TSV search response. Extra columns are ignored;
/// `accession` is the stable key used to chain further queries.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProteinRecord {
    #[serde(rename = "Entry")]
    pub accession: String,
    #[serde(rename = "Entry Name")]
    pub entry_name: String,
    #[serde(rename = "Protein names")]
    pub protein_names: String,
    #[serde(rename = "Gene Names", default)]
    pub gene_names: String,
    #[serde(rename = "Organism")]
    pub organism: String,
    #[serde(rename = "EC number", default)]
    pub ec_numbers: String,
}

impl ProteinRecord {
    /// First listed gene name, the identifier pathway databases index by.
    pub fn primary_gene(&self) -> Option<&str> {
        self.gene_names.split_whitespace().next()
    }
}

/// Blocking client for the UniProt REST API. Every call is a fresh
/// round trip; failures surface as service errors without retry.
pub struct UniProt {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl UniProt {
    pub fn new() -> Result<Self> {
        Self::with_base_url(UNIPROT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Service(format!("could not build UniProt client: {}", e)))?;
        Ok(UniProt {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Free-text or accession search, returned as the service's raw TSV.
    pub fn search(&self, query: &str) -> Result<String> {
        require_non_empty(self.get_tsv(query)?, query)
    }

    /// The same search, parsed into typed records. A response with no
    /// matches yields an empty vector.
    pub fn search_records(&self, query: &str) -> Result<Vec<ProteinRecord>> {
        let body = self.get_tsv(query)?;
        parse_records(&body)
    }

    /// Count proteins annotated with EC number `ec` under `taxon`, grouped
    /// by genus. Zero matching records yield an empty map.
    pub fn count_by_taxon(&self, ec: &str, taxon: &str) -> Result<BTreeMap<String, u64>> {
        let query = format!("ec:{} AND taxonomy_name:{}", ec, taxon);
        let records = self.search_records(&query)?;
        log::info!(
            "UniProt reports {} sequences (EC: {}, taxon: {})",
            records.len(),
            ec,
            taxon
        );
        Ok(genus_counts(&records))
    }

    fn get_tsv(&self, query: &str) -> Result<String> {
        let url = format!("{}/uniprotkb/search", self.base_url);
        log::debug!("GET {} query={}", url, query);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", query),
                ("format", "tsv"),
                ("fields", SEARCH_FIELDS),
            ])
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::Service(format!(
                "UniProt query '{}' failed (status={}): {}",
                query,
                status,
                body.trim()
            )));
        }
        Ok(body)
    }
}

/// An empty body is no answer at all for a direct lookup; reject it.
fn require_non_empty(body: String, query: &str) -> Result<String> {
    if body.trim().is_empty() {
        return Err(Error::Service(format!(
            "UniProt returned an empty response for '{}'",
            query
        )));
    }
    Ok(body)
}

/// Parse a TSV search response body. An empty body means zero matches.
pub fn parse_records(body: &str) -> Result<Vec<ProteinRecord>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(body.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: ProteinRecord =
            row.map_err(|e| Error::Service(format!("malformed UniProt response: {}", e)))?;
        records.push(record);
    }
    Ok(records)
}

/// Group records by the first whitespace-delimited token of the organism
/// field and count entries per genus.
pub fn genus_counts(records: &[ProteinRecord]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        if let Some(genus) = record.organism.split_whitespace().next() {
            *counts.entry(genus.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSV_BODY: &str = "Entry\tEntry Name\tProtein names\tGene Names\tOrganism\tEC number\n\
        B4EVM3\tB4EVM3_PROMH\tPutative lipase\tPMI0999\tProteus mirabilis (strain HI4320)\t3.1.1.3\n";

    fn record(organism: &str) -> ProteinRecord {
        ProteinRecord {
            accession: "P00000".to_string(),
            entry_name: "TEST".to_string(),
            protein_names: "Lipase".to_string(),
            gene_names: String::new(),
            organism: organism.to_string(),
            ec_numbers: "3.1.1.3".to_string(),
        }
    }

    #[test]
    fn test_parse_records() {
        let records = parse_records(TSV_BODY).unwrap();
        assert_eq!(records.len(), 1);
        let first = &records[0];
        assert_eq!(first.accession, "B4EVM3");
        assert_eq!(first.entry_name, "B4EVM3_PROMH");
        assert_eq!(first.protein_names, "Putative lipase");
        assert_eq!(first.organism, "Proteus mirabilis (strain HI4320)");
        assert_eq!(first.ec_numbers, "3.1.1.3");
        assert_eq!(first.primary_gene(), Some("PMI0999"));
    }

    #[test]
    fn test_parse_empty_body_yields_no_records() {
        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("\n").unwrap().is_empty());
    }

    #[test]
    fn test_genus_counts() {
        let records = vec![
            record("Escherichia coli"),
            record("Escherichia fergusonii"),
            record("Salmonella enterica"),
        ];
        let counts = genus_counts(&records);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["Escherichia"], 2);
        assert_eq!(counts["Salmonella"], 1);
    }

    #[test]
    fn test_genus_counts_empty_input() {
        assert!(genus_counts(&[]).is_empty());
    }

    #[test]
    fn test_primary_gene_missing() {
        assert_eq!(record("Escherichia coli").primary_gene(), None);
    }

    #[test]
    fn test_require_non_empty_rejects_blank_body() {
        let err = require_non_empty("\n".to_string(), "CAR42190").unwrap_err();
        assert!(matches!(err, crate::utils::Error::Service(_)), "got {:?}", err);
    }

    #[test]
    fn test_require_non_empty_passes_body_through() {
        assert_eq!(
            require_non_empty(TSV_BODY.to_string(), "B4EVM3").unwrap(),
            TSV_BODY
        );
    }
}
