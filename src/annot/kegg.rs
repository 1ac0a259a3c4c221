use crate::utils::{Error, Result};
use std::time::Duration;

pub const KEGG_BASE_URL: &str = "https://rest.kegg.jp";

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// One line of a `find/genes` response: the database-internal gene id
/// (e.g. `pmr:PMI0999`) and its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneMatch {
    pub id: String,
    pub description: String,
}

/// A KEGG flat-file record: field names in the first 12 columns, values
/// continued on indented lines, record terminated by `///`.
#[derive(Debug, Clone, Default)]
pub struct KeggRecord {
    fields: Vec<(String, Vec<String>)>,
}

impl KeggRecord {
    pub fn parse(text: &str) -> Result<KeggRecord> {
        let mut fields: Vec<(String, Vec<String>)> = Vec::new();
        for line in text.lines() {
            if line.starts_with("///") {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with(' ') {
                match fields.last_mut() {
                    Some((_, values)) => values.push(line.trim().to_string()),
                    None => {
                        return Err(Error::Parse(
                            "KEGG record starts with a continuation line".to_string(),
                        ))
                    }
                }
            } else {
                let (name, value) = match line.char_indices().nth(12) {
                    Some((split, _)) => (line[..split].trim_end(), line[split..].trim()),
                    None => (line.trim_end(), ""),
                };
                let values = if value.is_empty() {
                    Vec::new()
                } else {
                    vec![value.to_string()]
                };
                fields.push((name.to_string(), values));
            }
        }
        if fields.is_empty() {
            return Err(Error::Parse("empty KEGG record".to_string()));
        }
        Ok(KeggRecord { fields })
    }

    /// All value lines for a field, in record order.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, values)| values.as_slice())
    }

    /// First token of the ENTRY field, the record's own identifier.
    pub fn entry(&self) -> Option<&str> {
        self.field("ENTRY")?.first()?.split_whitespace().next()
    }

    /// First NAME line, if any.
    pub fn name(&self) -> Option<&str> {
        self.field("NAME")?.first().map(String::as_str)
    }

    /// PATHWAY links as (id, description) pairs, in record order.
    pub fn pathways(&self) -> Vec<(String, String)> {
        self.field("PATHWAY")
            .map(|lines| {
                lines
                    .iter()
                    .filter_map(|line| {
                        let mut parts = line.splitn(2, char::is_whitespace);
                        let id = parts.next()?.to_string();
                        let description = parts.next().unwrap_or("").trim().to_string();
                        Some((id, description))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Reject an image response body that does not start with the PNG magic.
fn check_png(bytes: &[u8], entry: &str) -> Result<()> {
    if !bytes.starts_with(PNG_MAGIC) {
        return Err(Error::Service(format!(
            "KEGG image response for {} is not a PNG",
            entry
        )));
    }
    Ok(())
}

/// Parse a `find/genes` response body into gene matches.
pub fn parse_gene_matches(body: &str) -> Vec<GeneMatch> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((id, description)) => GeneMatch {
                id: id.to_string(),
                description: description.trim().to_string(),
            },
            None => GeneMatch {
                id: line.trim().to_string(),
                description: String::new(),
            },
        })
        .collect()
}

/// Blocking client for the KEGG REST API. Every call is a fresh round
/// trip; failures surface as service errors without retry.
pub struct Kegg {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Kegg {
    pub fn new() -> Result<Self> {
        Self::with_base_url(KEGG_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::Service(format!("could not build KEGG client: {}", e)))?;
        Ok(Kegg {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search the GENES database for entries matching `query`.
    pub fn find_genes(&self, query: &str) -> Result<Vec<GeneMatch>> {
        let body = self.get_text(&format!("find/genes/{}", query))?;
        Ok(parse_gene_matches(&body))
    }

    /// Fetch the flat-file record for `entry` as raw text.
    pub fn get_raw(&self, entry: &str) -> Result<String> {
        self.get_text(&format!("get/{}", entry))
    }

    /// Fetch and parse the flat-file record for `entry`.
    pub fn get(&self, entry: &str) -> Result<KeggRecord> {
        KeggRecord::parse(&self.get_raw(entry)?)
    }

    /// Fetch the rendered diagram for `entry`; pathway images are PNG.
    pub fn get_image(&self, entry: &str) -> Result<Vec<u8>> {
        let bytes = self.get_bytes(&format!("get/{}/image", entry))?;
        check_png(&bytes, entry)?;
        Ok(bytes)
    }

    fn get_text(&self, path: &str) -> Result<String> {
        String::from_utf8(self.get_bytes(path)?)
            .map_err(|e| Error::Service(format!("KEGG response for {} is not UTF-8: {}", path, e)))
    }

    fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Service(format!(
                "KEGG request {} failed (status={})",
                path, status
            )));
        }
        let bytes = response.bytes()?.to_vec();
        if bytes.is_empty() {
            return Err(Error::Service(format!(
                "KEGG request {} returned an empty response",
                path
            )));
        }
        Ok(bytes)
    }
}
