use crate::annot::{parse_records, Kegg, UniProt};
use crate::cli::AnnotateArgs;
use crate::utils::{ensure_outdir, Error, Result};
use std::fs;
use std::path::Path;

pub fn annotate(args: AnnotateArgs) -> Result<()> {
    ensure_outdir(&args.outdir)?;
    execute(
        strip_version(&args.accession),
        args.gene.as_deref(),
        &args.outdir,
    )
}

/// Accession without the trailing version suffix (`CAR42190.1` ->
/// `CAR42190`), the form UniProt indexes by.
fn strip_version(accession: &str) -> &str {
    accession.split('.').next().unwrap_or(accession)
}

/// Stage 4 of the pipeline: protein-function lookup via UniProt, then the
/// gene and pathway records via KEGG, then the pathway diagram image.
pub fn execute(accession: &str, gene_override: Option<&str>, outdir: &Path) -> Result<()> {
    let uniprot = UniProt::new()?;
    let summary = uniprot.search(accession)?;
    println!("{}", summary);

    let records = parse_records(&summary)?;
    let protein = records.first().ok_or_else(|| {
        Error::Service(format!("UniProt returned no records for '{}'", accession))
    })?;
    log::info!(
        "UniProt {}: {} [{}]{}",
        protein.accession,
        protein.protein_names,
        protein.organism,
        if protein.ec_numbers.is_empty() {
            String::new()
        } else {
            format!(" EC {}", protein.ec_numbers)
        }
    );

    let gene = match gene_override {
        Some(gene) => gene.to_string(),
        None => protein
            .primary_gene()
            .ok_or_else(|| {
                Error::Service(format!(
                    "UniProt record {} lists no gene name to query pathways with",
                    protein.accession
                ))
            })?
            .to_string(),
    };

    let kegg = Kegg::new()?;
    let matches = kegg.find_genes(&gene)?;
    let gene_match = matches.first().ok_or_else(|| {
        Error::Service(format!("KEGG GENES has no match for '{}'", gene))
    })?;
    log::info!("KEGG gene {}: {}", gene_match.id, gene_match.description);

    let gene_record = kegg.get(&gene_match.id)?;
    let pathways = gene_record.pathways();
    if pathways.is_empty() {
        log::warn!("KEGG entry {} links no pathways", gene_match.id);
        return Ok(());
    }
    for (id, description) in &pathways {
        log::info!("Pathway {}: {}", id, description);
    }

    // The first linked pathway is the gene-specific one; the global
    // metabolism maps come later in the list.
    let (pathway_id, _) = &pathways[0];
    let pathway_text = kegg.get_raw(pathway_id)?;
    println!("{}", pathway_text);

    let image = kegg.get_image(pathway_id)?;
    let image_path = outdir.join(format!("{}.png", pathway_id));
    fs::write(&image_path, &image)?;
    log::info!("Wrote pathway diagram to {}", image_path.display());

    Ok(())
}
