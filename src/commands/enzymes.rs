use crate::annot::UniProt;
use crate::cli::EnzymesArgs;
use crate::utils::Result;

pub fn enzymes(args: EnzymesArgs) -> Result<()> {
    let uniprot = UniProt::new()?;
    let counts = uniprot.count_by_taxon(&args.ec, &args.taxon)?;
    if counts.is_empty() {
        log::warn!(
            "No annotated enzymes found (EC: {}, taxon: {})",
            args.ec,
            args.taxon
        );
        return Ok(());
    }
    println!("genus\tcount");
    for (genus, count) in &counts {
        println!("{}\t{}", genus, count);
    }
    Ok(())
}
