use crate::blast::best_hit;
use crate::cli::RunArgs;
use crate::commands::{annotate, search};
use crate::utils::{Error, Result};

pub fn run(args: RunArgs) -> Result<()> {
    let hits = search::execute(&args.search)?;
    search::print_hits(&hits, args.search.top);

    if args.skip_annotation {
        log::info!("Skipping annotation stage");
        return Ok(());
    }

    let best = best_hit(&hits).ok_or_else(|| {
        Error::Parse(format!(
            "no alignments for {} against {}",
            args.search.query_path.display(),
            args.search.reference_path.display()
        ))
    })?;
    log::info!(
        "Best hit {} (bitscore {:.1}, identity {:.1}%, e-value {:e})",
        best.subject,
        best.bitscore,
        best.pc_identity,
        best.e_value
    );

    annotate::execute(best.subject_accession(), None, &args.search.outdir)
}
