use crate::blast::{best_hit, load_hits, AlignmentHit, BlastRunner, OUTFMT6_COLUMNS};
use crate::cli::SearchArgs;
use crate::seq::read_single_record;
use crate::utils::{ensure_outdir, tab_output_path, Result};
use itertools::Itertools;

pub fn search(args: SearchArgs) -> Result<()> {
    let hits = execute(&args)?;
    print_hits(&hits, args.top);
    if let Some(best) = best_hit(&hits) {
        log::info!(
            "Best hit {} (bitscore {:.1}, identity {:.1}%)",
            best.subject,
            best.bitscore,
            best.pc_identity
        );
    }
    Ok(())
}

/// Stages 1-3 of the pipeline: load the query, build the database, run
/// blastx, load the tabular results.
pub fn execute(args: &SearchArgs) -> Result<Vec<AlignmentHit>> {
    let record = read_single_record(&args.query_path)?;
    log::info!(
        "Loaded query {} ({} residues){}",
        record.id,
        record.len(),
        record
            .desc
            .as_deref()
            .map(|d| format!(": {}", d))
            .unwrap_or_default()
    );

    ensure_outdir(&args.outdir)?;
    let runner = BlastRunner::with_executables(&args.makeblastdb_exe, &args.blastx_exe);

    let db_path = args.outdir.join(&args.db_title);
    runner.make_db(&args.reference_path, &args.db_title, &db_path)?;
    log::info!("Built protein database {}", db_path.display());

    let out_path = tab_output_path(&args.outdir, &args.query_path, &args.db_title);
    runner.blastx(&args.query_path, &db_path, &out_path)?;
    let hits = load_hits(&out_path)?;
    log::info!("{} alignments in {}", hits.len(), out_path.display());

    Ok(hits)
}

pub fn print_hits(hits: &[AlignmentHit], top: usize) {
    println!("{}", OUTFMT6_COLUMNS.iter().join("\t"));
    for hit in hits.iter().take(top) {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            hit.query,
            hit.subject,
            hit.pc_identity,
            hit.aln_length,
            hit.mismatches,
            hit.gaps_opened,
            hit.query_start,
            hit.query_end,
            hit.subject_start,
            hit.subject_end,
            hit.e_value,
            hit.bitscore
        );
    }
}
