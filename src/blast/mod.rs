mod runner;
mod table;

pub use runner::BlastRunner;
pub use table::{best_hit, load_hits, AlignmentHit, OUTFMT6_COLUMNS};
