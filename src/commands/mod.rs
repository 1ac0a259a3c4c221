pub mod annotate;
pub mod enzymes;
pub mod run;
pub mod search;
