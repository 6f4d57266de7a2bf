// Business domains
pub mod sync;
