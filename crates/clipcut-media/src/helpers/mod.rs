// crates/clipcut-media/src/helpers/mod.rs
//
// Decode/encode plumbing shared by probe, decode and export.
// Not re-exported from lib.rs.

pub mod rgb;
pub mod seek;
pub mod timing;
