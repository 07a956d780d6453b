//! Request middleware.
//!
//! Authentication is not middleware here: handlers opt in through the
//! `SessionUser` extractor.

pub mod trace;

pub use trace::Trace;
