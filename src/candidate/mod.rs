//! Candidate selection for per-scale scans.

pub(crate) mod topk;
