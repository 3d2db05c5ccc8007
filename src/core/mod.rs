//! Core cleaning building blocks: parameters, the in-memory record table,
//! geometry helpers, country lookup, individual checks, the validator and
//! the normalize-then-validate pipeline. These are consumed by the
//! high-level `api` module.
pub mod checks;
pub mod geo;
pub mod lookup;
pub mod normalize;
pub mod params;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod validator;
