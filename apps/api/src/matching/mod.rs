// Candidate/job match scoring.
// Implements: profile models, factor scoring, red flags, threshold routing, HTTP handlers.
// Parsing of raw CV/JD text happens upstream; this module only consumes structured profiles.

pub mod engine;
pub mod factors;
pub mod handlers;
pub mod profile;
pub mod red_flags;
pub mod routing;
