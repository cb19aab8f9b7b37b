//! Test-side instruction encoders.
