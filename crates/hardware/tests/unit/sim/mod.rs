/// Host-side accessors of `Simulator`.
pub mod simulator;
