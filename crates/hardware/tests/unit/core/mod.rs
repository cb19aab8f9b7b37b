/// Zicsr instructions and CSR access rules.
pub mod csr;

/// Fetch, decode, and integer execution.
pub mod execution;


/// Instruction cache coherence.
pub mod icache;
