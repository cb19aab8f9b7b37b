/// Field and immediate extraction.
pub mod decode;

/// Compressed instruction expansion.
pub mod rvc;
