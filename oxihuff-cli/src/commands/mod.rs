//! Command implementations for OxiHuff CLI.

pub mod compare;
pub mod compress;
pub mod decompress;
pub mod info;
pub mod verify;

pub use compare::cmd_compare;
pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use verify::cmd_verify;
