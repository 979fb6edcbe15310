//! Command handlers, one module per subcommand.

pub mod completion;
pub mod empty;
pub mod export;
pub mod init;
pub mod list;
pub mod populate;
pub mod show;
pub mod stats;
pub mod submit;
pub mod version;
