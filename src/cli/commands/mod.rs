//! One module per subcommand, each exposing an `execute` entry point.

pub mod add;
pub mod audit_cmd;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod init;
pub mod list;
pub mod show;
