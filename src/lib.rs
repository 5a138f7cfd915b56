//! Asks a command-line binary for its version, on this machine or on a remote
//! host over `ssh`.

pub mod build_info;
pub mod command;
pub mod executable;
pub mod parsers;
pub mod utils;
pub mod version;

pub use command::{CommandRunner, Invocation, RunError, SystemRunner};
pub use executable::{CurrentExecutable, ExecutablePath, ExplicitPath};
pub use version::{NodeVersions, Target, VersionError, VersionRetriever};
