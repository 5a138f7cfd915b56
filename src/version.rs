use thiserror::Error;
use tracing::debug;

use crate::command::{CommandRunner, Invocation, RunError};
use crate::executable::ExecutablePath;
use crate::utils::path_to_string;

pub const VERSION_ARGS: [&str; 3] = ["version", "--format", "oneline"];
pub const DEFAULT_REMOTE_SHELL: &str = "ssh";

/// Where the queried binary lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
  Local,
  Remote(&'a str),
}

impl<'a> Target<'a> {
  /// An empty host means this machine.
  pub fn from_host(host: Option<&'a str>) -> Self {
    match host {
      Some(host) if !host.is_empty() => Target::Remote(host),
      _ => Target::Local,
    }
  }
}

/// Builds the `version --format oneline` call for `path`, wrapped in the
/// remote shell when the target is another host. The path is embedded in
/// the remote command unescaped.
pub fn version_invocation(path: &str, target: Target<'_>, remote_shell: &str) -> Invocation {
  match target {
    Target::Local => Invocation::new(path, VERSION_ARGS),
    Target::Remote(host) => Invocation::new(
      remote_shell,
      [
        host.to_string(),
        format!("bash -c \"{} {}\"", path, VERSION_ARGS.join(" ")),
      ],
    ),
  }
}

#[derive(Debug, Error)]
pub enum VersionError {
  #[error("getting {tool} binary path: {source}")]
  PathResolutionFailed {
    tool: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
  #[error("\"{command}\" failed with \"{output}\": {source}")]
  ExecutionFailed {
    command: String,
    output: String,
    #[source]
    source: RunError,
  },
}

/// Version lookups for the nodes of a fleet: the coordinator running on this
/// machine and the agents reachable over the remote shell.
pub trait NodeVersions {
  fn coordinator_version(&self) -> Result<String, VersionError>;
  fn agent_version(&self, host: &str) -> Result<String, VersionError>;
}

pub struct VersionRetriever<P, R> {
  resolver: P,
  runner: R,
  remote_shell: String,
  tool: String,
}

impl<P: ExecutablePath, R: CommandRunner> VersionRetriever<P, R> {
  pub fn new(resolver: P, runner: R) -> Self {
    VersionRetriever {
      resolver,
      runner,
      remote_shell: DEFAULT_REMOTE_SHELL.to_string(),
      tool: env!("CARGO_PKG_NAME").to_string(),
    }
  }

  pub fn with_remote_shell(mut self, program: impl Into<String>) -> Self {
    self.remote_shell = program.into();
    self
  }

  pub fn with_tool_name(mut self, tool: impl Into<String>) -> Self {
    self.tool = tool.into();
    self
  }

  pub fn local_version(&self) -> Result<String, VersionError> {
    self.resolve_version(Target::Local)
  }

  pub fn remote_version(&self, host: &str) -> Result<String, VersionError> {
    self.resolve_version(Target::from_host(Some(host)))
  }

  fn resolve_version(&self, target: Target<'_>) -> Result<String, VersionError> {
    let path = self
      .resolver
      .executable_path()
      .and_then(|path| path_to_string(&path))
      .map_err(|source| VersionError::PathResolutionFailed {
        tool: self.tool.clone(),
        source: source.into(),
      })?;

    let invocation = version_invocation(&path, target, &self.remote_shell);
    let command = invocation.to_string();
    debug!("running cmd {:?}", command);

    let output = self
      .runner
      .combined_output(&invocation)
      .map_err(|source| VersionError::ExecutionFailed {
        output: source.output().to_string(),
        command,
        source,
      })?;

    debug!("output: {:?}", output);
    Ok(output)
  }
}

impl<P: ExecutablePath, R: CommandRunner> NodeVersions for VersionRetriever<P, R> {
  fn coordinator_version(&self) -> Result<String, VersionError> {
    self.local_version()
  }

  fn agent_version(&self, host: &str) -> Result<String, VersionError> {
    self.remote_version(host)
  }
}
