use std::{
  fmt,
  io::{self, Read},
  process::{Command, ExitStatus},
};
use thiserror::Error;

/// A program plus the ordered arguments it is about to be run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Invocation {
      program: program.into(),
      args: args.into_iter().map(Into::into).collect(),
    }
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.program)?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

#[derive(Debug, Error)]
pub enum RunError {
  #[error("failed to start {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
  #[error("failed to capture output: {0}")]
  Capture(#[source] io::Error),
  #[error("{}", describe_exit(.code))]
  Exit { code: Option<i32>, output: String },
}

impl RunError {
  /// Output captured before the failure, empty when nothing was read.
  pub fn output(&self) -> &str {
    match self {
      RunError::Exit { output, .. } => output,
      _ => "",
    }
  }
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exit status {code}"),
    None => "terminated by signal".to_string(),
  }
}

/// Runs an invocation to completion and hands back stdout and stderr merged
/// into one text blob.
pub trait CommandRunner {
  fn combined_output(&self, invocation: &Invocation) -> Result<String, RunError>;
}

/// Spawns real processes on this machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn combined_output(&self, invocation: &Invocation) -> Result<String, RunError> {
    let (mut reader, writer) = io::pipe().map_err(RunError::Capture)?;
    let stderr = writer.try_clone().map_err(RunError::Capture)?;

    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args).stdout(writer).stderr(stderr);

    let mut child = command.spawn().map_err(|source| RunError::Spawn {
      program: invocation.program.clone(),
      source,
    })?;
    // The command still owns the write ends; reading would never hit EOF.
    drop(command);

    let mut bytes = Vec::new();
    let read = reader.read_to_end(&mut bytes);
    let status = child.wait().map_err(RunError::Capture)?;
    read.map_err(RunError::Capture)?;

    let output = String::from_utf8_lossy(&bytes).into_owned();
    check_status(status, output)
  }
}

fn check_status(status: ExitStatus, output: String) -> Result<String, RunError> {
  if status.success() {
    Ok(output)
  } else {
    Err(RunError::Exit {
      code: status.code(),
      output,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_program_and_args_separated_by_spaces() {
    let invocation = Invocation::new("ssh", ["node2", "bash -c \"/bin/tool version\""]);
    assert_eq!(invocation.to_string(), "ssh node2 bash -c \"/bin/tool version\"");
  }

  #[test]
  fn renders_bare_program() {
    let invocation = Invocation::new("/bin/tool", Vec::<String>::new());
    assert_eq!(invocation.to_string(), "/bin/tool");
  }

  #[test]
  fn exit_error_keeps_output() {
    let err = RunError::Exit {
      code: Some(1),
      output: "command not found".to_string(),
    };
    assert_eq!(err.to_string(), "exit status 1");
    assert_eq!(err.output(), "command not found");
  }

  #[cfg(unix)]
  #[test]
  fn captures_stdout_and_stderr_together() {
    let invocation = Invocation::new("/bin/sh", ["-c", "echo out; echo err 1>&2"]);
    let output = SystemRunner.combined_output(&invocation).unwrap();
    assert_eq!(output, "out\nerr\n");
  }

  #[cfg(unix)]
  #[test]
  fn reports_non_zero_exit_with_output() {
    let invocation = Invocation::new("/bin/sh", ["-c", "echo nope 1>&2; exit 3"]);
    let err = SystemRunner.combined_output(&invocation).unwrap_err();
    match err {
      RunError::Exit { code, output } => {
        assert_eq!(code, Some(3));
        assert_eq!(output, "nope\n");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn reports_missing_program() {
    let invocation = Invocation::new("/nonexistent/versionprobe-test-binary", ["version"]);
    let err = SystemRunner.combined_output(&invocation).unwrap_err();
    assert!(matches!(err, RunError::Spawn { .. }));
    assert!(err
      .to_string()
      .contains("failed to start /nonexistent/versionprobe-test-binary"));
    assert_eq!(err.output(), "");
  }
}
