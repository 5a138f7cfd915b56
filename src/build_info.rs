use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
  Oneline,
  Multiline,
  Json,
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
  pub name: &'static str,
  pub version: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
  name: env!("CARGO_PKG_NAME"),
  version: env!("CARGO_PKG_VERSION"),
};

impl BuildInfo {
  pub fn render(&self, format: Format) -> anyhow::Result<String> {
    let rendered = match format {
      Format::Oneline => format!("{} version {}", self.name, self.version),
      Format::Multiline => format!("Name: {}\nVersion: {}", self.name, self.version),
      Format::Json => serde_json::to_string(self)?,
    };
    Ok(rendered)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const INFO: BuildInfo = BuildInfo { name: "tool", version: "1.2.3" };

  #[test]
  fn renders_oneline() {
    assert_eq!(INFO.render(Format::Oneline).unwrap(), "tool version 1.2.3");
  }

  #[test]
  fn renders_multiline() {
    assert_eq!(INFO.render(Format::Multiline).unwrap(), "Name: tool\nVersion: 1.2.3");
  }

  #[test]
  fn renders_json() {
    let json = INFO.render(Format::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "tool");
    assert_eq!(value["version"], "1.2.3");
  }

  #[test]
  fn describes_this_crate() {
    assert_eq!(BUILD_INFO.name, "versionprobe");
    assert_eq!(BUILD_INFO.version, env!("CARGO_PKG_VERSION"));
  }
}
