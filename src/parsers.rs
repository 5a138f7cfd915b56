use std::io::{Error, ErrorKind};

pub fn parse_host(v: &str) -> Result<String, Error> {
  let host = v.trim();
  if host.is_empty() {
    return Err(Error::new(ErrorKind::InvalidInput, "host must not be empty"));
  }
  if host.starts_with('-') {
    return Err(Error::new(
      ErrorKind::InvalidInput,
      format!("host must not start with '-': {host}"),
    ));
  }
  Ok(host.to_string())
}
