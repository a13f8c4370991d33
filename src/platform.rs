//! Target platforms understood by the prepare step.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use thiserror::Error;

/// Mobile platform the prepare step generates artifacts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Platform {
  /// Android: manifest intent filters and the web hook page.
  Android,
  /// iOS: entitlements and app site association files.
  Ios,
}

impl Platform {
  /// Identifier used on the command line and by the host build tool.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Android => "android",
      Self::Ios => "ios",
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Raised when a platform identifier is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported platform `{0}`, expected `android` or `ios`")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
  type Err = UnknownPlatform;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "android" => Ok(Self::Android),
      "ios" => Ok(Self::Ios),
      other => Err(UnknownPlatform(other.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_known_platforms() {
    assert_eq!("android".parse::<Platform>(), Ok(Platform::Android));
    assert_eq!("ios".parse::<Platform>(), Ok(Platform::Ios));
    assert_eq!(Platform::Ios.to_string(), "ios");
  }

  #[test]
  fn rejects_unknown_platforms() {
    let err = "windows".parse::<Platform>().unwrap_err();
    assert_eq!(err, UnknownPlatform("windows".into()));
    assert!(err.to_string().contains("windows"));
  }
}
