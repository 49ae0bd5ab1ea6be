//! SLURM resource units.
//!
//! Memory and wall-time requests as they appear in `#SBATCH` lines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("Invalid memory request: {0}")]
    Memory(String),
    #[error("Invalid wall-time request: {0}")]
    WallTime(String),
}

/// Memory request in megabytes.
///
/// Parses SLURM suffix form ("64G", "1000M", "4096K", plain MB) and
/// renders back to the shortest suffix form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Memory(u64);

impl Memory {
    /// Construct from a megabyte count. Zero is not a valid request.
    pub fn from_mb(mb: u64) -> Result<Self, UnitError> {
        if mb == 0 {
            return Err(UnitError::Memory("0".to_string()));
        }
        Ok(Self(mb))
    }

    pub fn as_mb(&self) -> u64 {
        self.0
    }
}

impl FromStr for Memory {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || UnitError::Memory(s.to_string());

        let mb = if let Some(stripped) = s.strip_suffix(['G', 'g']) {
            stripped.parse::<u64>().ok().map(|v| v * 1024)
        } else if let Some(stripped) = s.strip_suffix(['M', 'm']) {
            stripped.parse::<u64>().ok()
        } else if let Some(stripped) = s.strip_suffix(['K', 'k']) {
            stripped.parse::<u64>().ok().map(|v| v / 1024)
        } else {
            // Plain numbers are megabytes, as in sbatch
            s.parse::<u64>().ok()
        };

        Self::from_mb(mb.ok_or_else(invalid)?).map_err(|_| invalid())
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 1024 == 0 {
            write!(f, "{}G", self.0 / 1024)
        } else {
            write!(f, "{}M", self.0)
        }
    }
}

impl TryFrom<String> for Memory {
    type Error = UnitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Memory> for String {
    fn from(mem: Memory) -> Self {
        mem.to_string()
    }
}

/// Wall-clock limit in seconds.
///
/// Parses `D-HH:MM:SS`, `HH:MM:SS`, and `MM:SS`; renders as `HH:MM:SS`
/// with hours allowed past 24 so a one-day limit stays `24:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallTime(u64);

impl WallTime {
    pub fn from_secs(secs: u64) -> Result<Self, UnitError> {
        if secs == 0 {
            return Err(UnitError::WallTime("0".to_string()));
        }
        Ok(Self(secs))
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl FromStr for WallTime {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || UnitError::WallTime(s.to_string());

        // Optional day prefix (D-HH:MM:SS)
        let (days, time_part) = match s.split_once('-') {
            Some((d, rest)) => (d.parse::<u64>().map_err(|_| invalid())?, rest),
            None => (0, s),
        };

        let parts: Vec<u64> = time_part
            .split(':')
            .map(|p| p.parse().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;

        let seconds = match parts.len() {
            3 => parts[0] * 3600 + parts[1] * 60 + parts[2],
            2 => parts[0] * 60 + parts[1],
            _ => return Err(invalid()),
        };

        Self::from_secs(days * 86400 + seconds).map_err(|_| invalid())
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let mins = (self.0 % 3600) / 60;
        let secs = self.0 % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, mins, secs)
    }
}

impl TryFrom<String> for WallTime {
    type Error = UnitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WallTime> for String {
    fn from(time: WallTime) -> Self {
        time.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory() {
        assert_eq!("64G".parse::<Memory>().unwrap().as_mb(), 64 * 1024);
        assert_eq!("1000M".parse::<Memory>().unwrap().as_mb(), 1000);
        assert_eq!("4096".parse::<Memory>().unwrap().as_mb(), 4096);
        assert!("".parse::<Memory>().is_err());
        assert!("0".parse::<Memory>().is_err());
        assert!("lots".parse::<Memory>().is_err());
    }

    #[test]
    fn test_memory_round_trip() {
        assert_eq!("64G".parse::<Memory>().unwrap().to_string(), "64G");
        assert_eq!("1000M".parse::<Memory>().unwrap().to_string(), "1000M");
        assert_eq!("2048M".parse::<Memory>().unwrap().to_string(), "2G");
    }

    #[test]
    fn test_parse_wall_time() {
        assert_eq!("24:00:00".parse::<WallTime>().unwrap().as_secs(), 86400);
        assert_eq!("1-00:00:00".parse::<WallTime>().unwrap().as_secs(), 86400);
        assert_eq!("30:00".parse::<WallTime>().unwrap().as_secs(), 1800);
        assert!("3600".parse::<WallTime>().is_err());
        assert!("".parse::<WallTime>().is_err());
        assert!("24:xx:00".parse::<WallTime>().is_err());
    }

    #[test]
    fn test_wall_time_renders_whole_hours() {
        // One day must stay in HH:MM:SS form for the directive block
        assert_eq!("24:00:00".parse::<WallTime>().unwrap().to_string(), "24:00:00");
        assert_eq!("1-12:30:00".parse::<WallTime>().unwrap().to_string(), "36:30:00");
        assert_eq!("05:00".parse::<WallTime>().unwrap().to_string(), "00:05:00");
    }
}
