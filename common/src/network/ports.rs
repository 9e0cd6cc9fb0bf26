use std::fmt;
use std::ops::RangeInclusive;

use crate::error::TargetError;

/// Inclusive range of TCP ports for the connect scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, TargetError> {
        if start > end {
            return Err(TargetError::InvalidPortRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(port: u16) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn len(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    pub fn to_vec(&self) -> Vec<u16> {
        self.iter().collect()
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
