use std::fmt;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    B,
    Kb,
    Mb,
    Gb,
    Tb,
}

impl SizeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::B => "b",
            SizeUnit::Kb => "kb",
            SizeUnit::Mb => "mb",
            SizeUnit::Gb => "gb",
            SizeUnit::Tb => "tb",
        }
    }
}

/// A byte count scaled to the largest unit it reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumanSize {
    pub value: f64,
    pub unit: SizeUnit,
}

impl HumanSize {
    pub fn from_bytes(bytes: u64) -> Self {
        let (divisor, unit) = match bytes {
            b if b >= TB => (TB, SizeUnit::Tb),
            b if b >= GB => (GB, SizeUnit::Gb),
            b if b >= MB => (MB, SizeUnit::Mb),
            b if b >= KB => (KB, SizeUnit::Kb),
            _ => (1, SizeUnit::B),
        };

        Self {
            value: bytes as f64 / divisor as f64,
            unit,
        }
    }
}

impl fmt::Display for HumanSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit == SizeUnit::B {
            write!(f, "{} {}", self.value as u64, self.unit.as_str())
        } else {
            write!(f, "{:.1} {}", self.value, self.unit.as_str())
        }
    }
}
