use {
    std::fmt::{self, Display},
    thiserror::Error,
};


/// the number of bytes in a (decimal) gigabyte.
const GIGABYTE: f64 = 1_000_000_000.0;

/// the aggregate cpu load, averaged over every core.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CpuSample {
    /// mean usage across all cores, as a rounded percentage.
    pub usage: u32,
    /// the number of cores that were sampled.
    pub cores: usize,
}

/// a virtual memory reading, as reported by the provider.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryStats {
    /// total physical memory, in bytes.
    pub total: u64,
    /// memory in use, in bytes.
    pub used: u64,
    /// `used` as a percentage of `total`.
    pub used_percent: f64,
}

/// memory usage, prepared for display.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemorySample {
    pub percent: u32,
    /// used memory in gigabytes, to one decimal place.
    pub used_gb: f64,
    /// total memory in gigabytes, to one decimal place.
    pub total_gb: f64,
}

/// the charging state of a battery.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChargeState {
    Unknown,
    Empty,
    Full,
    Charging,
    Discharging,
}

/// one battery's reading, as reported by the provider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatteryReading {
    /// the energy currently stored.
    pub current: f64,
    /// the energy stored when fully charged.
    pub full: f64,
    pub state: ChargeState,
}

/// the battery line's values.
///
/// NB: when several batteries are present, this holds the values of the last one that could be
/// read. it is not an aggregate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatterySample {
    /// remaining charge, as a rounded percentage.
    pub charge: u32,
    /// `None` if no battery in the enumeration could be read.
    pub state: Option<ChargeState>,
}

/// the text shown in a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayText {
    pub cpu: CpuSample,
    pub memory: MemorySample,
    /// `None` when the battery line should be omitted.
    pub battery: Option<BatterySample>,
}

/// what to do when a cpu or memory read fails.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReadPolicy {
    /// substitute a zeroed reading, and carry on.
    #[default]
    Degrade,
    /// surface the failure to the caller.
    Strict,
}

/// a cpu or memory provider could not be read.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ReadError {
    #[error("no cpus were reported")]
    NoCpus,
    #[error("memory statistics are unavailable")]
    NoMemory,
}

/// a single battery could not be read.
///
/// other batteries in the same enumeration may still be valid.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DeviceError {
    #[error("battery {index} could not be read: {reason}")]
    Unreadable { index: usize, reason: String },
    #[error("battery {index} reports no full capacity")]
    NoCapacity { index: usize },
}

/// batteries could not be enumerated at all.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FatalError {
    #[error("battery subsystem is unavailable: {0}")]
    Unavailable(String),
    #[error("batteries could not be enumerated: {0}")]
    Enumeration(String),
}

/// the outcome of enumerating the host's batteries.
pub type Enumeration = Result<Vec<Result<BatteryReading, DeviceError>>, FatalError>;

// === impl CpuSample ===

impl CpuSample {
    /// averages a list of per-core usage percentages.
    pub fn from_cores(cores: &[f64]) -> Self {
        let count = cores.len();
        if count == 0 {
            return Self::default();
        }

        let total = cores.iter().sum::<f64>();
        let usage = (total / count as f64).round() as u32;

        Self {
            usage,
            cores: count,
        }
    }
}

impl Display for CpuSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { usage, cores } = self;
        writeln!(f, "CPU Usage: {usage}% ({cores} cores)")
    }
}

// === impl MemorySample ===

impl From<MemoryStats> for MemorySample {
    fn from(
        MemoryStats {
            total,
            used,
            used_percent,
        }: MemoryStats,
    ) -> Self {
        Self {
            percent: used_percent.round() as u32,
            used_gb: gigabytes(used),
            total_gb: gigabytes(total),
        }
    }
}

impl Display for MemorySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            percent,
            used_gb,
            total_gb,
        } = self;
        writeln!(f, "Memory Usage: {percent}% ({used_gb}GB/{total_gb}GB)")
    }
}

/// converts a byte count into gigabytes, rounded to one decimal place.
fn gigabytes(bytes: u64) -> f64 {
    let gb = bytes as f64 / GIGABYTE;
    (gb * 10.0).round() / 10.0
}

// === impl BatterySample ===

impl BatterySample {
    /// reduces an enumeration of batteries into the values to display.
    ///
    /// returns `None` if enumeration failed outright, or if there are no batteries. batteries
    /// that could not be read are skipped.
    pub fn from_enumeration(enumeration: Enumeration) -> Option<Self> {
        let batteries = match enumeration {
            Ok(batteries) => batteries,
            Err(error) => {
                log::debug!("omitting battery line: {error}");
                return None;
            }
        };

        if batteries.is_empty() {
            return None;
        }

        let mut sample = Self::default();
        for battery in batteries {
            let BatteryReading {
                current,
                full,
                state,
            } = match battery {
                Ok(reading) => reading,
                Err(error) => {
                    log::debug!("skipping battery: {error}");
                    continue;
                }
            };
            sample.charge = (current / full * 100.0).round() as u32;
            sample.state = Some(state);
        }

        Some(sample)
    }
}

impl Display for BatterySample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { charge, state } = self;
        let state = state.map(|s| s.as_str()).unwrap_or_default();
        writeln!(f, "Battery Left: {charge}% ({state})")
    }
}

// === impl ChargeState ===

impl ChargeState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Empty => "Empty",
            Self::Full => "Full",
            Self::Charging => "Charging",
            Self::Discharging => "Discharging",
        }
    }
}

impl Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// === impl DisplayText ===

impl Display for DisplayText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            cpu,
            memory,
            battery,
        } = self;

        cpu.fmt(f)?;
        memory.fmt(f)?;
        match battery {
            Some(battery) => battery.fmt(f),
            None => Ok(()),
        }
    }
}

// === impl ReadPolicy ===

impl ReadPolicy {
    /// applies this policy to the outcome of a read.
    pub fn settle<T: Default>(self, read: Result<T, ReadError>) -> Result<T, ReadError> {
        match (self, read) {
            (_, Ok(reading)) => Ok(reading),
            (Self::Degrade, Err(error)) => {
                log::debug!("substituting an empty reading: {error}");
                Ok(T::default())
            }
            (Self::Strict, Err(error)) => Err(error),
        }
    }
}
