//! providers of host statistics.

use {
    crate::sample::{Enumeration, MemoryStats, ReadError},
    std::collections::VecDeque,
};

pub use self::{battery::*, cpu::*, memory::*};

/// a scripted source, for tests.
///
/// each read pops the next reading off of the front of the queue.
#[derive(Default)]
#[allow(dead_code, reason = "this is a testing utility.")]
pub struct Mock<T> {
    readings: VecDeque<T>,
}

impl<T> Mock<T> {
    #[allow(dead_code, reason = "this is a testing utility.")]
    pub fn new(readings: impl IntoIterator<Item = T>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    fn pop(&mut self) -> T {
        let Self { readings } = self;

        readings
            .pop_front()
            .expect("mock readings should not be empty")
    }
}

mod cpu {
    use {super::*, sysinfo::System};

    /// a source of per-core cpu usage.
    pub trait CpuSource {
        /// returns the usage of each core, as percentages, since the previous call.
        ///
        /// this does not wait between samples.
        fn per_core(&mut self) -> Result<Vec<f64>, ReadError>;
    }

    /// cpu usage backed by the operating system.
    pub struct SystemCpu {
        system: System,
    }

    // === impl SystemCpu ===

    impl SystemCpu {
        pub fn new() -> Self {
            let mut system = System::new();
            // take a baseline, so that the first read has something to compare against.
            system.refresh_cpu_usage();
            Self { system }
        }
    }

    impl Default for SystemCpu {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CpuSource for SystemCpu {
        fn per_core(&mut self) -> Result<Vec<f64>, ReadError> {
            let Self { system } = self;

            system.refresh_cpu_usage();
            let cores = system
                .cpus()
                .iter()
                .map(|cpu| f64::from(cpu.cpu_usage()))
                .collect::<Vec<_>>();

            if cores.is_empty() {
                return Err(ReadError::NoCpus);
            }

            Ok(cores)
        }
    }

    // === impl Mock ===

    impl CpuSource for Mock<Result<Vec<f64>, ReadError>> {
        fn per_core(&mut self) -> Result<Vec<f64>, ReadError> {
            self.pop()
        }
    }
}

mod memory {
    use {super::*, sysinfo::System};

    /// a source of virtual memory statistics.
    pub trait MemorySource {
        fn virtual_memory(&mut self) -> Result<MemoryStats, ReadError>;
    }

    /// memory statistics backed by the operating system.
    pub struct SystemMemory {
        system: System,
    }

    // === impl SystemMemory ===

    impl SystemMemory {
        pub fn new() -> Self {
            Self {
                system: System::new(),
            }
        }
    }

    impl Default for SystemMemory {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MemorySource for SystemMemory {
        fn virtual_memory(&mut self) -> Result<MemoryStats, ReadError> {
            let Self { system } = self;

            system.refresh_memory();
            let (total, used) = (system.total_memory(), system.used_memory());
            if total == 0 {
                return Err(ReadError::NoMemory);
            }

            Ok(MemoryStats {
                total,
                used,
                used_percent: used as f64 / total as f64 * 100.0,
            })
        }
    }

    // === impl Mock ===

    impl MemorySource for Mock<Result<MemoryStats, ReadError>> {
        fn virtual_memory(&mut self) -> Result<MemoryStats, ReadError> {
            self.pop()
        }
    }
}

mod battery {
    use {
        super::*,
        crate::sample::{BatteryReading, ChargeState, DeviceError, FatalError},
        ::battery::{Manager, State, units::energy::watt_hour},
    };

    /// a source of battery readings.
    pub trait BatterySource {
        /// enumerates every battery attached to the host.
        fn batteries(&mut self) -> Enumeration;
    }

    /// batteries attached to this host.
    #[derive(Default)]
    pub struct SystemBattery;

    // === impl SystemBattery ===

    impl BatterySource for SystemBattery {
        fn batteries(&mut self) -> Enumeration {
            let manager = Manager::new().map_err(|e| FatalError::Unavailable(e.to_string()))?;
            let batteries = manager
                .batteries()
                .map_err(|e| FatalError::Enumeration(e.to_string()))?;

            let readings = batteries
                .enumerate()
                .map(|(index, battery)| {
                    let battery = battery.map_err(|e| DeviceError::Unreadable {
                        index,
                        reason: e.to_string(),
                    })?;

                    let current = f64::from(battery.energy().get::<watt_hour>());
                    let full = f64::from(battery.energy_full().get::<watt_hour>());
                    if full <= 0.0 {
                        return Err(DeviceError::NoCapacity { index });
                    }

                    Ok(BatteryReading {
                        current,
                        full,
                        state: Self::state(battery.state()),
                    })
                })
                .collect();

            Ok(readings)
        }
    }

    impl SystemBattery {
        fn state(state: State) -> ChargeState {
            match state {
                State::Charging => ChargeState::Charging,
                State::Discharging => ChargeState::Discharging,
                State::Empty => ChargeState::Empty,
                State::Full => ChargeState::Full,
                _ => ChargeState::Unknown,
            }
        }
    }

    // === impl Mock ===

    impl BatterySource for Mock<Enumeration> {
        fn batteries(&mut self) -> Enumeration {
            self.pop()
        }
    }

}
