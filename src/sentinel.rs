use crate::{
    sample::{BatterySample, CpuSample, DisplayText, MemorySample, ReadError, ReadPolicy},
    source::{BatterySource, CpuSource, MemorySource, SystemBattery, SystemCpu, SystemMemory},
};

/// observes host statistics.
pub struct Sentinel<C = SystemCpu, M = SystemMemory, B = SystemBattery> {
    /// the source of cpu usage.
    cpu: C,
    /// the source of memory usage.
    memory: M,
    /// the source of battery readings.
    battery: B,
    /// what to do when a read fails.
    policy: ReadPolicy,
}

// === impl Sentinel ===

impl Sentinel {
    /// creates a [`Sentinel`] that observes this host, degrading failed reads.
    pub fn system() -> Self {
        Self::new(
            SystemCpu::new(),
            SystemMemory::new(),
            SystemBattery,
            ReadPolicy::Degrade,
        )
    }
}

impl<C, M, B> Sentinel<C, M, B>
where
    C: CpuSource,
    M: MemorySource,
    B: BatterySource,
{
    pub fn new(cpu: C, memory: M, battery: B, policy: ReadPolicy) -> Self {
        Self {
            cpu,
            memory,
            battery,
            policy,
        }
    }

    /// samples the cpu, memory, and batteries, in that order.
    pub fn observe(&mut self) -> Result<DisplayText, ReadError> {
        let Self {
            cpu,
            memory,
            battery,
            policy,
        } = self;

        let cpu = policy
            .settle(cpu.per_core())
            .map(|cores| CpuSample::from_cores(&cores))?;
        let memory = policy
            .settle(memory.virtual_memory())
            .map(MemorySample::from)?;
        let battery = BatterySample::from_enumeration(battery.batteries());

        Ok(DisplayText {
            cpu,
            memory,
            battery,
        })
    }
}
