#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Resource usage of this process at one ingestion phase.
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseSample {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub peak_memory_mb: u64,
    /// Time spent since the previous phase was entered.
    pub phase_time: Duration,
    pub total_time: Duration,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    last_phase_at: Instant,
    peak_memory_mb: u64,
}

/// Opt-in per-phase CPU/memory logging for the CLI (`--monitor`).
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    pid: Option<Pid>,
    started_at: Instant,
    state: Mutex<MonitorState>,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = enabled
            .then(sysinfo::get_current_pid)
            .and_then(|pid| pid.ok());
        let now = Instant::now();

        Self {
            pid,
            started_at: now,
            state: Mutex::new(MonitorState {
                system: System::new(),
                last_phase_at: now,
                peak_memory_mb: 0,
            }),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.pid.is_some()
    }

    pub fn sample(&self) -> Option<PhaseSample> {
        let pid = self.pid?;
        let mut state = self.state.lock().ok()?;

        state.system.refresh_memory();
        state
            .system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let (cpu_usage, memory_mb) = {
            let process = state.system.process(pid)?;
            (process.cpu_usage(), process.memory() / 1024 / 1024)
        };
        state.peak_memory_mb = state.peak_memory_mb.max(memory_mb);

        let now = Instant::now();
        let phase_time = now.duration_since(state.last_phase_at);
        state.last_phase_at = now;

        Some(PhaseSample {
            cpu_usage,
            memory_mb,
            peak_memory_mb: state.peak_memory_mb,
            phase_time,
            total_time: now.duration_since(self.started_at),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(sample) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Phase: {:?}, Total: {:?}",
                phase,
                sample.cpu_usage,
                sample.memory_mb,
                sample.peak_memory_mb,
                sample.phase_time,
                sample.total_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(sample) = self.sample() {
            tracing::info!(
                "📊 Ingestion finished in {:?}, peak memory {}MB",
                sample.total_time,
                sample.peak_memory_mb
            );
        }
    }
}

// 非 CLI 環境（Lambda）不量測
#[cfg(not(feature = "cli"))]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn is_enabled(&self) -> bool {
        false
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}
}
