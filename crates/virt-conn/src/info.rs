//! Runtime state and host capability records reported by a hypervisor.

use serde::{Deserialize, Serialize};

// ── Domain state ──────────────────────────────────────────────────────────────

/// Lifecycle state of a domain, with libvirt's stable numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum DomainState {
    NoState = 0,
    Running = 1,
    Blocked = 2,
    Paused = 3,
    Shutdown = 4,
    Shutoff = 5,
    Crashed = 6,
    PmSuspended = 7,
}

impl TryFrom<u32> for DomainState {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, ()> {
        match value {
            0 => Ok(DomainState::NoState),
            1 => Ok(DomainState::Running),
            2 => Ok(DomainState::Blocked),
            3 => Ok(DomainState::Paused),
            4 => Ok(DomainState::Shutdown),
            5 => Ok(DomainState::Shutoff),
            6 => Ok(DomainState::Crashed),
            7 => Ok(DomainState::PmSuspended),
            _ => Err(()),
        }
    }
}

// ── Info records ──────────────────────────────────────────────────────────────

/// Snapshot of a domain's state and resource usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    pub state: DomainState,
    /// Maximum memory in KiB.
    pub max_mem: u64,
    /// Memory currently assigned, in KiB.
    pub memory: u64,
    pub nr_virt_cpu: u32,
    /// Cumulative guest CPU time in nanoseconds.
    pub cpu_time: u64,
}

/// Hardware description of the host node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub model: String,
    /// Total host memory in KiB.
    pub memory: u64,
    pub cpus: u32,
    pub mhz: u32,
    /// NUMA cell count.
    pub nodes: u32,
    pub sockets: u32,
    pub cores: u32,
    pub threads: u32,
}

// ── Call flags ────────────────────────────────────────────────────────────────

/// Bitmask flags for listing domains; combine with `|`.
pub mod list_all_domains_flags {
    pub const ACTIVE: u32 = 1 << 0;
    pub const INACTIVE: u32 = 1 << 1;
    pub const PERSISTENT: u32 = 1 << 2;
    pub const TRANSIENT: u32 = 1 << 3;
    pub const RUNNING: u32 = 1 << 4;
    pub const PAUSED: u32 = 1 << 5;
    pub const SHUTOFF: u32 = 1 << 6;
    pub const OTHER: u32 = 1 << 7;
    pub const MANAGEDSAVE: u32 = 1 << 8;
    pub const NO_MANAGEDSAVE: u32 = 1 << 9;
    pub const AUTOSTART: u32 = 1 << 10;
    pub const NO_AUTOSTART: u32 = 1 << 11;
    pub const HAS_SNAPSHOT: u32 = 1 << 12;
    pub const NO_SNAPSHOT: u32 = 1 << 13;
    pub const HAS_CHECKPOINT: u32 = 1 << 14;
    pub const NO_CHECKPOINT: u32 = 1 << 15;
}

/// Bitmask flags for fetching a domain's XML description.
pub mod xml_desc_flags {
    /// Include security-sensitive information (e.g. VNC passwords).
    pub const SECURE: u32 = 1 << 0;
    /// Describe the persistent config rather than the live one.
    pub const INACTIVE: u32 = 1 << 1;
    pub const UPDATE_CPU: u32 = 1 << 2;
    pub const MIGRATABLE: u32 = 1 << 3;
}
