//! Pairwise hardware compatibility rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::build::BuildSelection;
use crate::catalog::{Category, ComponentSpec};

/// Watts reserved for everything other than the graphics card.
pub const SYSTEM_POWER_BASELINE_W: u32 = 150;

/// A violated compatibility rule, with the values that violated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum IncompatibilityIssue {
    /// CPU and motherboard sockets differ.
    SocketMismatch {
        cpu_socket: String,
        motherboard_socket: String,
    },
    /// Memory modules are not the type the motherboard takes.
    MemoryTypeMismatch {
        memory_type: String,
        motherboard_ram_type: String,
    },
    /// Power supply cannot carry the GPU plus the system baseline.
    PowerInsufficient { psu_power: u32, required_power: u64 },
    /// Cooler does not list the CPU's socket.
    CoolerSocketUnsupported {
        cpu_socket: String,
        supported_sockets: Vec<String>,
    },
}

impl IncompatibilityIssue {
    /// The two category slots involved.
    pub fn categories(&self) -> (Category, Category) {
        match self {
            IncompatibilityIssue::SocketMismatch { .. } => (Category::Cpu, Category::Motherboard),
            IncompatibilityIssue::MemoryTypeMismatch { .. } => {
                (Category::Ram, Category::Motherboard)
            }
            IncompatibilityIssue::PowerInsufficient { .. } => (Category::Psu, Category::Gpu),
            IncompatibilityIssue::CoolerSocketUnsupported { .. } => {
                (Category::Cpu, Category::Cooler)
            }
        }
    }

    /// Human-readable explanation.
    pub fn description(&self) -> String {
        match self {
            IncompatibilityIssue::SocketMismatch {
                cpu_socket,
                motherboard_socket,
            } => format!(
                "CPU socket {} does not match motherboard socket {}",
                cpu_socket, motherboard_socket
            ),
            IncompatibilityIssue::MemoryTypeMismatch {
                memory_type,
                motherboard_ram_type,
            } => format!(
                "{} memory is not supported by a {} motherboard",
                memory_type, motherboard_ram_type
            ),
            IncompatibilityIssue::PowerInsufficient {
                psu_power,
                required_power,
            } => format!(
                "Power supply provides {} W but the build needs at least {} W",
                psu_power, required_power
            ),
            IncompatibilityIssue::CoolerSocketUnsupported {
                cpu_socket,
                supported_sockets,
            } => format!(
                "Cooler does not support CPU socket {} (supports: {})",
                cpu_socket,
                if supported_sockets.is_empty() {
                    "none".to_string()
                } else {
                    supported_sockets.join(", ")
                }
            ),
        }
    }
}

impl fmt::Display for IncompatibilityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

type Rule = fn(&BuildSelection) -> Option<IncompatibilityIssue>;

/// Evaluation order of the rules; issues are reported in this order.
const RULES: [Rule; 4] = [
    socket_match,
    memory_type_match,
    power_sufficiency,
    cooler_socket_support,
];

/// Check every rule against the selection.
///
/// A rule whose pair of slots is not both filled is skipped, so partial
/// selections only report problems between components that are present.
pub fn check_compatibility(selection: &BuildSelection) -> Vec<IncompatibilityIssue> {
    RULES.iter().filter_map(|rule| rule(selection)).collect()
}

fn spec(selection: &BuildSelection, category: Category) -> Option<&ComponentSpec> {
    selection.get(category).map(|c| &c.spec)
}

fn socket_match(selection: &BuildSelection) -> Option<IncompatibilityIssue> {
    let (ComponentSpec::Cpu { socket: cpu }, ComponentSpec::Motherboard { socket: board, .. }) = (
        spec(selection, Category::Cpu)?,
        spec(selection, Category::Motherboard)?,
    ) else {
        return None;
    };

    (cpu != board).then(|| IncompatibilityIssue::SocketMismatch {
        cpu_socket: cpu.clone(),
        motherboard_socket: board.clone(),
    })
}

fn memory_type_match(selection: &BuildSelection) -> Option<IncompatibilityIssue> {
    let (ComponentSpec::Ram { memory_type, .. }, ComponentSpec::Motherboard { ram_type, .. }) = (
        spec(selection, Category::Ram)?,
        spec(selection, Category::Motherboard)?,
    ) else {
        return None;
    };

    (memory_type != ram_type).then(|| IncompatibilityIssue::MemoryTypeMismatch {
        memory_type: memory_type.clone(),
        motherboard_ram_type: ram_type.clone(),
    })
}

fn power_sufficiency(selection: &BuildSelection) -> Option<IncompatibilityIssue> {
    let (ComponentSpec::Psu { power: psu }, ComponentSpec::Gpu { power: gpu }) = (
        spec(selection, Category::Psu)?,
        spec(selection, Category::Gpu)?,
    ) else {
        return None;
    };

    let required = u64::from(*gpu) + u64::from(SYSTEM_POWER_BASELINE_W);
    (u64::from(*psu) < required).then_some(IncompatibilityIssue::PowerInsufficient {
        psu_power: *psu,
        required_power: required,
    })
}

fn cooler_socket_support(selection: &BuildSelection) -> Option<IncompatibilityIssue> {
    let (
        ComponentSpec::Cpu { socket },
        ComponentSpec::Cooler {
            supported_sockets, ..
        },
    ) = (
        spec(selection, Category::Cpu)?,
        spec(selection, Category::Cooler)?,
    )
    else {
        return None;
    };

    (!supported_sockets.contains(socket)).then(|| IncompatibilityIssue::CoolerSocketUnsupported {
        cpu_socket: socket.clone(),
        supported_sockets: supported_sockets.iter().cloned().collect(),
    })
}
