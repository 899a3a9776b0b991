//! Typed descriptions of a libvirt domain and its nested entities.
//!
//! Every field is optional: an empty [`DomainDesc`] is a valid description and
//! maps to the minimal `<domain/>` document. All types are plain value records
//! with no back-references; serde derives let callers persist descriptions as
//! TOML or JSON templates.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Root description ──────────────────────────────────────────────────────────

/// Configuration document for one virtual machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainDesc {
    /// Hypervisor variant tag, e.g. `"qemu"` or `"kvm"`; the `type` attribute
    /// of the root element.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<String>,

    /// Runtime domain identifier; the `id` attribute of the root element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DomainId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<SizedValue>,

    #[serde(rename = "currentMemory", skip_serializing_if = "Option::is_none")]
    pub current_memory: Option<SizedValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcpu: Option<VcpuDesc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<OsDesc>,

    /// Ordered device list. `None` and `Some(vec![])` are distinct: the former
    /// omits the `<devices>` element entirely, the latter emits `<devices/>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<DeviceDesc>>,
}

/// Domain identifier as written to and read from the `id` attribute.
///
/// Writing accepts a number; reading always yields [`DomainId::Text`] with the
/// raw attribute value. That asymmetry is part of the mapping contract, not a
/// normalization bug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainId {
    Number(u32),
    Text(String),
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainId::Number(n) => write!(f, "{n}"),
            DomainId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u32> for DomainId {
    fn from(id: u32) -> Self {
        DomainId::Number(id)
    }
}

impl From<&str> for DomainId {
    fn from(id: &str) -> Self {
        DomainId::Text(id.to_string())
    }
}

/// Integer quantity with an optional unit attribute, used for `memory` and
/// `currentMemory`. A missing unit means KiB by libvirt convention; the unit
/// string itself is carried verbatim and never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizedValue {
    pub value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Virtual CPU sizing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VcpuDesc {
    pub value: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
}

// ── Operating system boot spec ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsDesc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub os_type: Option<OsTypeDesc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boot: Option<BootDesc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loader: Option<OsLoader>,
}

/// The `<type>` element of the OS block; `value` is the boot mode carried as
/// element text (e.g. `"hvm"`), never as an attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsTypeDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<String>,
}

/// Loader cardinality: one value or an explicit ordered sequence.
///
/// Both forms render as a repeatable `<loader>` element group; the distinction
/// survives the node-level mapping so that a single value stays single and an
/// explicit empty sequence keeps its declared presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OsLoader {
    One(LoaderDesc),
    Many(Vec<LoaderDesc>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<LoaderReadonly>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub loader_type: Option<String>,
    /// Loader path, carried as element text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// The `readonly` attribute of a loader element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderReadonly {
    Yes,
    No,
}

impl LoaderReadonly {
    pub fn as_str(self) -> &'static str {
        match self {
            LoaderReadonly::Yes => "yes",
            LoaderReadonly::No => "no",
        }
    }

    /// Parses the attribute value; anything other than `yes`/`no` is dropped
    /// rather than erroring, per the silent-tolerance policy.
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "yes" => Some(LoaderReadonly::Yes),
            "no" => Some(LoaderReadonly::No),
            _ => None,
        }
    }
}

// ── Devices ───────────────────────────────────────────────────────────────────

/// One entry of the device list, discriminated by category.
///
/// The closed set of categories makes the dispatch in the assembly routine an
/// exhaustive match; device elements with unrecognized names encountered while
/// parsing are skipped silently instead of gaining a variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceDesc {
    Emulator(EmulatorDesc),
    Disk(DiskDesc),
    Interface(InterfaceDesc),
    Console(ConsoleDesc),
    Graphics(GraphicsDesc),
    /// Empty marker element enabling ACPI.
    Acpi,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorDesc {
    /// Emulator binary path, carried as element text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleDesc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub console_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskDesc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub disk_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<DiskDriverDesc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<DiskSourceDesc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<DiskTargetDesc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskDriverDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub driver_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskSourceDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskTargetDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceDesc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub iface_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<InterfaceSourceDesc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<MacDesc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelDesc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceSourceDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacDesc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDesc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
}

/// Graphics display: every field is an attribute on one self-closing element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsDesc {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub graphics_type: Option<String>,
    /// Display port; `-1` asks the hypervisor to auto-allocate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passwd: Option<String>,
}
