//! Assembly and disassembly between [`DomainDesc`] and libvirt domain XML.
//!
//! [`domain_desc_to_xml`] and [`domain_desc_from_xml`] are a pure, stateless
//! pair: they compose the per-entity mappings of [`mapping`] over the untyped
//! tree of [`node`] and touch no hypervisor state.

pub mod mapping;
pub mod node;

use thiserror::Error;
use tracing::debug;

use crate::desc::domain::{ConsoleDesc, DeviceDesc, DomainDesc, DomainId, EmulatorDesc};
use mapping::{sized_value_from, sized_value_node, vcpu_from, vcpu_node};
use mapping::{DiskXml, GraphicsXml, InterfaceXml, OsXml};
use node::XmlNode;

/// Failure while turning markup text into a domain description.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XmlError {
    /// The input is not well-formed markup; carries the parser's message.
    #[error("invalid domain xml: {0}")]
    Parse(String),
    /// The input is well-formed markup but its root element is not `<domain>`.
    #[error("Unable to parse domain xml")]
    NotADomain,
}

// ── Assembly ──────────────────────────────────────────────────────────────────

/// Renders a domain description as libvirt domain XML.
///
/// Absent fields produce no output; an empty description yields `<domain/>`.
/// A present-but-empty device list yields an explicit `<devices/>`.
pub fn domain_desc_to_xml(desc: &DomainDesc) -> String {
    let mut root = XmlNode::new();
    if let Some(domain_type) = &desc.domain_type {
        root.set_attr("type", domain_type);
    }
    if let Some(id) = &desc.id {
        root.set_attr("id", id.to_string());
    }
    if let Some(name) = &desc.name {
        root.push_child("name", XmlNode::text_node(name));
    }
    if let Some(uuid) = &desc.uuid {
        root.push_child("uuid", XmlNode::text_node(uuid));
    }
    if let Some(memory) = &desc.memory {
        root.push_child("memory", sized_value_node(memory));
    }
    if let Some(current) = &desc.current_memory {
        root.push_child("currentMemory", sized_value_node(current));
    }
    if let Some(vcpu) = &desc.vcpu {
        root.push_child("vcpu", vcpu_node(vcpu));
    }
    if let Some(os) = &desc.os {
        root.push_child("os", OsXml::serialize(os));
    }
    if let Some(devices) = &desc.devices {
        let mut wrapper = XmlNode::new();
        for device in devices {
            match device {
                DeviceDesc::Emulator(emulator) => {
                    let mut node = XmlNode::new();
                    if let Some(value) = &emulator.value {
                        node.set_text(value);
                    }
                    wrapper.push_child("emulator", node);
                }
                DeviceDesc::Disk(disk) => wrapper.push_child("disk", DiskXml::serialize(disk)),
                DeviceDesc::Interface(iface) => {
                    wrapper.push_child("interface", InterfaceXml::serialize(iface));
                }
                DeviceDesc::Console(console) => {
                    let mut node = XmlNode::new();
                    if let Some(console_type) = &console.console_type {
                        node.set_attr("type", console_type);
                    }
                    wrapper.push_child("console", node);
                }
                DeviceDesc::Graphics(graphics) => {
                    wrapper.push_child("graphics", GraphicsXml::serialize(graphics));
                }
                DeviceDesc::Acpi => wrapper.push_child("acpi", XmlNode::new()),
            }
        }
        root.push_child("devices", wrapper);
    }
    root.render("domain")
}

// ── Disassembly ───────────────────────────────────────────────────────────────

/// Parses libvirt domain XML back into a domain description.
///
/// The `id` attribute is preserved as its raw string form
/// ([`DomainId::Text`]); device elements with unrecognized names are skipped.
///
/// # Errors
///
/// [`XmlError::Parse`] when the input is not well-formed markup;
/// [`XmlError::NotADomain`] when the root element is not `<domain>`.
pub fn domain_desc_from_xml(xml: &str) -> Result<DomainDesc, XmlError> {
    let (root_name, root) = node::parse(xml)?;
    if root_name != "domain" {
        return Err(XmlError::NotADomain);
    }

    Ok(DomainDesc {
        domain_type: root.attr("type").map(str::to_string),
        id: root.attr("id").map(DomainId::from),
        name: root.first_child("name").and_then(|n| n.text()).map(str::to_string),
        uuid: root.first_child("uuid").and_then(|n| n.text()).map(str::to_string),
        memory: root.first_child("memory").and_then(sized_value_from),
        current_memory: root.first_child("currentMemory").and_then(sized_value_from),
        vcpu: root.first_child("vcpu").and_then(vcpu_from),
        os: root.first_child("os").map(OsXml::deserialize),
        devices: root.first_child("devices").map(devices_from),
    })
}

fn devices_from(wrapper: &XmlNode) -> Vec<DeviceDesc> {
    let mut devices = Vec::new();
    for (name, siblings) in wrapper.child_groups() {
        for node in siblings {
            match name {
                "emulator" => devices.push(DeviceDesc::Emulator(EmulatorDesc {
                    value: node.text().map(str::to_string),
                })),
                "disk" => devices.push(DeviceDesc::Disk(DiskXml::deserialize(node))),
                "interface" => {
                    devices.push(DeviceDesc::Interface(InterfaceXml::deserialize(node)));
                }
                "console" => devices.push(DeviceDesc::Console(ConsoleDesc {
                    console_type: node.attr("type").map(str::to_string),
                })),
                "graphics" => devices.push(DeviceDesc::Graphics(GraphicsXml::deserialize(node))),
                "acpi" => devices.push(DeviceDesc::Acpi),
                other => debug!(element = other, "skipping unrecognized device element"),
            }
        }
    }
    devices
}
