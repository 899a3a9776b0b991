//! Per-entity mappings between typed descriptions and the untyped markup tree.
//!
//! Every mapping follows the same rules:
//!
//! - a field absent from the typed value is never emitted;
//! - a nested value present but empty still emits an empty sub-element or
//!   attribute group — presence of the key, not presence of content, controls
//!   emission;
//! - attributes go to the attribute slot, text content to the text slot;
//! - numeric text (memory, vcpu, graphics port) is coerced to an integer on
//!   deserialize whether or not a unit attribute accompanies it.
//!
//! Mappings are total over structurally valid nodes and never return errors;
//! malformed markup is rejected earlier by [`crate::xml::node::parse`].

use crate::desc::domain::{
    BootDesc, DiskDesc, DiskDriverDesc, DiskSourceDesc, DiskTargetDesc, GraphicsDesc,
    InterfaceDesc, InterfaceSourceDesc, LoaderDesc, LoaderReadonly, MacDesc, ModelDesc, OsDesc,
    OsLoader, OsTypeDesc, SizedValue, VcpuDesc,
};
use crate::xml::node::XmlNode;

// ── Operating system boot spec ────────────────────────────────────────────────

/// Mapping for the `<os>` sub-tree.
pub struct OsXml;

impl OsXml {
    pub fn serialize(os: &OsDesc) -> XmlNode {
        let mut node = XmlNode::new();
        if let Some(os_type) = &os.os_type {
            let mut type_node = XmlNode::new();
            if let Some(arch) = &os_type.arch {
                type_node.set_attr("arch", arch);
            }
            if let Some(machine) = &os_type.machine {
                type_node.set_attr("machine", machine);
            }
            if let Some(value) = &os_type.value {
                type_node.set_text(value);
            }
            node.push_child("type", type_node);
        }
        if let Some(boot) = &os.boot {
            let mut boot_node = XmlNode::new();
            if let Some(dev) = &boot.dev {
                boot_node.set_attr("dev", dev);
            }
            node.push_child("boot", boot_node);
        }
        match &os.loader {
            None => {}
            Some(OsLoader::One(loader)) => node.push_child("loader", loader_node(loader)),
            Some(OsLoader::Many(loaders)) => {
                // An empty sequence keeps the key present as an empty group.
                node.mark_children("loader");
                for loader in loaders {
                    node.push_child("loader", loader_node(loader));
                }
            }
        }
        node
    }

    pub fn deserialize(node: &XmlNode) -> OsDesc {
        OsDesc {
            os_type: node.first_child("type").map(|type_node| OsTypeDesc {
                arch: type_node.attr("arch").map(str::to_string),
                machine: type_node.attr("machine").map(str::to_string),
                value: type_node.text().map(str::to_string),
            }),
            boot: node.first_child("boot").map(|boot_node| BootDesc {
                dev: boot_node.attr("dev").map(str::to_string),
            }),
            loader: match node.child_list("loader") {
                None => None,
                Some([]) => Some(OsLoader::Many(Vec::new())),
                Some([single]) => Some(OsLoader::One(loader_desc(single))),
                Some(many) => Some(OsLoader::Many(many.iter().map(loader_desc).collect())),
            },
        }
    }
}

fn loader_node(loader: &LoaderDesc) -> XmlNode {
    let mut node = XmlNode::new();
    if let Some(readonly) = loader.readonly {
        node.set_attr("readonly", readonly.as_str());
    }
    if let Some(loader_type) = &loader.loader_type {
        node.set_attr("type", loader_type);
    }
    if let Some(value) = &loader.value {
        node.set_text(value);
    }
    node
}

fn loader_desc(node: &XmlNode) -> LoaderDesc {
    LoaderDesc {
        readonly: node.attr("readonly").and_then(LoaderReadonly::from_attr),
        loader_type: node.attr("type").map(str::to_string),
        value: node.text().map(str::to_string),
    }
}

// ── Disk ──────────────────────────────────────────────────────────────────────

/// Mapping for `<disk>` device elements.
pub struct DiskXml;

impl DiskXml {
    pub fn serialize(disk: &DiskDesc) -> XmlNode {
        let mut node = XmlNode::new();
        if let Some(disk_type) = &disk.disk_type {
            node.set_attr("type", disk_type);
        }
        if let Some(device) = &disk.device {
            node.set_attr("device", device);
        }
        if let Some(driver) = &disk.driver {
            let mut driver_node = XmlNode::new();
            if let Some(name) = &driver.name {
                driver_node.set_attr("name", name);
            }
            if let Some(driver_type) = &driver.driver_type {
                driver_node.set_attr("type", driver_type);
            }
            node.push_child("driver", driver_node);
        }
        if let Some(source) = &disk.source {
            let mut source_node = XmlNode::new();
            if let Some(file) = &source.file {
                source_node.set_attr("file", file);
            }
            node.push_child("source", source_node);
        }
        if let Some(target) = &disk.target {
            let mut target_node = XmlNode::new();
            if let Some(dev) = &target.dev {
                target_node.set_attr("dev", dev);
            }
            if let Some(bus) = &target.bus {
                target_node.set_attr("bus", bus);
            }
            node.push_child("target", target_node);
        }
        node
    }

    pub fn deserialize(node: &XmlNode) -> DiskDesc {
        DiskDesc {
            disk_type: node.attr("type").map(str::to_string),
            device: node.attr("device").map(str::to_string),
            driver: node.first_child("driver").map(|driver| DiskDriverDesc {
                name: driver.attr("name").map(str::to_string),
                driver_type: driver.attr("type").map(str::to_string),
            }),
            source: node.first_child("source").map(|source| DiskSourceDesc {
                file: source.attr("file").map(str::to_string),
            }),
            target: node.first_child("target").map(|target| DiskTargetDesc {
                dev: target.attr("dev").map(str::to_string),
                bus: target.attr("bus").map(str::to_string),
            }),
        }
    }
}

// ── Network interface ─────────────────────────────────────────────────────────

/// Mapping for `<interface>` device elements.
pub struct InterfaceXml;

impl InterfaceXml {
    pub fn serialize(iface: &InterfaceDesc) -> XmlNode {
        let mut node = XmlNode::new();
        if let Some(iface_type) = &iface.iface_type {
            node.set_attr("type", iface_type);
        }
        if let Some(source) = &iface.source {
            let mut source_node = XmlNode::new();
            if let Some(network) = &source.network {
                source_node.set_attr("network", network);
            }
            node.push_child("source", source_node);
        }
        if let Some(mac) = &iface.mac {
            let mut mac_node = XmlNode::new();
            if let Some(address) = &mac.address {
                mac_node.set_attr("address", address);
            }
            node.push_child("mac", mac_node);
        }
        if let Some(model) = &iface.model {
            let mut model_node = XmlNode::new();
            if let Some(model_type) = &model.model_type {
                model_node.set_attr("type", model_type);
            }
            node.push_child("model", model_node);
        }
        node
    }

    pub fn deserialize(node: &XmlNode) -> InterfaceDesc {
        InterfaceDesc {
            iface_type: node.attr("type").map(str::to_string),
            source: node.first_child("source").map(|source| InterfaceSourceDesc {
                network: source.attr("network").map(str::to_string),
            }),
            mac: node.first_child("mac").map(|mac| MacDesc {
                address: mac.attr("address").map(str::to_string),
            }),
            model: node.first_child("model").map(|model| ModelDesc {
                model_type: model.attr("type").map(str::to_string),
            }),
        }
    }
}

// ── Graphics display ──────────────────────────────────────────────────────────

/// Mapping for `<graphics>` device elements; everything is flattened onto the
/// attribute slot of a single self-closing element.
pub struct GraphicsXml;

impl GraphicsXml {
    pub fn serialize(graphics: &GraphicsDesc) -> XmlNode {
        let mut node = XmlNode::new();
        if let Some(graphics_type) = &graphics.graphics_type {
            node.set_attr("type", graphics_type);
        }
        if let Some(port) = graphics.port {
            node.set_attr("port", port.to_string());
        }
        if let Some(listen) = &graphics.listen {
            node.set_attr("listen", listen);
        }
        if let Some(passwd) = &graphics.passwd {
            node.set_attr("passwd", passwd);
        }
        node
    }

    pub fn deserialize(node: &XmlNode) -> GraphicsDesc {
        GraphicsDesc {
            graphics_type: node.attr("type").map(str::to_string),
            port: node.attr("port").and_then(|port| port.parse().ok()),
            listen: node.attr("listen").map(str::to_string),
            passwd: node.attr("passwd").map(str::to_string),
        }
    }
}

// ── Sized scalar helpers ──────────────────────────────────────────────────────

pub(crate) fn sized_value_node(sized: &SizedValue) -> XmlNode {
    let mut node = XmlNode::text_node(sized.value.to_string());
    if let Some(unit) = &sized.unit {
        node.set_attr("unit", unit);
    }
    node
}

/// Reads a `<memory>`-shaped element. Text that does not parse as an integer
/// drops the whole field rather than erroring.
pub(crate) fn sized_value_from(node: &XmlNode) -> Option<SizedValue> {
    let value = node.text()?.trim().parse().ok()?;
    Some(SizedValue {
        value,
        unit: node.attr("unit").map(str::to_string),
    })
}

pub(crate) fn vcpu_node(vcpu: &VcpuDesc) -> XmlNode {
    let mut node = XmlNode::text_node(vcpu.value.to_string());
    if let Some(placement) = &vcpu.placement {
        node.set_attr("placement", placement);
    }
    node
}

pub(crate) fn vcpu_from(node: &XmlNode) -> Option<VcpuDesc> {
    let value = node.text()?.trim().parse().ok()?;
    Some(VcpuDesc {
        value,
        placement: node.attr("placement").map(str::to_string),
    })
}
