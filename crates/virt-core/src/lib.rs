//! # virt-core
//!
//! Typed libvirt domain descriptions and the mapping between them and domain
//! XML documents.
//!
//! This crate is the pure core of the toolkit: no hypervisor, OS, or network
//! dependencies.  It defines:
//!
//! - **`desc`** – The domain description data model (`DomainDesc` and the
//!   nested entity records, every field optional) and the incremental
//!   `DomainBuilder`.
//!
//! - **`xml`** – The untyped markup tree (`XmlNode`), the per-entity mapping
//!   definitions, and the top-level `domain_desc_to_xml` /
//!   `domain_desc_from_xml` pair that assembles and disassembles whole
//!   domain documents.
//!
//! Descriptions are plain value records with serde derives, so callers can
//! also persist them as TOML or JSON templates.

pub mod desc;
pub mod xml;

// Re-export the most-used types at the crate root so callers can write
// `virt_core::DomainDesc` instead of `virt_core::desc::domain::DomainDesc`.
pub use desc::builder::DomainBuilder;
pub use desc::domain::{
    BootDesc, ConsoleDesc, DeviceDesc, DiskDesc, DiskDriverDesc, DiskSourceDesc, DiskTargetDesc,
    DomainDesc, DomainId, EmulatorDesc, GraphicsDesc, InterfaceDesc, InterfaceSourceDesc,
    LoaderDesc, LoaderReadonly, MacDesc, ModelDesc, OsDesc, OsLoader, OsTypeDesc, SizedValue,
    VcpuDesc,
};
pub use xml::node::XmlNode;
pub use xml::{domain_desc_from_xml, domain_desc_to_xml, XmlError};
