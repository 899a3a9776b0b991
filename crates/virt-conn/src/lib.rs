//! # virt-conn
//!
//! The hypervisor boundary of the toolkit: a synchronous connection trait
//! shaped after the libvirt C API, the opaque domain handle, state and flag
//! constants, and the libvirt-shaped error record.
//!
//! No transport is implemented here.  Drivers implement
//! [`HypervisorConnection`]; everything above the trait works against the
//! interface, so test suites substitute the generated mock (enabled by the
//! `mocks` feature or in this crate's own tests).
//!
//! Domain configuration crosses this boundary as markup strings: the typed
//! side lives in `virt-core`, and [`define_desc`] / [`create_desc`] /
//! [`Domain::desc`] do the assembly and disassembly at the edge.

pub mod error;
pub mod info;

use tracing::debug;
use uuid::Uuid;
use virt_core::{domain_desc_from_xml, domain_desc_to_xml, DomainDesc};

pub use error::{DomainError, HypervisorError};
pub use info::{list_all_domains_flags, xml_desc_flags, DomainInfo, DomainState, NodeInfo};

/// Opaque identifier for a domain held by a hypervisor driver.
///
/// Handles are minted by the driver and only meaningful to the connection
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainHandle(Uuid);

impl DomainHandle {
    /// Mints a fresh handle; called by drivers when a domain enters their
    /// handle table.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DomainHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Synchronous connection to a hypervisor, one method per driver call.
///
/// Every method may fail with the driver's [`HypervisorError`]; callers are
/// expected to propagate rather than retry.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
pub trait HypervisorConnection {
    /// Opens the connection. All other calls require an open connection.
    fn open(&mut self) -> Result<(), HypervisorError>;

    /// Closes the connection and invalidates every handle it issued.
    fn close(&mut self) -> Result<(), HypervisorError>;

    fn hostname(&self) -> Result<String, HypervisorError>;

    /// Maximum virtual CPUs supported for the given domain type
    /// (e.g. `"kvm"`; the driver default when empty).
    fn max_vcpus(&self, domain_type: &str) -> Result<u32, HypervisorError>;

    fn node_info(&self) -> Result<NodeInfo, HypervisorError>;

    /// Numeric ids of the running domains.
    fn list_domain_ids(&self) -> Result<Vec<u32>, HypervisorError>;

    /// Names of the defined but not running domains.
    fn list_defined_domains(&self) -> Result<Vec<String>, HypervisorError>;

    /// Every domain matching `flags` (see [`list_all_domains_flags`]).
    fn list_all_domains(&self, flags: u32) -> Result<Vec<DomainHandle>, HypervisorError>;

    /// Defines a persistent domain from domain XML without starting it.
    fn define_domain(&mut self, xml: &str) -> Result<DomainHandle, HypervisorError>;

    /// Creates and immediately starts a transient domain from domain XML.
    fn create_domain(&mut self, xml: &str) -> Result<DomainHandle, HypervisorError>;

    fn lookup_by_id(&self, id: u32) -> Result<DomainHandle, HypervisorError>;

    fn lookup_by_name(&self, name: &str) -> Result<DomainHandle, HypervisorError>;

    fn lookup_by_uuid(&self, uuid: &str) -> Result<DomainHandle, HypervisorError>;

    /// Starts a previously defined domain.
    fn domain_start(&mut self, domain: DomainHandle) -> Result<(), HypervisorError>;

    /// Requests a graceful guest shutdown.
    fn domain_shutdown(&mut self, domain: DomainHandle) -> Result<(), HypervisorError>;

    /// Forcibly terminates the domain.
    fn domain_destroy(&mut self, domain: DomainHandle) -> Result<(), HypervisorError>;

    /// Removes the persistent definition.
    fn domain_undefine(&mut self, domain: DomainHandle) -> Result<(), HypervisorError>;

    /// Suspends the domain to a file at `path`.
    fn domain_save(&mut self, domain: DomainHandle, path: &str) -> Result<(), HypervisorError>;

    /// Resumes a domain previously saved to `path`.
    fn domain_restore(&mut self, path: &str) -> Result<(), HypervisorError>;

    /// The domain's XML description (see [`xml_desc_flags`]).
    fn domain_xml(&self, domain: DomainHandle, flags: u32) -> Result<String, HypervisorError>;

    fn domain_info(&self, domain: DomainHandle) -> Result<DomainInfo, HypervisorError>;

    /// Runtime id; `None` when the domain is not running.
    fn domain_id(&self, domain: DomainHandle) -> Result<Option<u32>, HypervisorError>;

    fn domain_name(&self, domain: DomainHandle) -> Result<String, HypervisorError>;

    fn domain_uuid(&self, domain: DomainHandle) -> Result<String, HypervisorError>;
}

// ── Typed-description convenience layer ───────────────────────────────────────

/// Assembles `desc` and defines it as a persistent domain.
pub fn define_desc<C: HypervisorConnection>(
    conn: &mut C,
    desc: &DomainDesc,
) -> Result<DomainHandle, HypervisorError> {
    let xml = domain_desc_to_xml(desc);
    debug!(name = desc.name.as_deref(), "defining domain from description");
    conn.define_domain(&xml)
}

/// Assembles `desc` and creates a running transient domain from it.
pub fn create_desc<C: HypervisorConnection>(
    conn: &mut C,
    desc: &DomainDesc,
) -> Result<DomainHandle, HypervisorError> {
    let xml = domain_desc_to_xml(desc);
    debug!(name = desc.name.as_deref(), "creating domain from description");
    conn.create_domain(&xml)
}

/// A domain handle bound to its connection, offering the per-domain calls
/// without repeating the handle argument.
pub struct Domain<'a, C: HypervisorConnection> {
    conn: &'a mut C,
    handle: DomainHandle,
}

impl<'a, C: HypervisorConnection> Domain<'a, C> {
    pub fn new(conn: &'a mut C, handle: DomainHandle) -> Self {
        Self { conn, handle }
    }

    pub fn handle(&self) -> DomainHandle {
        self.handle
    }

    /// Fetches the domain's XML and disassembles it into a typed description.
    pub fn desc(&self, flags: u32) -> Result<DomainDesc, DomainError> {
        let xml = self.conn.domain_xml(self.handle, flags)?;
        Ok(domain_desc_from_xml(&xml)?)
    }

    pub fn start(&mut self) -> Result<(), HypervisorError> {
        self.conn.domain_start(self.handle)
    }

    pub fn shutdown(&mut self) -> Result<(), HypervisorError> {
        self.conn.domain_shutdown(self.handle)
    }

    pub fn destroy(&mut self) -> Result<(), HypervisorError> {
        self.conn.domain_destroy(self.handle)
    }

    pub fn undefine(&mut self) -> Result<(), HypervisorError> {
        self.conn.domain_undefine(self.handle)
    }

    pub fn save(&mut self, path: &str) -> Result<(), HypervisorError> {
        self.conn.domain_save(self.handle, path)
    }

    pub fn info(&self) -> Result<DomainInfo, HypervisorError> {
        self.conn.domain_info(self.handle)
    }

    pub fn id(&self) -> Result<Option<u32>, HypervisorError> {
        self.conn.domain_id(self.handle)
    }

    pub fn name(&self) -> Result<String, HypervisorError> {
        self.conn.domain_name(self.handle)
    }

    pub fn uuid(&self) -> Result<String, HypervisorError> {
        self.conn.domain_uuid(self.handle)
    }
}
