//! Error records for the hypervisor boundary.

use thiserror::Error;
use virt_core::XmlError;

/// Error reported by a hypervisor driver, mirroring the libvirt error record.
///
/// `code`, `error_domain`, and `level` carry the driver's numeric classifiers
/// verbatim; `-1` marks a value the driver did not supply. The optional string
/// slots hold driver-specific context in the order the driver filled them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HypervisorError {
    pub message: String,
    pub code: i32,
    /// Numeric subsystem classifier; named `domain` by libvirt, renamed here
    /// to avoid colliding with virtual machine domains.
    pub error_domain: i32,
    pub level: i32,
    pub str1: Option<String>,
    pub str2: Option<String>,
    pub str3: Option<String>,
}

impl HypervisorError {
    /// Wraps a bare message with unclassified (`-1`) numeric fields.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: -1,
            error_domain: -1,
            level: -1,
            str1: None,
            str2: None,
            str3: None,
        }
    }
}

/// Failure of a high-level domain operation: either the hypervisor rejected
/// the call or the XML it returned did not disassemble.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Hypervisor(#[from] HypervisorError),
    #[error(transparent)]
    Xml(#[from] XmlError),
}
