//! Incremental construction of domain descriptions.

use crate::desc::domain::{DeviceDesc, DiskDesc, DomainDesc, GraphicsDesc, InterfaceDesc};

/// Builds a [`DomainDesc`] by chained in-place edits.
///
/// Mutating methods return `&mut Self` so calls chain; [`DomainBuilder::build`]
/// hands out a copy of the accumulated description, so a prior build result is
/// never aliased by later edits.
///
/// ```
/// use virt_core::{DomainBuilder, DiskDesc};
///
/// let mut builder = DomainBuilder::new();
/// builder.set_name("test1").add_disk(DiskDesc::default());
/// let desc = builder.build();
/// assert_eq!(desc.name.as_deref(), Some("test1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainBuilder {
    desc: DomainDesc,
}

impl DomainBuilder {
    /// Starts from an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.desc.name = Some(name.into());
        self
    }

    pub fn set_uuid(&mut self, uuid: impl Into<String>) -> &mut Self {
        self.desc.uuid = Some(uuid.into());
        self
    }

    /// Appends a disk entry, initializing the device list if absent.
    pub fn add_disk(&mut self, disk: DiskDesc) -> &mut Self {
        self.devices_mut().push(DeviceDesc::Disk(disk));
        self
    }

    /// Appends a network interface entry, initializing the device list if
    /// absent.
    pub fn add_interface(&mut self, iface: InterfaceDesc) -> &mut Self {
        self.devices_mut().push(DeviceDesc::Interface(iface));
        self
    }

    /// Appends a graphics entry, initializing the device list if absent.
    pub fn add_graphics(&mut self, graphics: GraphicsDesc) -> &mut Self {
        self.devices_mut().push(DeviceDesc::Graphics(graphics));
        self
    }

    /// Drops every disk entry. The device list stays present (possibly empty)
    /// afterwards, so a later render emits an explicit `<devices/>`.
    pub fn remove_disks(&mut self) -> &mut Self {
        self.devices_mut()
            .retain(|device| !matches!(device, DeviceDesc::Disk(_)));
        self
    }

    /// Drops every network interface entry; see [`DomainBuilder::remove_disks`]
    /// for the list-presence behavior.
    pub fn remove_interfaces(&mut self) -> &mut Self {
        self.devices_mut()
            .retain(|device| !matches!(device, DeviceDesc::Interface(_)));
        self
    }

    /// Drops every graphics entry; see [`DomainBuilder::remove_disks`] for the
    /// list-presence behavior.
    pub fn remove_graphics(&mut self) -> &mut Self {
        self.devices_mut()
            .retain(|device| !matches!(device, DeviceDesc::Graphics(_)));
        self
    }

    /// Replaces the accumulated description with a copy of `template`,
    /// discarding all previous edits.
    pub fn from_template(&mut self, template: &DomainDesc) -> &mut Self {
        self.desc = template.clone();
        self
    }

    /// Returns a copy of the accumulated description.
    pub fn build(&self) -> DomainDesc {
        self.desc.clone()
    }

    fn devices_mut(&mut self) -> &mut Vec<DeviceDesc> {
        self.desc.devices.get_or_insert_with(Vec::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desc::domain::{DiskSourceDesc, InterfaceSourceDesc};
    use crate::xml::domain_desc_to_xml;

    fn sample_disk(file: &str) -> DiskDesc {
        DiskDesc {
            disk_type: Some("file".to_string()),
            source: Some(DiskSourceDesc {
                file: Some(file.to_string()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_name_and_uuid_chain() {
        let mut builder = DomainBuilder::new();
        builder
            .set_name("test1")
            .set_uuid("148d0864-2354-4c27-b82c-731bdd3f320c");
        let desc = builder.build();
        assert_eq!(desc.name.as_deref(), Some("test1"));
        assert_eq!(desc.uuid.as_deref(), Some("148d0864-2354-4c27-b82c-731bdd3f320c"));
    }

    #[test]
    fn test_new_builder_has_no_device_list() {
        assert_eq!(DomainBuilder::new().build().devices, None);
    }

    #[test]
    fn test_add_disk_initializes_and_appends_in_order() {
        let mut builder = DomainBuilder::new();
        builder.add_disk(sample_disk("/a.img")).add_disk(sample_disk("/b.img"));
        let devices = builder.build().devices.unwrap();
        assert_eq!(
            devices,
            vec![
                DeviceDesc::Disk(sample_disk("/a.img")),
                DeviceDesc::Disk(sample_disk("/b.img")),
            ]
        );
    }

    #[test]
    fn test_remove_disks_leaves_explicit_empty_list() {
        let mut builder = DomainBuilder::new();
        builder.add_disk(sample_disk("/a.img")).remove_disks();
        assert_eq!(builder.build().devices, Some(Vec::new()));
    }

    #[test]
    fn test_remove_disks_on_fresh_builder_creates_empty_list() {
        let mut builder = DomainBuilder::new();
        builder.remove_disks();
        assert_eq!(builder.build().devices, Some(Vec::new()));
    }

    #[test]
    fn test_remove_disks_keeps_other_device_categories() {
        let iface = InterfaceDesc {
            iface_type: Some("network".to_string()),
            source: Some(InterfaceSourceDesc {
                network: Some("default".to_string()),
            }),
            ..Default::default()
        };
        let mut builder = DomainBuilder::new();
        builder
            .add_disk(sample_disk("/a.img"))
            .add_interface(iface.clone())
            .remove_disks();
        assert_eq!(builder.build().devices, Some(vec![DeviceDesc::Interface(iface)]));
    }

    #[test]
    fn test_remove_interfaces_and_graphics() {
        let mut builder = DomainBuilder::new();
        builder
            .add_interface(InterfaceDesc::default())
            .add_graphics(GraphicsDesc::default())
            .remove_interfaces()
            .remove_graphics();
        assert_eq!(builder.build().devices, Some(Vec::new()));
    }

    #[test]
    fn test_from_template_replaces_previous_edits() {
        let template = DomainDesc {
            name: Some("template-vm".to_string()),
            ..Default::default()
        };
        let mut builder = DomainBuilder::new();
        builder.set_name("scratch").from_template(&template);
        assert_eq!(builder.build(), template);
    }

    #[test]
    fn test_template_is_copied_not_shared() {
        let template = DomainDesc {
            name: Some("template-vm".to_string()),
            ..Default::default()
        };
        let mut builder = DomainBuilder::new();
        builder.from_template(&template);
        builder.set_name("changed");
        assert_eq!(template.name.as_deref(), Some("template-vm"));
    }

    #[test]
    fn test_build_returns_defensive_copy() {
        let mut builder = DomainBuilder::new();
        builder.set_name("first");
        let snapshot = builder.build();
        builder.set_name("second");
        assert_eq!(snapshot.name.as_deref(), Some("first"));
        assert_eq!(builder.build().name.as_deref(), Some("second"));
    }

    #[test]
    fn test_emptied_device_list_renders_explicit_devices_element() {
        let mut builder = DomainBuilder::new();
        builder.add_disk(sample_disk("/a.img")).remove_disks();
        let xml = domain_desc_to_xml(&builder.build());
        assert!(xml.contains("<devices/>"), "got: {xml}");
    }
}
