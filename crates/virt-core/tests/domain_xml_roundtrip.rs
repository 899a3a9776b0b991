//! Integration tests for the full description ↔ document pipeline: assembly,
//! disassembly, builder output, and template persistence working together.

use virt_core::{
    domain_desc_from_xml, domain_desc_to_xml, BootDesc, DeviceDesc, DiskDesc, DiskDriverDesc,
    DiskSourceDesc, DiskTargetDesc, DomainBuilder, DomainDesc, DomainId, GraphicsDesc,
    InterfaceDesc, InterfaceSourceDesc, LoaderDesc, LoaderReadonly, MacDesc, ModelDesc, OsDesc,
    OsLoader, OsTypeDesc, SizedValue, VcpuDesc, XmlError,
};

fn workstation_desc() -> DomainDesc {
    DomainDesc {
        domain_type: Some("kvm".to_string()),
        name: Some("workstation".to_string()),
        uuid: Some("6695eb01-f6a4-8304-79aa-97f2502e193f".to_string()),
        memory: Some(SizedValue {
            value: 4_194_304,
            unit: Some("KiB".to_string()),
        }),
        current_memory: Some(SizedValue {
            value: 2_097_152,
            unit: Some("KiB".to_string()),
        }),
        vcpu: Some(VcpuDesc {
            value: 4,
            placement: Some("static".to_string()),
        }),
        os: Some(OsDesc {
            os_type: Some(OsTypeDesc {
                arch: Some("x86_64".to_string()),
                machine: Some("q35".to_string()),
                value: Some("hvm".to_string()),
            }),
            boot: Some(BootDesc {
                dev: Some("hd".to_string()),
            }),
            loader: Some(OsLoader::One(LoaderDesc {
                readonly: Some(LoaderReadonly::Yes),
                loader_type: Some("pflash".to_string()),
                value: Some("/usr/share/OVMF/OVMF_CODE.fd".to_string()),
            })),
        }),
        devices: Some(vec![
            DeviceDesc::Disk(DiskDesc {
                disk_type: Some("file".to_string()),
                device: Some("disk".to_string()),
                driver: Some(DiskDriverDesc {
                    name: Some("qemu".to_string()),
                    driver_type: Some("qcow2".to_string()),
                }),
                source: Some(DiskSourceDesc {
                    file: Some("/var/lib/libvirt/images/workstation.qcow2".to_string()),
                }),
                target: Some(DiskTargetDesc {
                    dev: Some("vda".to_string()),
                    bus: Some("virtio".to_string()),
                }),
            }),
            DeviceDesc::Interface(InterfaceDesc {
                iface_type: Some("network".to_string()),
                source: Some(InterfaceSourceDesc {
                    network: Some("default".to_string()),
                }),
                mac: Some(MacDesc {
                    address: Some("52:54:00:12:34:56".to_string()),
                }),
                model: Some(ModelDesc {
                    model_type: Some("virtio".to_string()),
                }),
            }),
            DeviceDesc::Graphics(GraphicsDesc {
                graphics_type: Some("spice".to_string()),
                port: Some(5901),
                listen: Some("127.0.0.1".to_string()),
                passwd: None,
            }),
            DeviceDesc::Acpi,
        ]),
        ..Default::default()
    }
}

#[test]
fn test_desc_survives_document_round_trip() {
    let desc = workstation_desc();
    let xml = domain_desc_to_xml(&desc);
    let reparsed = domain_desc_from_xml(&xml).unwrap();
    assert_eq!(reparsed, desc);
}

#[test]
fn test_numeric_id_comes_back_as_raw_text() {
    let desc = DomainDesc {
        id: Some(DomainId::Number(42)),
        name: Some("running-vm".to_string()),
        ..Default::default()
    };
    let xml = domain_desc_to_xml(&desc);
    let reparsed = domain_desc_from_xml(&xml).unwrap();
    assert_eq!(reparsed.id, Some(DomainId::Text("42".to_string())));
    assert_eq!(reparsed.name, desc.name);
}

#[test]
fn test_absent_and_empty_device_lists_are_distinct_through_the_pipeline() {
    let absent = domain_desc_to_xml(&DomainDesc::default());
    assert_eq!(absent, "<domain/>");
    assert_eq!(domain_desc_from_xml(&absent).unwrap().devices, None);

    let empty = domain_desc_to_xml(&DomainDesc {
        devices: Some(Vec::new()),
        ..Default::default()
    });
    assert!(empty.contains("<devices/>"), "got: {empty}");
    assert_eq!(domain_desc_from_xml(&empty).unwrap().devices, Some(Vec::new()));
}

#[test]
fn test_loader_cardinality_through_the_pipeline() {
    // Absent stays absent.
    let absent = DomainDesc {
        os: Some(OsDesc::default()),
        ..Default::default()
    };
    let reparsed = domain_desc_from_xml(&domain_desc_to_xml(&absent)).unwrap();
    assert_eq!(reparsed.os.unwrap().loader, None);

    // A single value stays single.
    let single = DomainDesc {
        os: Some(OsDesc {
            loader: Some(OsLoader::One(LoaderDesc {
                value: Some("/loader".to_string()),
                ..Default::default()
            })),
            ..Default::default()
        }),
        ..Default::default()
    };
    let reparsed = domain_desc_from_xml(&domain_desc_to_xml(&single)).unwrap();
    assert_eq!(reparsed.os, single.os);

    // A sequence stays a sequence, in order.
    let many = DomainDesc {
        os: Some(OsDesc {
            loader: Some(OsLoader::Many(vec![
                LoaderDesc {
                    value: Some("/a".to_string()),
                    ..Default::default()
                },
                LoaderDesc {
                    readonly: Some(LoaderReadonly::No),
                    ..Default::default()
                },
            ])),
            ..Default::default()
        }),
        ..Default::default()
    };
    let reparsed = domain_desc_from_xml(&domain_desc_to_xml(&many)).unwrap();
    assert_eq!(reparsed.os, many.os);
}

#[test]
fn test_empty_loader_sequence_collapses_to_absent_through_text() {
    // The empty-sequence marker has no textual representation: zero <loader>
    // elements are emitted, so the key reads back as absent.
    let desc = DomainDesc {
        os: Some(OsDesc {
            loader: Some(OsLoader::Many(Vec::new())),
            ..Default::default()
        }),
        ..Default::default()
    };
    let xml = domain_desc_to_xml(&desc);
    assert_eq!(xml, "<domain>\n  <os/>\n</domain>");
    assert_eq!(domain_desc_from_xml(&xml).unwrap().os.unwrap().loader, None);
}

#[test]
fn test_builder_output_feeds_straight_into_assembly() {
    let mut builder = DomainBuilder::new();
    builder
        .set_name("built-vm")
        .set_uuid("148d0864-2354-4c27-b82c-731bdd3f320c")
        .add_disk(DiskDesc {
            disk_type: Some("file".to_string()),
            source: Some(DiskSourceDesc {
                file: Some("/var/lib/libvirt/images/built-vm.qcow2".to_string()),
            }),
            ..Default::default()
        })
        .add_graphics(GraphicsDesc {
            graphics_type: Some("vnc".to_string()),
            port: Some(-1),
            ..Default::default()
        });
    let xml = domain_desc_to_xml(&builder.build());
    let reparsed = domain_desc_from_xml(&xml).unwrap();
    assert_eq!(reparsed.name.as_deref(), Some("built-vm"));
    assert_eq!(reparsed.devices.map(|d| d.len()), Some(2));
}

#[test]
fn test_builder_remove_then_render_emits_explicit_devices_element() {
    let mut builder = DomainBuilder::new();
    builder
        .set_name("bare-vm")
        .add_disk(DiskDesc::default())
        .remove_disks();
    let xml = domain_desc_to_xml(&builder.build());
    assert_eq!(xml, "<domain>\n  <name>bare-vm</name>\n  <devices/>\n</domain>");
}

#[test]
fn test_error_taxonomy_separates_malformed_from_foreign_documents() {
    assert!(matches!(
        domain_desc_from_xml("not xml at all"),
        Err(XmlError::Parse(_))
    ));
    assert!(matches!(
        domain_desc_from_xml("<domain><os></domain>"),
        Err(XmlError::Parse(_))
    ));
    assert_eq!(
        domain_desc_from_xml("<network/>"),
        Err(XmlError::NotADomain)
    );
}

#[test]
fn test_desc_persists_as_json_template() {
    let desc = workstation_desc();
    let json = serde_json::to_string_pretty(&desc).unwrap();
    let reloaded: DomainDesc = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, desc);
}

#[test]
fn test_desc_persists_as_toml_template() {
    // Templates as shipped in config files carry sizing and boot spec; the
    // device list is added per-instance by the builder.
    let desc = DomainDesc {
        devices: None,
        ..workstation_desc()
    };
    let text = toml::to_string(&desc).unwrap();
    let reloaded: DomainDesc = toml::from_str(&text).unwrap();
    assert_eq!(reloaded, desc);
}

#[test]
fn test_parsed_foreign_document_keeps_known_devices_only() {
    let xml = "<domain type=\"kvm\">\n  <name>imported</name>\n  <devices>\n    <emulator>/usr/bin/qemu-system-x86_64</emulator>\n    <rng model=\"virtio\"/>\n    <console type=\"pty\"/>\n  </devices>\n</domain>";
    let desc = domain_desc_from_xml(xml).unwrap();
    let devices = desc.devices.unwrap();
    assert_eq!(devices.len(), 2);
    assert!(matches!(devices[0], DeviceDesc::Emulator(_)));
    assert!(matches!(devices[1], DeviceDesc::Console(_)));
}
