use serde_json::Value;

use crate::config::FileConfig;
use crate::emu::{ControllerConfig, IpBase};
use crate::export::TopologyDoc;
use crate::net::Tier;
use crate::topo::{OpenFlowVersion, SwitchKind, build_fat_tree};

#[test]
fn topology_doc_lists_nodes_and_ported_links() {
    let topo = build_fat_tree(4).expect("build");
    let doc = TopologyDoc::new(&topo, Some(&ControllerConfig::default()));
    assert_eq!(doc.nodes.len(), 36);
    assert_eq!(doc.links.len(), 48);

    let core = &doc.nodes[0];
    assert_eq!(core.name, "c040101");
    assert_eq!(core.tier, Tier::Core);
    assert!(core.pod.is_none() && core.ip.is_none());

    let v: Value = serde_json::from_str(&doc.to_json_pretty().expect("json")).expect("parse");
    assert_eq!(v["summary"]["links"], 48);
    assert_eq!(v["switch"]["protocol"], "OpenFlow13");
    assert_eq!(v["controller"]["port"], 6653);
    assert_eq!(v["nodes"][0]["dpid"], "0000000000040101");
    assert!(v["nodes"][0].get("pod").is_none());

    let host = v["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .find(|n| n["name"] == "h002")
        .expect("h002");
    assert_eq!(host["tier"], "host");
    assert_eq!(host["ip"], "10.0.0.2");
    assert_eq!(host["pod"], 0);

    let first_link = &v["links"][0];
    assert_eq!(first_link["a"], "h002");
    assert_eq!(first_link["a_port"], 0);
    assert_eq!(first_link["b"], "e000001");
    assert_eq!(first_link["b_port"], 1);
}

#[test]
fn topology_doc_deserializes_back() {
    let topo = build_fat_tree(2).expect("build");
    let raw = TopologyDoc::new(&topo, None).to_json_pretty().expect("json");
    let back: TopologyDoc = serde_json::from_str(&raw).expect("parse doc");
    assert!(back.controller.is_none());
    assert_eq!(back.summary, topo.summary());
    assert_eq!(back.nodes[0].dpid, topo.nodes()[0].dpid());
}

#[test]
fn file_config_fills_missing_fields_with_defaults() {
    let cfg = FileConfig::from_json("{}").expect("parse empty");
    assert_eq!(cfg.topo_opts().k, 4);
    assert_eq!(cfg.controller(), ControllerConfig::default());
    assert_eq!(cfg.ip_base(), IpBase::default());

    let cfg = FileConfig::from_json(
        r#"
        {
            "k": 8,
            "controller": { "ip": "10.0.0.254", "port": 6633 },
            "switch": { "protocol": "OpenFlow10", "kind": "ovs_user" },
            "ip_base": "172.16.0.0/16"
        }
        "#,
    )
    .expect("parse config");
    let opts = cfg.topo_opts();
    assert_eq!(opts.k, 8);
    assert_eq!(opts.switch.protocol, OpenFlowVersion::OpenFlow10);
    assert_eq!(opts.switch.kind, SwitchKind::OvsUser);
    let ctrl = cfg.controller();
    assert_eq!(ctrl.name, "c0");
    assert_eq!(ctrl.target(), "tcp:10.0.0.254:6633");
    assert_eq!(cfg.ip_base().to_string(), "172.16.0.0/16");
}

#[test]
fn file_config_rejects_unknown_fields_and_bad_ip_base() {
    assert!(FileConfig::from_json(r#"{ "pods": 4 }"#).is_err());
    assert!(FileConfig::from_json(r#"{ "ip_base": "192.168.0.0" }"#).is_err());
}

#[test]
fn file_config_rejects_unknown_nested_fields() {
    assert!(FileConfig::from_json(r#"{ "controller": { "prot": 7000 } }"#).is_err());
    assert!(FileConfig::from_json(r#"{ "switch": { "protocols": "OpenFlow13" } }"#).is_err());
    let cfg = FileConfig::from_json(r#"{ "controller": { "port": 7000 } }"#).expect("parse");
    assert_eq!(cfg.controller().port, 7000);
}
