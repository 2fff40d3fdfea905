use crate::net::{NodeId, Tier};
use crate::topo::{FatTreeTopology, build_fat_tree};

fn ports_towards(topo: &FatTreeTopology, node: NodeId, tier: Tier) -> Vec<u32> {
    let mut ports = topo
        .network()
        .links_of(node)
        .filter(|l| l.other(node).map(|n| topo.node(n).tier()) == Some(tier))
        .filter_map(|l| l.port_of(node))
        .collect::<Vec<_>>();
    ports.sort_unstable();
    ports
}

#[test]
fn switch_ports_split_into_down_and_up_halves() {
    for k in [2_i64, 4, 8] {
        let topo = build_fat_tree(k).expect("build");
        let half = (k / 2) as u32;
        let down = (1..=half).collect::<Vec<_>>();
        let up = (half + 1..=2 * half).collect::<Vec<_>>();

        for &e in topo.edge_switches() {
            assert_eq!(ports_towards(&topo, e, Tier::Host), down);
            assert_eq!(ports_towards(&topo, e, Tier::Aggregation), up);
        }
        for &a in topo.agg_switches() {
            assert_eq!(ports_towards(&topo, a, Tier::Edge), down);
            assert_eq!(ports_towards(&topo, a, Tier::Core), up);
        }
    }
}

#[test]
fn host_port_order_matches_offset_and_edge_order_matches_agg_port() {
    let topo = build_fat_tree(4).expect("build");
    for pod in 0..4 {
        for edge in 0..2 {
            let e = topo.edge(pod, edge);
            for host in 0..2 {
                let h = topo.host(pod, edge, host);
                let link = topo
                    .network()
                    .links_of(h)
                    .next()
                    .expect("host link");
                assert_eq!(link.port_of(h), Some(0), "host uses eth0");
                assert_eq!(link.port_of(e), Some(host as u32 + 1));
            }
            for agg in 0..2 {
                let a = topo.agg(pod, agg);
                let link = topo
                    .network()
                    .links_of(a)
                    .find(|l| l.other(a) == Some(e))
                    .expect("edge-agg link");
                assert_eq!(link.port_of(a), Some(edge as u32 + 1));
            }
        }
    }
}

#[test]
fn core_port_is_pod_plus_one() {
    let topo = build_fat_tree(6).expect("build");
    for &c in topo.core_switches() {
        for link in topo.network().links_of(c) {
            let other = link.other(c).expect("endpoint");
            let pod = topo.node(other).pod().expect("agg has pod");
            assert_eq!(link.port_of(c), Some(pod as u32 + 1));
        }
    }
}
