//! Fat-tree 拓扑生成
//!
//! 生成 k-ary fat-tree，打印摘要，可选导出 JSON 或走一遍仿真器的 dry-run。

use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fattree_topo::config::FileConfig;
use fattree_topo::emu::{DryRunEmulator, Emulator};
use fattree_topo::error::{ConfigError, EmulationError, TopoError};
use fattree_topo::export::TopologyDoc;
use fattree_topo::topo::{Arity, build_fat_tree_with};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "fat_tree",
    about = "Generate a k-ary fat-tree topology for a network emulator"
)]
struct Args {
    /// Fat-tree arity (even, 2..=98); defaults to 4
    #[arg(long, allow_negative_numbers = true)]
    k: Option<Arity>,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Remote controller IPv4 address
    #[arg(long)]
    controller_ip: Option<Ipv4Addr>,

    /// Remote controller port
    #[arg(long)]
    controller_port: Option<u16>,

    /// Write the topology as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Materialize and tear down through the dry-run emulator, printing each step
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Topo(#[from] TopoError),
    #[error(transparent)]
    Emulation(#[from] EmulationError),
    #[error("serialize topology: {0}")]
    Json(#[from] serde_json::Error),
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let mut opts = file.topo_opts();
    if let Some(k) = args.k {
        opts.k = k.into();
    }
    let mut controller = file.controller();
    if let Some(ip) = args.controller_ip {
        controller.ip = ip;
    }
    if let Some(port) = args.controller_port {
        controller.port = port;
    }

    let topo = build_fat_tree_with(&opts)?;
    println!("{}", topo.summary());

    if let Some(path) = &args.json {
        let doc = TopologyDoc::new(&topo, Some(&controller));
        let raw = doc.to_json_pretty()?;
        fs::write(path, raw).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "topology written");
    }

    if args.dry_run {
        let mut emu = DryRunEmulator::new(file.ip_base());
        let net = emu.materialize(&topo, &controller)?;
        emu.teardown(net)?;
        for step in emu.plan() {
            println!("{step}");
        }
    }
    Ok(())
}
