//! Prover CLI: holds a secret Hamiltonian cycle, accepts a connection from
//! a Verifier, and answers the round loop.

use std::io::stdin;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use hamcycle_zk::{wire, Cycle, Graph, ProverSession, DEFAULT_ROUNDS, DEFAULT_SOCKET_PATH};

/// Hamiltonian Cycle zero-knowledge Prover.
#[derive(Debug, Parser)]
#[command(name = "prover", about = "ZK Hamiltonian-cycle proof prover")]
struct Args {
    /// Number of soundness-amplification rounds to run.
    #[arg(default_value_t = DEFAULT_ROUNDS)]
    rounds: u64,

    /// Unix-domain-socket path to listen on (removed and recreated if it
    /// already exists).
    #[arg(long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn accept_verifier(socket: &PathBuf) -> Result<UnixStream> {
    if socket.exists() {
        std::fs::remove_file(socket)
            .with_context(|| format!("removing stale socket {}", socket.display()))?;
    }
    let listener = UnixListener::bind(socket)
        .with_context(|| format!("binding socket {}", socket.display()))?;
    tracing::info!(socket = %socket.display(), "listening for verifier");
    let (stream, _) = listener.accept().context("accepting verifier connection")?;
    Ok(stream)
}

fn run(args: Args) -> Result<()> {
    let mut stream = accept_verifier(&args.socket)?;

    let n = wire::read_u64(&mut stream).context("reading n from verifier")? as usize;
    let mut graph_bytes = vec![0u8; n * n];
    wire::read_exact(&mut stream, &mut graph_bytes).context("reading graph from verifier")?;
    let graph = Graph::from_bytes(n, graph_bytes);

    let cycle = Cycle::read_from(stdin().lock(), n).context("reading cycle from stdin")?;
    if let Err(e) = cycle.validate_against(&graph) {
        bail!("cycle does not traverse a real edge of the received graph: {e}");
    }

    tracing::info!(n, rounds = args.rounds, "starting round loop");
    let mut session = ProverSession::new(stream, graph, cycle).context("starting prover session")?;
    session.amplify(args.rounds).context("running round loop")
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("prover: {err:#}");
        std::process::exit(1);
    }
}
