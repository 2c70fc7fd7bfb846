//! Verifier CLI: holds a graph, connects to a Prover, and runs the
//! soundness-amplified round loop. Prints a single line, `1` for accept
//! or `0` for reject, to standard output.

use std::io::{stdin, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hamcycle_zk::{wire, Graph, VerifierSession, DEFAULT_ROUNDS, DEFAULT_SOCKET_PATH};

/// Hamiltonian Cycle zero-knowledge Verifier.
#[derive(Debug, Parser)]
#[command(name = "verifier", about = "ZK Hamiltonian-cycle proof verifier")]
struct Args {
    /// Number of soundness-amplification rounds to run.
    #[arg(default_value_t = DEFAULT_ROUNDS)]
    rounds: u64,

    /// Unix-domain-socket path to connect to (the Prover must already be
    /// listening on it).
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

fn run(args: Args) -> Result<bool> {
    let graph = Graph::read_from(stdin().lock()).context("reading graph from stdin")?;
    let n = graph.n();

    tracing::info!(n, rounds = args.rounds, socket = %args.socket.display(), "connecting to prover");
    let mut stream = UnixStream::connect(&args.socket)
        .with_context(|| format!("connecting to prover socket {}", args.socket.display()))?;

    wire::write_u64(&mut stream, n as u64).context("sending n to prover")?;
    wire::write_all(&mut stream, graph.as_bytes()).context("sending graph to prover")?;

    let mut session =
        VerifierSession::new(stream, graph, args.rounds).context("starting verifier session")?;
    let accept = session.amplify(args.rounds).context("running round loop")?;
    Ok(accept)
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(accept) => {
            println!("{}", if accept { 1 } else { 0 });
            let mut stdout = std::io::stdout();
            let _ = stdout.flush();
        }
        Err(err) => {
            eprintln!("verifier: {err:#}");
            std::process::exit(1);
        }
    }
}
