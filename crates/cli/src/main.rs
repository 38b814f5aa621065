use clap::Parser;
use httpot::Server;
use httpot_cli::{Pot, build_router};
use std::io;

#[derive(Parser)]
#[command(name = "pot-server", about = "HTCPCP-style coffee pot server")]
struct Args {
    /// Bind address (host:port)
    #[arg(long, short, default_value = "127.0.0.1:1234")]
    bind: String,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let pots = vec![
        Pot::new(
            &["coffee", "tea"],
            &["Cream", "Whole-milk", "Sugar", "Vanilla"],
        ),
        Pot::new(&["tea"], &["Sugar", "Stevia"]),
    ];

    let mut server = Server::new(&args.bind, build_router(pots));

    if let Err(e) = server.start() {
        eprintln!("Failed to start server: {}", e);
        return;
    }

    println!("pot server on {} — press Enter to stop", args.bind);
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();

    server.stop();
}
