use clap::Parser;
use std::env;
use std::error::Error;
use std::io::prelude::*;
use std::io::BufReader;
use std::os::unix::net::UnixStream;

const SOCKET_NAME: &str = "restbell.sock";

/// Drives a running restbell session over its control socket.
#[derive(Parser)]
#[command(name = "restbellctl")]
struct Cli {
    /// Command words, e.g. `status`, `log 2` or `swap 3 Incline Bench Press`
    #[arg(required = true)]
    command: Vec<String>,

    /// Control socket path
    #[arg(short, long)]
    socket: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let socket = cli.socket.unwrap_or_else(|| {
        format!(
            "{}/{}",
            env::var("XDG_RUNTIME_DIR").unwrap_or("/tmp".to_string()),
            SOCKET_NAME
        )
    });

    let mut stream = UnixStream::connect(&socket).expect("Server is not running");

    stream.write_all(format!("{}\n", cli.command.join(" ")).as_bytes())?;

    let mut reply = String::new();
    BufReader::new(&stream).read_line(&mut reply)?;
    print!("{}", reply);

    Ok(())
}
