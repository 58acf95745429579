use clap::{Parser, Subcommand};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};

const SOCKET_PATH: &str = "/tmp/clinic-ui.sock";

#[derive(Parser, Debug)]
#[command(name = "sitectl", version, about = "Send page events to a running clinic-ui", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Socket of the running page
    #[arg(short, long, global = true, default_value = SOCKET_PATH)]
    socket: PathBuf,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Commands {
    /// The document finished parsing
    Ready,
    /// All resources finished loading
    Load,
    /// The page is being left
    Unload,
    /// Click an element
    Click { id: String },
    /// Pointer enters an element
    Enter { id: String },
    /// Pointer leaves an element
    Leave { id: String },
    /// Move keyboard focus to an element
    Focus { id: String },
    /// Press a key (Escape, Enter, " ", Tab, ...)
    Key {
        key: String,
        #[arg(long)]
        shift: bool,
    },
    /// Touch starts on an element at horizontal position X
    Touchstart { id: String, x: f64 },
    /// Touch moves to horizontal position X
    Touchmove {
        #[arg(allow_hyphen_values = true)]
        x: f64,
    },
    /// Touch ends
    Touchend,
    /// Scroll the window to offset Y
    Scroll { y: f64 },
    /// Resize the viewport
    Resize { width: f64, height: Option<f64> },
    /// Open the photo lightbox with an image
    OpenModal { src: String },
    /// Close the photo lightbox
    CloseModal,
    /// Toggle an FAQ item
    Faq { id: String },
    /// Move the testimonial rotator by DIR panels
    Testimonial {
        #[arg(allow_hyphen_values = true)]
        dir: i64,
    },
    /// Go to the booking page, optionally remembering a service
    Book { service: Option<String> },
    /// Log a status snapshot in the daemon
    Status,
    /// Reload the configuration file
    Reload,
}

impl Commands {
    /// The protocol line for this command.
    fn to_line(&self) -> String {
        let words: Vec<String> = match self {
            Commands::Ready => vec!["ready".into()],
            Commands::Load => vec!["load".into()],
            Commands::Unload => vec!["unload".into()],
            Commands::Click { id } => vec!["click".into(), id.clone()],
            Commands::Enter { id } => vec!["enter".into(), id.clone()],
            Commands::Leave { id } => vec!["leave".into(), id.clone()],
            Commands::Focus { id } => vec!["focus".into(), id.clone()],
            Commands::Key { key, shift } => {
                let mut words = vec!["key".into(), key.clone()];
                if *shift {
                    words.push("shift".into());
                }
                words
            }
            Commands::Touchstart { id, x } => vec!["touchstart".into(), id.clone(), x.to_string()],
            Commands::Touchmove { x } => vec!["touchmove".into(), x.to_string()],
            Commands::Touchend => vec!["touchend".into()],
            Commands::Scroll { y } => vec!["scroll".into(), y.to_string()],
            Commands::Resize { width, height } => {
                let mut words = vec!["resize".into(), width.to_string()];
                words.extend(height.map(|h| h.to_string()));
                words
            }
            Commands::OpenModal { src } => vec!["open-modal".into(), src.clone()],
            Commands::CloseModal => vec!["close-modal".into()],
            Commands::Faq { id } => vec!["faq".into(), id.clone()],
            Commands::Testimonial { dir } => vec!["testimonial".into(), dir.to_string()],
            Commands::Book { service } => {
                let mut words = vec!["book".into()];
                words.extend(service.clone());
                words
            }
            Commands::Status => vec!["status".into()],
            Commands::Reload => vec!["reload".into()],
        };
        shell_words::join(words)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let line = cli.command.to_line();
    log::debug!("Sending '{}'", line);

    let reply = send_command(&cli.socket, &line)?;
    match reply.strip_prefix("error: ") {
        Some(reason) => anyhow::bail!("{}", reason),
        None => Ok(()),
    }
}

fn send_command(socket: &Path, cmd: &str) -> anyhow::Result<String> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to clinic-ui at {}: {}. Is it running?",
            socket.display(),
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;

    let mut reply = String::new();
    BufReader::new(stream).read_line(&mut reply)?;
    Ok(reply.trim_end().to_string())
}
