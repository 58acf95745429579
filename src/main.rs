use anyhow::Context;
use clap::Parser;
use clinic_ui::config;
use clinic_ui::dom::Document;
use clinic_ui::events::AppEvent;
use clinic_ui::gui::app::App;
use clinic_ui::sys::{runtime, server};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Headless interaction engine for the clinic site", long_about = None)]
struct Args {
    /// Page manifest (TOML) describing the document; the bundled clinic page
    /// is used when omitted
    #[arg(short, long)]
    page: Option<PathBuf>,

    /// Unix socket the host writes events to
    #[arg(short, long, default_value = server::SOCKET_PATH)]
    socket: PathBuf,

    /// Write the default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.init_config {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let page = match &args.page {
        Some(path) => Document::load(path)
            .with_context(|| format!("Failed to load page {}", path.display()))?,
        None => Document::default_page().context("Bundled page is invalid")?,
    };
    let app = App::new(config, page);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx.clone(), args.socket);

    tx.send_blocking(AppEvent::DomReady)?;
    tx.send_blocking(AppEvent::Load)?;

    runtime::run_event_loop(app, rx)?;
    Ok(())
}
