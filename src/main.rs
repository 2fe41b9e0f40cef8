use clap::Parser;
use osctl::{
    drive, logging, Dashboard, DashboardConfig, Encoder, MessageSender, NullSender, UdpSender,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::{runtime::Runtime, sync::watch};
use tracing::{error, info};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Terminal control surface that mirrors encoders over OSC", long_about = None)]
struct Cli {
    /// Host receiving the OSC messages (overrides the config file)
    #[arg(long)]
    host: Option<String>,
    /// UDP port receiving the OSC messages (overrides the config file)
    #[arg(long)]
    port: Option<u16>,
    /// Dashboard layout and routes in TOML
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 'q')]
    quit_key: char,
    #[arg(long, default_value_t = 60, help = "Redraw interval in milliseconds")]
    redraw_ms: u64,
    #[arg(long, value_name = "FILE", default_value = "osctl.log")]
    log_file: PathBuf,
    #[arg(long, help = "Do not send any OSC messages")]
    dry_run: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file)?;

    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    }
    .with_endpoint(cli.host.clone(), cli.port);
    let endpoint = format!("{}:{}", config.osc.host, config.osc.port);

    let sender: Arc<dyn MessageSender> = if cli.dry_run {
        Arc::new(NullSender)
    } else {
        Arc::new(UdpSender::new()?)
    };

    let mut encoders = Vec::with_capacity(config.encoders.len());
    for opts in config.encoder_options()? {
        encoders.push(Arc::new(Encoder::new(opts, sender.clone())?));
    }
    let keys = config.key_toggles()?;
    info!(
        encoders = encoders.len(),
        keys = keys.len(),
        "sending to {endpoint}"
    );

    let runtime = Runtime::new()?;
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let mut drivers = Vec::with_capacity(encoders.len());
    for (encoder, spec) in encoders.iter().zip(&config.encoders) {
        let encoder = encoder.clone();
        let plan = spec.plan();
        let cancel = cancel_rx.clone();
        let label = spec.label.clone();
        drivers.push(runtime.spawn(async move {
            if let Err(err) = drive(encoder, plan, cancel).await {
                error!("driver for {label} stopped: {err}");
            }
        }));
    }

    let outcome = Dashboard::new(encoders, keys, sender, endpoint)
        .and_then(|mut dashboard| dashboard.run(cli.quit_key, Duration::from_millis(cli.redraw_ms)));

    let _ = cancel_tx.send(true);
    runtime.block_on(async {
        for handle in drivers {
            let _ = handle.await;
        }
    });
    outcome?;
    Ok(())
}
