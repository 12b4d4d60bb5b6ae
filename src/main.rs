use clap::Parser;
use color_eyre::Result;
use serial_tap::{
    bridge, cli, logging,
    transcript::TranscriptWriter,
    transport::{self, Side},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Level};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();

    if let Some(command) = &cli.command {
        cli::handle_command(command.clone());

        return Ok(());
    }

    logging::init(
        Level::INFO,
        cli.log_dir.clone().map(|dir| (Level::DEBUG, dir)),
    )
    .await;

    let config = cli.resolve_config()?;
    debug!(?config, "Resolved configuration");

    let host = transport::serial::open(Side::Host, &config.host)?;
    let device = transport::serial::open(Side::Device, &config.device)?;

    let transcript = TranscriptWriter::new(std::io::stdout()).with_filter(cli.only);

    let cancel = CancellationToken::new();

    let stop = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C, quitting");
            stop.cancel();
        }
    });

    bridge::run(host, device, config, transcript, cancel).await?;

    Ok(())
}
