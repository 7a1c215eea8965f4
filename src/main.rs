use clap::Parser;
use miette::Result;
use qat::cli::{dispatch, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Install miette's fancy error handler for readable diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    // Logs go to stderr so list output can be piped
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("QAT_LOG")
                .unwrap_or_else(|_| "qat=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let cli = Cli::parse();
    dispatch(cli)
}
