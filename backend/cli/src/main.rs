mod device;
mod notify;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};

use snaptext_capture::AcquisitionSource;
use snaptext_pipeline::{Pipeline, RunState, SinkPolicy};
use snaptext_vision::OpenAiVision;

use device::HostCamera;
use notify::ConsoleNotifier;
use store::FsStore;

#[derive(Parser)]
#[command(name = "snaptext")]
#[command(about = "snaptext — capture an image and extract its text into your notes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture Image and Extract Text
    #[command(group = ArgGroup::new("source").required(true).args(["file", "camera"]))]
    Capture {
        /// Image file to use as the capture source
        #[arg(long)]
        file: Option<PathBuf>,

        /// Capture one frame from the camera instead
        #[arg(long)]
        camera: bool,

        /// Where the extracted text is persisted
        #[arg(long, value_enum, default_value_t = SinkArg::Append)]
        sink: SinkArg,

        /// Vault root holding the settings file and documents
        /// (default: SNAPTEXT_CONFIG_DIR or ~/.snaptext)
        #[arg(long)]
        vault: Option<PathBuf>,

        /// Vault-relative document to treat as the active document
        #[arg(long)]
        active: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SinkArg {
    /// Append to the active document
    Append,
    /// Create a new timestamped document
    NewDoc,
}

impl From<SinkArg> for SinkPolicy {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Append => SinkPolicy::Append,
            SinkArg::NewDoc => SinkPolicy::NewDocument,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; notices (stdout) stay clean for the user.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Capture {
            file,
            camera,
            sink,
            vault,
            active,
        } => {
            let root = vault.unwrap_or_else(snaptext_config::storage_dir);
            let source = match (camera, file) {
                (true, _) => AcquisitionSource::Camera,
                (false, Some(path)) => AcquisitionSource::File(path),
                (false, None) => unreachable!("clap requires a capture source"),
            };

            let mut pipeline = Pipeline::new(
                Arc::new(FsStore::new(root.clone(), active)),
                Arc::new(ConsoleNotifier),
                Arc::new(HostCamera),
                Arc::new(OpenAiVision::new()),
                sink.into(),
                root,
            );
            pipeline.init().await;
            let state = pipeline.run(source).await;
            pipeline.dispose();

            match state {
                RunState::Done => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            }
        }
    }
}
