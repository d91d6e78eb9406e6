//! `dockctl`: run one volume or share operation against a dock.
//!
//! ```text
//! dockctl volume get --endpoint 10.0.0.5 --id vol-1
//! dockctl --timeout-ms 5000 volume create --dock-info '{"Endpoint":"10.0.0.5"}' --name v --size 1
//! dockctl share list
//! ```

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dockgate_client::{
    build_gateway_pipeline, DockGateway, DockOperation, GatewayConfig, ShareMethod, VolumeMethod,
    DEFAULT_DOCK_PORT,
};
use dockgate_core::{DockInfo, ShareRequest, VolumeRequest};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dockctl", version, about = "Run one storage operation against a dock")]
struct Cli {
    /// Port every dock serves gRPC on.
    #[arg(long, env = "DOCK_PORT", default_value_t = DEFAULT_DOCK_PORT)]
    port: u16,

    /// Upper bound on establishing the connection, in milliseconds.
    #[arg(long, env = "DOCK_CONNECT_TIMEOUT_MS")]
    connect_timeout_ms: Option<u64>,

    /// Deadline for the whole operation, in milliseconds. None by default.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Volume operations, routed by the dock descriptor.
    Volume {
        /// create, get, delete, create-attachment, update-attachment,
        /// delete-attachment, create-snapshot, get-snapshot, delete-snapshot
        method: VolumeMethod,
        #[command(flatten)]
        args: VolumeArgs,
    },
    /// Share operations. These always go to the dock on the local system.
    Share {
        /// create, get, list, delete, attach, detach
        method: ShareMethod,
        #[command(flatten)]
        args: ShareArgs,
    },
}

#[derive(Debug, Args)]
struct VolumeArgs {
    /// Serialized dock descriptor, e.g. '{"Endpoint":"10.0.0.5"}'.
    #[arg(long, conflicts_with = "endpoint")]
    dock_info: Option<String>,
    /// Dock host; shorthand for a descriptor carrying only an endpoint.
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long, default_value = "")]
    id: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    volume_type: String,
    #[arg(long, default_value_t = 0)]
    size: i32,
    #[arg(long, default_value = "")]
    action_type: String,
    #[arg(long, default_value = "")]
    host: String,
    #[arg(long, default_value = "")]
    device: String,
    #[arg(long, default_value = "")]
    attachment_id: String,
    #[arg(long, default_value = "")]
    mountpoint: String,
    #[arg(long, default_value = "")]
    snapshot_id: String,
    #[arg(long, default_value = "")]
    snapshot_name: String,
}

impl VolumeArgs {
    fn into_request(self) -> anyhow::Result<VolumeRequest> {
        let dock_info = match (self.dock_info, self.endpoint) {
            (Some(raw), _) => raw,
            (None, Some(endpoint)) => DockInfo::with_endpoint(endpoint).to_json()?,
            (None, None) => String::new(),
        };
        Ok(VolumeRequest {
            id: self.id,
            name: self.name,
            description: self.description,
            volume_type: self.volume_type,
            size: self.size,
            action_type: self.action_type,
            host: self.host,
            device: self.device,
            attachment_id: self.attachment_id,
            mountpoint: self.mountpoint,
            snapshot_id: self.snapshot_id,
            snapshot_name: self.snapshot_name,
            dock_info,
            ..VolumeRequest::default()
        })
    }
}

#[derive(Debug, Args)]
struct ShareArgs {
    #[arg(long, default_value = "")]
    id: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    share_type: String,
    #[arg(long, default_value = "")]
    share_proto: String,
    #[arg(long, default_value_t = 0)]
    size: i32,
    #[arg(long, default_value = "")]
    action_type: String,
    #[arg(long, default_value = "")]
    device: String,
    #[arg(long, default_value = "")]
    mountpoint: String,
}

impl From<ShareArgs> for ShareRequest {
    fn from(args: ShareArgs) -> Self {
        ShareRequest {
            id: args.id,
            name: args.name,
            description: args.description,
            share_type: args.share_type,
            share_proto: args.share_proto,
            size: args.size,
            action_type: args.action_type,
            device: args.device,
            mountpoint: args.mountpoint,
            ..ShareRequest::default()
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = GatewayConfig {
        dock_port: cli.port,
        connect_timeout: cli.connect_timeout_ms.map(Duration::from_millis),
        ..GatewayConfig::default()
    };
    let pipeline = build_gateway_pipeline(DockGateway::new(&config));

    let mut op = match cli.command {
        Command::Volume { method, args } => DockOperation::volume(method, args.into_request()?),
        Command::Share { method, args } => DockOperation::share(method, args.into()),
    };
    if let Some(ms) = cli.timeout_ms {
        op = op.with_timeout(Duration::from_millis(ms));
    }

    let response = pipeline.oneshot(op).await?;
    println!("status:  {}", response.status);
    println!("message: {}", response.message);
    if !response.error.is_empty() {
        println!("error:   {}", response.error);
    }
    Ok(())
}
