//! ftc - file transmission command tool
//!
//! Encodes commands from flags and decodes wire lines into JSON, for
//! inspecting captured transfer traffic.

use std::io::{self, BufRead};

use bytes::Bytes;
use clap::{Parser, Subcommand};
use ftwire::protocol::{
    registry, Action, Compression, FileType, Mtime, Permissions, QuietLevel, TransmissionType,
};
use ftwire::{Codec, Config, FileTransmissionCommand, FtError};
use tracing_subscriber::{fmt, EnvFilter};

/// ftc
#[derive(Parser, Debug)]
#[command(name = "ftc")]
#[command(about = "Encode and decode terminal file transmission commands")]
#[command(version)]
struct Args {
    /// Protocol identifier code
    #[arg(short, long, default_value_t = ftwire::FILE_TRANSFER_CODE)]
    code: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a command built from flags
    Encode {
        /// Prepend the protocol identifier code
        #[arg(short, long)]
        prefix: bool,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Decode wire lines (arguments, or stdin when none are given)
    Decode {
        /// Do not strip a leading protocol identifier code
        #[arg(long)]
        keep_prefix: bool,

        /// Lines to decode
        lines: Vec<String>,
    },

    /// List the known wire fields
    Fields,
}

#[derive(clap::Args, Debug)]
struct FieldArgs {
    #[arg(long)]
    action: Option<Action>,

    #[arg(long)]
    compression: Option<Compression>,

    #[arg(long)]
    file_type: Option<FileType>,

    #[arg(long)]
    transmission_type: Option<TransmissionType>,

    #[arg(long)]
    quiet: Option<QuietLevel>,

    #[arg(long, default_value = "")]
    id: String,

    #[arg(long, default_value = "")]
    file_id: String,

    #[arg(long, default_value = "")]
    bypass: String,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    status: String,

    #[arg(long, default_value = "")]
    parent: String,

    /// Modification time in nanoseconds since the epoch
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    mtime_ns: i64,

    /// Permission bits in octal, e.g. 644
    #[arg(long, value_parser = parse_octal)]
    permissions: Option<u32>,

    #[arg(long, default_value_t = 0)]
    size: u64,

    /// Payload, taken as raw UTF-8 bytes
    #[arg(long, default_value = "")]
    data: String,
}

impl FieldArgs {
    fn into_command(self) -> FileTransmissionCommand {
        FileTransmissionCommand {
            action: self.action.unwrap_or_default(),
            compression: self.compression.unwrap_or_default(),
            file_type: self.file_type.unwrap_or_default(),
            transmission_type: self.transmission_type.unwrap_or_default(),
            quiet: self.quiet.unwrap_or_default(),
            id: self.id,
            file_id: self.file_id,
            bypass: self.bypass,
            name: self.name,
            status: self.status,
            parent: self.parent,
            mtime: Mtime::from_nanos(self.mtime_ns),
            permissions: Permissions::from_mode(self.permissions.unwrap_or(0)),
            size: self.size,
            data: Bytes::from(self.data.into_bytes()),
        }
    }
}

fn parse_octal(s: &str) -> Result<u32, String> {
    u32::from_str_radix(s.trim_start_matches("0o"), 8).map_err(|e| e.to_string())
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ftwire=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> ftwire::Result<()> {
    match args.command {
        Commands::Encode { prefix, fields } => {
            let config = Config::builder()
                .prefix_code(args.code)
                .include_prefix(prefix)
                .build();
            let command = fields.into_command();
            tracing::debug!(%command, "encoding");
            println!("{}", Codec::new(config).encode(&command));
        }
        Commands::Decode { keep_prefix, lines } => {
            let config = Config::builder()
                .prefix_code(args.code)
                .strip_prefix(!keep_prefix)
                .build();
            let codec = Codec::new(config);

            if lines.is_empty() {
                for line in io::stdin().lock().lines() {
                    decode_line(&codec, &line?)?;
                }
            } else {
                for line in &lines {
                    decode_line(&codec, line)?;
                }
            }
        }
        Commands::Fields => {
            for field in registry().iter() {
                let encoding = if field.base64 { "base64" } else { "" };
                let kind = format!("{:?}", field.kind());
                println!("{:<4} {:<12} {}", field.name, kind, encoding);
            }
        }
    }
    Ok(())
}

fn decode_line(codec: &Codec, line: &str) -> ftwire::Result<()> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return Ok(());
    }

    let command = codec.decode(line)?;
    let mut rendered =
        serde_json::to_value(&command).map_err(|e| FtError::Serialization(e.to_string()))?;
    if !command.data.is_empty() {
        rendered["data_len"] = command.data.len().into();
    }
    println!("{}", rendered);
    Ok(())
}
