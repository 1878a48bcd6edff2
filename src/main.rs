use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envguard::cli::{
    handle_assign_command, handle_audit_command, handle_decrypt_command,
    handle_encrypt_command, handle_example_command, handle_export_command, handle_get_command,
    handle_list_command, handle_restore_command, handle_rotate_command, handle_set_command,
    handle_unset_command, handle_validate_command, parse_assignment, Context, ExportFormat,
};
use envguard::config::Settings;

#[derive(Parser)]
#[command(
    name = "envguard",
    version,
    about = "Manage .env files with templates, validation and encryption",
    long_about = "envguard reads and edits .env files while preserving comments and \
                  layout, generates value-free templates, validates required keys, and \
                  encrypts env files with XChaCha20-Poly1305 under a local key file."
)]
struct Cli {
    /// Base directory for all env files
    #[arg(long, global = true, env = "ENVGUARD_DIR", default_value = ".")]
    dir: PathBuf,

    /// Env file to operate on (relative to --dir)
    #[arg(long, global = true, env = "ENVGUARD_FILE")]
    file: Option<PathBuf>,

    /// Key file used for encryption (relative to --dir)
    #[arg(long, global = true, env = "ENVGUARD_KEY_FILE")]
    key_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all variables
    #[command(alias = "ls")]
    List {
        /// Show sensitive values instead of masking them
        #[arg(long)]
        reveal: bool,
    },

    /// Print the value of a variable
    Get {
        key: String,
        /// Value printed when the key is absent
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Set a variable
    Set {
        key: String,
        value: String,
        /// Comment line written above a newly added variable
        #[arg(short, long)]
        comment: Option<String>,
    },

    /// Set several variables at once
    Assign {
        /// KEY=VALUE pairs
        #[arg(required = true, value_parser = parse_assignment)]
        pairs: Vec<(String, String)>,
    },

    /// Remove a variable
    #[command(alias = "rm")]
    Unset { key: String },

    /// Write a template with every value removed
    Example {
        /// Template path (default from settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that every key of a template is present
    Validate {
        /// Template path (default from settings)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Encrypt the env file
    Encrypt {
        /// Ciphertext path (default from settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a ciphertext back into the env file
    Decrypt {
        /// Ciphertext path (default from settings)
        input: Option<PathBuf>,
        /// Plaintext path (default: the env file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-encrypt the ciphertext under a fresh key
    Rotate,

    /// Export variables as JSON or YAML
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Show sensitive values instead of masking them
        #[arg(long)]
        reveal: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Restore the env file from its backup
    Restore,

    /// Show recent audit entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Write a default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ENVGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let ctx = Context::load(&cli.dir, cli.file.as_deref(), cli.key_file.as_deref())?;

    match cli.command {
        Some(Commands::List { reveal }) => handle_list_command(&ctx, reveal)?,
        Some(Commands::Get { key, default }) => {
            handle_get_command(&ctx, &key, default.as_deref())?
        }
        Some(Commands::Set {
            key,
            value,
            comment,
        }) => handle_set_command(&ctx, &key, &value, comment.as_deref())?,
        Some(Commands::Assign { pairs }) => handle_assign_command(&ctx, &pairs)?,
        Some(Commands::Unset { key }) => handle_unset_command(&ctx, &key)?,
        Some(Commands::Example { output }) => handle_example_command(&ctx, output.as_deref())?,
        Some(Commands::Validate { template }) => {
            handle_validate_command(&ctx, template.as_deref())?
        }
        Some(Commands::Encrypt { output }) => handle_encrypt_command(&ctx, output.as_deref())?,
        Some(Commands::Decrypt { input, output }) => {
            handle_decrypt_command(&ctx, input.as_deref(), output.as_deref())?
        }
        Some(Commands::Rotate) => handle_rotate_command(&ctx)?,
        Some(Commands::Export {
            format,
            reveal,
            output,
        }) => {
            let mask = ctx.settings.mask_sensitive && !reveal;
            handle_export_command(&ctx, format, mask, output.as_deref())?
        }
        Some(Commands::Restore) => handle_restore_command(&ctx)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&ctx, limit)?,
        Some(Commands::Init) => {
            let path = ctx.paths.settings_file();
            if path.exists() {
                println!("Settings already exist at {}", path.display());
            } else {
                Settings::default().save(&path)?;
                println!("Wrote default settings to {}", path.display());
            }
        }
        Some(Commands::Config) => {
            println!("envguard Configuration");
            println!("======================");
            println!("Base directory: {}", ctx.paths.base_dir().display());
            println!("Env file:       {}", ctx.paths.env_file().display());
            println!("Key file:       {}", ctx.paths.key_file().display());
            println!("Encrypted file: {}", ctx.paths.encrypted_file().display());
            println!("Example file:   {}", ctx.paths.example_file().display());
            println!("Backup file:    {}", ctx.paths.backup_file().display());
            println!();
            println!("Settings:");
            println!("  Mask sensitive values: {}", ctx.settings.mask_sensitive);
            println!("  Audit log enabled:     {}", ctx.settings.audit.enabled);
        }
        None => {
            println!("envguard - .env file manager");
            println!();
            println!("Run 'envguard --help' for usage information.");
        }
    }

    Ok(())
}
