//! Clap derive structures for the `cxsync` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. This
//! file is also compiled by `build.rs`, so it may only depend on `clap`
//! and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cxsync -- declarative configuration sync for AOS-CX switches
#[derive(Debug, Parser)]
#[command(
    name = "cxsync",
    version,
    about = "Reconcile AOS-CX switch configuration from a manifest",
    long_about = "Reads desired VLANs, interfaces and running-config from a manifest\n\
        and converges a switch to it over the AOS-CX REST API, writing only\n\
        the fields that differ.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Switch profile to use
    #[arg(long, short = 'p', env = "CXSYNC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Switch hostname or URL (overrides profile)
    #[arg(long, short = 'H', env = "CXSYNC_HOST", global = true)]
    pub host: Option<String>,

    /// Login user (overrides profile)
    #[arg(long, short = 'u', env = "CXSYNC_USERNAME", global = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CXSYNC_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CXSYNC_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "CXSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Converge the switch to a manifest
    Apply(ManifestArgs),

    /// Show what `apply` would change, without writing
    Plan(ManifestArgs),

    /// Manage VLANs
    Vlan(VlanArgs),

    /// Manage physical interfaces
    #[command(alias = "if")]
    Interface(InterfaceArgs),

    /// Inspect or remove Layer-2 port configuration
    L2(PortArgs),

    /// Inspect or remove Layer-3 port configuration
    L3(PortArgs),

    /// Inspect or remove VLAN interfaces (SVIs)
    #[command(alias = "svi")]
    VlanInterface(VlanInterfaceArgs),

    /// Compare or push the full running configuration
    RunningConfig(RunningConfigArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Manifest ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ManifestArgs {
    /// Manifest file (YAML or JSON)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

// ── VLAN ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VlanArgs {
    #[command(subcommand)]
    pub command: VlanCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlanCommand {
    /// Show one VLAN
    Get {
        /// VLAN id (1-4094)
        id: String,
    },

    /// Create or converge one VLAN
    Set {
        /// VLAN id (1-4094)
        id: u16,

        /// VLAN name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Administrative state
        #[arg(long, default_value = "up")]
        admin: AdminArg,
    },

    /// Delete one VLAN
    Delete {
        /// VLAN id (1-4094)
        id: String,
    },
}

// ── Interface ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InterfaceArgs {
    #[command(subcommand)]
    pub command: InterfaceCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfaceCommand {
    /// Show one interface
    Get {
        /// Interface name, e.g. 1/1/1
        name: String,
    },

    /// Set description and admin state of an interface
    Set {
        /// Interface name, e.g. 1/1/1
        name: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Administrative state
        #[arg(long, default_value = "up")]
        admin: AdminArg,
    },

    /// Delete the interface configuration entry
    Delete {
        /// Interface name, e.g. 1/1/1
        name: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AdminArg {
    Up,
    Down,
}

// ── L2 / L3 port configuration ───────────────────────────────────────

#[derive(Debug, Args)]
pub struct PortArgs {
    #[command(subcommand)]
    pub command: PortCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortCommand {
    /// Show the port configuration
    Get {
        /// Interface name, e.g. 1/1/1
        name: String,
    },

    /// Remove the port configuration
    Delete {
        /// Interface name, e.g. 1/1/1
        name: String,
    },
}

// ── VLAN interface ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VlanInterfaceArgs {
    #[command(subcommand)]
    pub command: VlanInterfaceCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlanInterfaceCommand {
    /// Show one VLAN interface
    Get {
        /// VLAN id, or the tracked id (vlanint_100)
        id: String,
    },

    /// Delete one VLAN interface
    Delete {
        /// VLAN id, or the tracked id (vlanint_100)
        id: String,
    },
}

// ── Running config ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RunningConfigArgs {
    #[command(subcommand)]
    pub command: RunningConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum RunningConfigCommand {
    /// Diff the switch running-config against a local file
    Diff {
        /// Local configuration file
        file: PathBuf,
    },

    /// Push a local JSON configuration when it differs from the switch
    Push {
        /// Local configuration file (JSON)
        file: PathBuf,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show current configuration (passwords masked)
    Show,

    /// Set a key on the active profile
    Set {
        /// Key: hostname, username, password_env, rest_version, insecure, timeout, ca_cert
        key: String,
        /// Value
        value: String,
    },

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// List configured profiles
    Profiles,

    /// Store a profile password in the system keyring
    SetPassword {
        /// Profile to store the password for (defaults to the active one)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
