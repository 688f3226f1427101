//! CLI argument definitions for v8probe
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "v8probe",
    version,
    about = "Offline native-callback recovery from recorded V8 sessions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Which binding convention to resolve.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Convention {
    /// Fast-call callback plus its overload table (JSON result)
    Callback,
    /// N-API bundle: the invoke function pointer
    NapiInvoke,
    /// N-API bundle: the registered native function (one more indirection)
    Napi,
    /// N-API getter/setter: the handle is the callback-data object itself
    NapiGetset,
    /// Engine-external value behind an API object
    Nan,
    /// The function's name field only
    Name,
}

/// Which dump grammar the recorded session used.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GrammarArg {
    /// Dashed inline labels: `- callback: 0x...`
    Inline,
    /// Paired delimiter markers: `callback = <0x...>`
    Marker,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a resolution pipeline against recorded artifacts
    Resolve {
        /// Binding convention to resolve
        #[arg(long, value_enum)]
        kind: Convention,

        /// Handle (decimal or 0x-prefixed hex)
        handle: String,

        /// Recorded dumps: JSON object mapping address -> dump text
        #[arg(long)]
        dumps: PathBuf,

        /// Flat memory image (needed by the bundle conventions)
        #[arg(long)]
        image: Option<PathBuf>,

        /// Base address the image was captured at
        #[arg(long, default_value = "0")]
        image_base: String,

        /// Dump grammar variant
        #[arg(long, value_enum, default_value = "inline")]
        grammar: GrammarArg,
    },

    /// Replay a raw dump (the canonical-address check applies)
    Dump {
        /// Address (decimal or 0x-prefixed hex)
        handle: String,

        /// Recorded dumps: JSON object mapping address -> dump text
        #[arg(long)]
        dumps: PathBuf,
    },

    /// First machine word at the handle's address, decimal-encoded
    Identity {
        /// Address (decimal or 0x-prefixed hex)
        handle: String,

        /// Flat memory image
        #[arg(long)]
        image: PathBuf,

        /// Base address the image was captured at
        #[arg(long, default_value = "0")]
        image_base: String,
    },
}
