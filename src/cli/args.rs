// src/cli/args.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Structural interface conformance checker
#[derive(Parser)]
#[command(name = "conform")]
#[command(version = "0.1.0")]
#[command(about = "Check classes against interfaces declared in .iface files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Declare every type and print the conformance matrix
    Check {
        /// Files, directories, or glob patterns
        #[arg(value_name = "PATHS", required = true)]
        paths: Vec<String>,
    },
    /// Check one class against one interface
    Query {
        /// Path to the .iface file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Candidate class name
        #[arg(value_name = "CLASS")]
        class: String,
        /// Interface name
        #[arg(value_name = "INTERFACE")]
        interface: String,
    },
    /// Instantiate a class and call a method with no arguments
    Call {
        /// Path to the .iface file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Class to instantiate
        #[arg(value_name = "CLASS")]
        class: String,
        /// Method to call
        #[arg(value_name = "METHOD")]
        method: String,
    },
}
