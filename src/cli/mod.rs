// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the tagarr command-line interface.
//!
//! Three subcommands: `inspect` to show what a file holds, `verify` to check
//! it against a declared tag, and `convert` to coerce it to another element
//! kind and write the result.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tagged_array::{Dimensionality, ElementKind};

#[derive(Parser)]
#[command(
    name = "tagarr",
    about = "Inspect, verify and convert tagged numeric array files",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the header and a preview of a tagged array file
    Inspect {
        /// Path to the file
        file: PathBuf,

        /// Print the header as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Number of leading elements to preview
        #[arg(long, default_value = "8")]
        preview: usize,
    },

    /// Check that a file holds exactly the declared element kind and dimensionality
    ///
    /// Exits with status 1 and prints the mismatch if it does not.
    Verify {
        /// Path to the file
        file: PathBuf,

        /// Expected element kind (int8..int64, uint8..uint64, float32, float64, bool, text)
        #[arg(short, long)]
        kind: ElementKind,

        /// Expected dimensionality (flat or grid)
        #[arg(short, long, default_value = "flat")]
        dims: Dimensionality,
    },

    /// Coerce a file to another element kind, keeping its shape
    Convert {
        /// Input file
        input: PathBuf,

        /// Output file (replaced if it exists)
        output: PathBuf,

        /// Target element kind
        #[arg(short, long)]
        kind: ElementKind,
    },
}
