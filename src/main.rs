// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tagged_array::binary::{self, Header};
use tagged_array::{engine, Buffer, Dimensionality, ElementKind, RuntimeValue, Tag};

mod cli;
use cli::display::{self, field, row, section_bot, section_mid, section_top};
use cli::{Cli, Commands};

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            file,
            json,
            preview,
        } => run_inspect(&file, json, preview),
        Commands::Verify { file, kind, dims } => run_verify(&file, kind, dims),
        Commands::Convert {
            input,
            output,
            kind,
        } => run_convert(&input, &output, kind),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", display::error_label(), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default of `warn`.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(display::use_colors_stderr())
        .with_target(false)
        .init();
}

// ============================================================================
// INSPECT
// ============================================================================

#[derive(Serialize)]
struct InspectReport {
    file: String,
    #[serde(flatten)]
    header: Header,
    header_bytes: usize,
    payload_bytes: usize,
    preview: Vec<String>,
}

fn run_inspect(path: &Path, json: bool, preview: usize) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (header, header_bytes) = Header::parse(&bytes)
        .with_context(|| format!("{} is not a tagged array file", path.display()))?;
    let value = binary::from_bytes_any(&bytes)
        .with_context(|| format!("{} is not a tagged array file", path.display()))?;

    let report = InspectReport {
        file: path.display().to_string(),
        header_bytes,
        payload_bytes: bytes.len() - header_bytes,
        preview: preview_elements(&value, preview),
        header,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, value.len());
    Ok(())
}

fn preview_elements(value: &RuntimeValue, limit: usize) -> Vec<String> {
    let count = value.len().min(limit);
    match value.buffer() {
        Buffer::Text(cells) => cells.iter().take(count).map(|s| format!("{s:?}")).collect(),
        buffer => (0..count)
            .filter_map(|i| buffer.scalar_at(i))
            .map(|s| s.to_string())
            .collect(),
    }
}

fn print_report(report: &InspectReport, len: usize) {
    let header = &report.header;

    section_top(&display::truncate(&report.file, display::BOX_WIDTH - 8));
    field("kind", &display::kind_badge(header.kind));
    field("dims", &display::dims_label(header.dims));
    field("shape", &display::shape_label(&header.shape));
    if let Some(width) = header.cell_width {
        field("cell width", &format!("{width} bytes"));
    }
    field("elements", &len.to_string());

    section_mid("BYTES");
    field("header", &display::format_size(report.header_bytes));
    field("payload", &display::format_size(report.payload_bytes));

    if !report.preview.is_empty() {
        section_mid("PREVIEW");
        let mut line = String::from(" ");
        for item in &report.preview {
            line.push_str(item);
            line.push(' ');
        }
        if len > report.preview.len() {
            line.push('…');
        }
        row(&display::truncate(&line, display::BOX_WIDTH));
    }
    section_bot();
}

// ============================================================================
// VERIFY
// ============================================================================

fn run_verify(path: &Path, kind: ElementKind, dims: Dimensionality) -> Result<()> {
    let tag = Tag::new(kind, dims);
    let value = binary::read_path(tag, path)
        .with_context(|| format!("{} does not hold a {}", path.display(), tag))?;

    println!(
        "{} {} is {} {}",
        display::ok_label(),
        path.display(),
        tag,
        display::shape_label(value.shape())
    );
    Ok(())
}

// ============================================================================
// CONVERT
// ============================================================================

fn run_convert(input: &Path, output: &Path, kind: ElementKind) -> Result<()> {
    let value = binary::read_any_path(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let from = value.actual_kind();
    let dims = Dimensionality::from_arity(value.actual_ndim())
        .ok_or_else(|| anyhow!("{} has {} axes", input.display(), value.actual_ndim()))?;

    let tag = Tag::new(kind, dims);
    let outcome = engine::try_coerce(tag, value)
        .with_context(|| format!("cannot convert {} to {}", input.display(), tag))?;
    binary::write_path(tag, outcome.value(), output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        from = %from,
        to = %kind,
        coerced = outcome.is_coerced(),
        "converted"
    );
    println!(
        "{} {} ({}) -> {} ({}) {}",
        display::ok_label(),
        input.display(),
        from,
        output.display(),
        tag,
        display::shape_label(outcome.value().shape())
    );
    Ok(())
}
