//! Diagnostic: read one DXF drawing or motion log and print its polylines.
//!
//! ```text
//! ingest-dump <file> [--reference-from-layer] [--skip-blocks]
//!             [--construction-lines] [--encoding LABEL]
//!             [--filter MODE [ARG [DIALECT]]]
//! ```
//!
//! Logging follows `RUST_LOG` (default `info`).

use anyhow::{bail, Context};
use pattern_ingest::{open_reader, InputFormat, LayerFilter, ReaderOptions};
use tracing_subscriber::prelude::*;

struct Args {
    path: String,
    options: ReaderOptions,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut path = None;
    let mut options = ReaderOptions::default();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        i += 1;
        match arg.as_str() {
            "--reference-from-layer" => options.dxf.reference_from_layer = true,
            "--skip-blocks" => options.dxf.include_blocks = false,
            "--construction-lines" => options.motion.include_construction_lines = true,
            "--encoding" => {
                let label = args.get(i).context("--encoding needs a label")?;
                i += 1;
                options.dxf.encoding = Some(
                    encoding_rs::Encoding::for_label(label.as_bytes())
                        .with_context(|| format!("unknown encoding '{}'", label))?,
                );
            }
            "--filter" => {
                let mode = args.get(i).context("--filter needs a mode")?;
                i += 1;
                // Everything up to the next flag belongs to the filter
                let count = args[i..]
                    .iter()
                    .take_while(|a| !a.starts_with("--"))
                    .count();
                let filter_args: Vec<&str> =
                    args[i..i + count].iter().map(String::as_str).collect();
                i += count;
                options.dxf.layer_filter = LayerFilter::from_mode(mode, &filter_args)?;
            }
            flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
            _ if path.is_none() => path = Some(arg.clone()),
            _ => bail!("only one input file is accepted"),
        }
    }

    let path = path.context(
        "usage: ingest-dump <file> [--reference-from-layer] [--skip-blocks] \
         [--construction-lines] [--encoding LABEL] [--filter MODE [ARG [DIALECT]]]",
    )?;
    Ok(Args { path, options })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Args { path, options } = parse_args()?;
    let format = InputFormat::from_path(&path);
    tracing::info!("reading {} as {:?}", path, format);
    if format == InputFormat::Dxf {
        tracing::info!("layer filter: {}", options.dxf.layer_filter);
    }

    let mut reader =
        open_reader(&path, &options).with_context(|| format!("cannot open {}", path))?;
    let pattern = reader
        .read_pattern()
        .with_context(|| format!("failed to read {}", path))?;

    for (index, polyline) in pattern.polylines().enumerate() {
        let dose = match polyline.dose() {
            Some(dose) => format!("{:.4}", dose),
            None => "-".to_string(),
        };
        let first = polyline
            .first()
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        println!(
            "{:>6}  ref={:<3} vertices={:<6} closed={:<5} dose={:<8} length={:<12.4} start={}",
            index,
            polyline.reference,
            polyline.len(),
            polyline.closed,
            dose,
            polyline.length(),
            first
        );
    }

    println!();
    println!("Polylines: {}", pattern.len());
    println!("Vertices:  {}", pattern.vertex_count());
    println!("References: {:?}", pattern.references());
    if let Some(bounds) = pattern.bounds() {
        println!("Bounds:    {}", bounds);
    }

    let notifications = reader.notifications();
    if !notifications.is_empty() {
        println!();
        println!("Notifications ({}):", notifications.len());
        for notification in notifications {
            println!("  {}", notification);
        }
    }

    reader.close()?;
    Ok(())
}
