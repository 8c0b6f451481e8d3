use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde_json::json;

use vecshape::cli::{Cli, Command, LogFormat};
use vecshape::designer::{compute_bbox, handles_for, path_codec, Primitive};
use vecshape::{
    init_logging, load_config, CoordinateMapper, Element, Handle, Modifiers, SessionOutcome,
    Shape, TransformSession,
};

fn read_element(path: &Path) -> anyhow::Result<Element> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&raw)
        .context("expected element JSON: {\"tag\": ..., \"attributes\": [[name, value], ...]}")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_format == LogFormat::Json)?;
    tracing::debug!(version = vecshape::VERSION, built = vecshape::BUILD_DATE, "vecshape starting");

    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Command::Bbox { element, matrix } => {
            let element = read_element(&element)?;
            let mapper = CoordinateMapper::from_svg_matrix(matrix)?;
            let shape = Shape::from_element(&element);
            json!({
                "kind": shape.kind(),
                "local": shape.bounds(),
                "screen": compute_bbox(&shape, &mapper),
                "handles": handles_for(&shape, &mapper),
            })
        }
        Command::Apply {
            element,
            matrix,
            handle,
            from,
            to,
            rotate,
            lock_aspect,
        } => {
            let element = read_element(&element)?;
            let mapper = match CoordinateMapper::from_svg_matrix(matrix) {
                Ok(mapper) => mapper,
                Err(e) => {
                    tracing::warn!("transform aborted: {}", e);
                    let output = json!({ "outcome": "abort", "reason": e.to_string(), "element": element });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                    return Ok(());
                }
            };

            let mut modifiers = Modifiers::none();
            if rotate {
                modifiers.press(config.rotate_modifier);
            }
            if lock_aspect {
                modifiers.press(config.aspect_modifier);
            }

            let original = element.clone();
            let mut session =
                TransformSession::begin(element, Handle::new(handle, from), from, modifiers, &mapper, &config);
            match session.update(to, &mapper) {
                Ok(preview) => tracing::debug!(?preview, "preview"),
                Err(e) => tracing::debug!("preview unavailable: {}", e),
            }

            match session.finish(to, &mapper) {
                SessionOutcome::Commit(commit) => json!({
                    "outcome": "commit",
                    "commit": commit,
                    "element": commit.apply_to(&original),
                }),
                SessionOutcome::Abort { snapshot, reason } => json!({
                    "outcome": "abort",
                    "reason": reason.to_string(),
                    "element": snapshot,
                }),
            }
        }
        Command::Path { data, decimals } => {
            let segments = path_codec::parse(&data);
            json!({
                "d": path_codec::serialize_with(&segments, decimals.unwrap_or(config.decimals)),
                "segments": segments,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
