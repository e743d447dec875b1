//! Printing the result of a run.

use std::io;

use dungen::math::{Face6, FreePoint, FreeVector, GridPoint};
use dungen::{Dungeon, GenerationReport};

/// Format of the report printed after a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
#[non_exhaustive]
pub enum OutputFormat {
    /// One line per chunk.
    #[default]
    Summary,
    /// Every chunk, edge and connector, as JSON.
    Json,
}

/// Writes `dungeon` and `report` to `out` in the given format.
pub fn write_report(
    out: &mut dyn io::Write,
    format: OutputFormat,
    dungeon: &Dungeon,
    report: &GenerationReport,
) -> Result<(), anyhow::Error> {
    match format {
        OutputFormat::Summary => write_summary(out, dungeon, report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &JsonReport::new(dungeon, report))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_summary(
    out: &mut dyn io::Write,
    dungeon: &Dungeon,
    report: &GenerationReport,
) -> io::Result<()> {
    writeln!(
        out,
        "seed {seed}: {chunks} chunks, {edges} edges, {connectors} connectors",
        seed = report.seed,
        chunks = dungeon.chunk_count(),
        edges = dungeon.graph().edges().len(),
        connectors = dungeon.connectors().count(),
    )?;
    for chunk in dungeon.chunks() {
        let GridPoint { x, y, z, .. } = chunk.coord();
        let FreeVector {
            x: sx,
            y: sy,
            z: sz,
            ..
        } = chunk.size();
        let categories: Vec<&str> = chunk.categories().collect();
        writeln!(
            out,
            "({x}, {y}, {z})\t{sx}×{sy}×{sz}\t{}",
            categories.join(" ")
        )?;
    }
    for diagnostic in &report.diagnostics {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    seed: u64,
    stopped: bool,
    diagnostics: Vec<String>,
    chunks: Vec<JsonChunk<'a>>,
    edges: &'a [(GridPoint, GridPoint)],
    connectors: Vec<JsonConnector>,
}

#[derive(serde::Serialize)]
struct JsonChunk<'a> {
    coord: GridPoint,
    size: FreeVector,
    position: FreePoint,
    categories: Vec<&'a str>,
}

#[derive(serde::Serialize)]
struct JsonConnector {
    from: GridPoint,
    to: GridPoint,
    direction: Face6,
    size: FreeVector,
    center: FreePoint,
}

impl<'a> JsonReport<'a> {
    fn new(dungeon: &'a Dungeon, report: &GenerationReport) -> Self {
        Self {
            seed: report.seed,
            stopped: report.stopped,
            diagnostics: report.diagnostics.iter().map(ToString::to_string).collect(),
            chunks: dungeon
                .chunks()
                .map(|chunk| JsonChunk {
                    coord: chunk.coord(),
                    size: chunk.size(),
                    position: chunk.position(),
                    categories: chunk.categories().collect(),
                })
                .collect(),
            edges: dungeon.graph().edges(),
            connectors: dungeon
                .connectors()
                .map(|connector| JsonConnector {
                    from: connector.from(),
                    to: connector.to(),
                    direction: connector.direction(),
                    size: connector.size(),
                    center: connector.center(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungen::rules::{PathDirection, PathWalkerConfig};
    use dungen::{Pipeline, PipelineConfig};
    use pretty_assertions::assert_eq;

    fn run() -> (Pipeline, GenerationReport) {
        let mut pipeline = Pipeline::new(PipelineConfig {
            seed: 9,
            ..PipelineConfig::default()
        });
        pipeline.add_rule(dungen::rules::PathWalker::new(PathWalkerConfig {
            direction: PathDirection::Right,
            min_length: 1,
            max_length: 1,
            ..PathWalkerConfig::new("main")
        }));
        let report = pipeline.generate();
        (pipeline, report)
    }

    #[test]
    fn summary() {
        let (pipeline, report) = run();
        let mut out = Vec::new();
        write_report(&mut out, OutputFormat::Summary, pipeline.dungeon(), &report).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "seed 9: 2 chunks, 1 edges, 1 connectors\n\
            (0, 0, 0)\t5×1×5\tpath:main\n\
            (1, 0, 0)\t5×1×5\tpath:main\n"
        );
    }

    #[test]
    fn json() {
        let (pipeline, report) = run();
        let mut out = Vec::new();
        write_report(&mut out, OutputFormat::Json, pipeline.dungeon(), &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["seed"], 9);
        assert_eq!(value["chunks"][1]["coord"], serde_json::json!([1, 0, 0]));
        assert_eq!(value["chunks"][1]["position"], serde_json::json!([6.5, 0.0, 0.0]));
        assert_eq!(value["edges"], serde_json::json!([[[0, 0, 0], [1, 0, 0]]]));
        assert_eq!(value["connectors"][0]["direction"], "PX");
    }
}
