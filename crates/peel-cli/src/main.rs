// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Dragonscale Team

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use peel::{
    Algorithm, CsrGraph, KCoreBsp, KCoreBspConfig, KCoreBz, KCoreBzConfig, KCoreMontresor,
    KCoreMontresorConfig,
};

#[derive(Parser, Debug)]
#[command(name = "peel")]
#[command(about = "k-core decomposition of undirected graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exact decomposition (Batagelj-Zaversnik bucket sort)
    Exact {
        /// Edge-list file: one "u v" pair per line, '#' lines skipped
        edges: PathBuf,
        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Only report vertices with coreness >= this value
        #[arg(long)]
        min_core: Option<u32>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Iterative local estimation (Montresor et al.), converges to exact
    Estimate {
        /// Edge-list file: one "u v" pair per line, '#' lines skipped
        edges: PathBuf,
        /// Stop after this many rounds; the partial result is an upper bound
        #[arg(long)]
        max_rounds: Option<usize>,
        /// Run on the vertex-centric bulk-synchronous engine (always runs
        /// to convergence, so it cannot be combined with --max-rounds)
        #[arg(long, conflicts_with = "max_rounds")]
        vertex_centric: bool,
        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum OutputFormat {
    /// One "vertex<TAB>core" line per vertex
    Text,
    /// One JSON object per line: {"nodeId": v, "coreNumber": c}
    Json,
}

fn load_edge_list(path: &Path) -> Result<CsrGraph> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading edge list {}", path.display()))?;

    let mut edges = Vec::new();
    let mut max_id = None::<u32>;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(u), Some(v)) = (fields.next(), fields.next()) else {
            bail!("{}:{}: expected \"u v\"", path.display(), lineno + 1);
        };
        let u: u32 = u
            .parse()
            .with_context(|| format!("{}:{}: bad vertex id {u:?}", path.display(), lineno + 1))?;
        let v: u32 = v
            .parse()
            .with_context(|| format!("{}:{}: bad vertex id {v:?}", path.display(), lineno + 1))?;
        max_id = Some(max_id.map_or(u.max(v), |m| m.max(u).max(v)));
        edges.push((u, v));
    }

    let n = max_id.map_or(0, |m| m as usize + 1);
    Ok(CsrGraph::from_undirected_edges(n, &edges)?)
}

fn write_cores(
    cores: &[u32],
    min_core: u32,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let mut sink: BufWriter<Box<dyn Write>> = match output {
        Some(path) => BufWriter::new(Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => BufWriter::new(Box::new(std::io::stdout().lock())),
    };

    for (v, &core) in cores.iter().enumerate() {
        if core < min_core {
            continue;
        }
        match format {
            OutputFormat::Text => writeln!(sink, "{v}\t{core}")?,
            OutputFormat::Json => {
                let row = serde_json::json!({ "nodeId": v, "coreNumber": core });
                writeln!(sink, "{row}")?;
            }
        }
    }
    sink.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Exact {
            edges,
            output,
            min_core,
            format,
        } => {
            let graph = load_edge_list(&edges)?;
            let started = Instant::now();
            let result = KCoreBz::run(&graph, KCoreBzConfig::default())?;
            tracing::info!(
                algorithm = KCoreBz::name(),
                vertices = result.stats.active_vertices,
                edges = result.stats.edge_count,
                max_degree = result.stats.max_degree,
                max_core = result.stats.max_core,
                avg_core = format!("{:.3}", result.stats.avg_core),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "decomposition finished"
            );
            write_cores(
                &result.core_numbers,
                min_core.unwrap_or(0),
                format,
                output.as_deref(),
            )?;
        }
        Commands::Estimate {
            edges,
            max_rounds,
            vertex_centric,
            output,
            format,
        } => {
            let graph = load_edge_list(&edges)?;
            let started = Instant::now();
            let result = if vertex_centric {
                KCoreBsp::run(&graph, KCoreBspConfig::default())?
            } else {
                KCoreMontresor::run(&graph, KCoreMontresorConfig { max_rounds })?
            };
            tracing::info!(
                algorithm = if vertex_centric {
                    KCoreBsp::name()
                } else {
                    KCoreMontresor::name()
                },
                rounds = result.rounds,
                converged = result.converged,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "estimation finished"
            );
            if !result.converged {
                tracing::warn!("round limit reached; reported values are upper bounds");
            }
            write_cores(&result.core_numbers, 0, format, output.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use peel::GraphView;

    fn edge_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_edge_list_skips_comments_and_blanks() {
        let file = edge_file("# triangle\n0 1\n\n1 2\n2 0\n");
        let graph = load_edge_list(file.path()).unwrap();
        assert_eq!(graph.size(), 3);
        assert_eq!(graph.neighbors(1), &[0, 2]);
    }

    #[test]
    fn test_load_edge_list_sizes_from_max_id() {
        let file = edge_file("0 5\n");
        let graph = load_edge_list(file.path()).unwrap();
        assert_eq!(graph.size(), 6);
        assert_eq!(graph.outdegree(3), 0);
    }

    #[test]
    fn test_load_edge_list_rejects_garbage() {
        let file = edge_file("0 one\n");
        let err = load_edge_list(file.path()).unwrap_err();
        assert!(err.to_string().contains(":1:"));
    }

    #[test]
    fn test_load_edge_list_rejects_lone_endpoint() {
        let file = edge_file("0 1\n2\n");
        assert!(load_edge_list(file.path()).is_err());
    }

    #[test]
    fn test_vertex_centric_rejects_round_limit() {
        let err = Cli::try_parse_from([
            "peel",
            "estimate",
            "graph.txt",
            "--vertex-centric",
            "--max-rounds",
            "3",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_write_cores_min_core_filters() {
        let path = tempfile::NamedTempFile::new().unwrap();
        write_cores(&[2, 1, 2, 0], 2, OutputFormat::Text, Some(path.path())).unwrap();
        let written = std::fs::read_to_string(path.path()).unwrap();
        assert_eq!(written, "0\t2\n2\t2\n");
    }

    #[test]
    fn test_write_cores_json_rows() {
        let path = tempfile::NamedTempFile::new().unwrap();
        write_cores(&[1], 0, OutputFormat::Json, Some(path.path())).unwrap();
        let written = std::fs::read_to_string(path.path()).unwrap();
        let row: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(row["nodeId"], 0);
        assert_eq!(row["coreNumber"], 1);
    }
}
