//! `draco-geometry`: inspect Draco files and convert them to renderer geometry.

mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use draco_core::{decode_mesh, decode_point_cloud, peek_header, EncodedGeometryType, GeometryAttributeType, Mesh};
use draco_geometry::{convert_mesh, AttributeMap, DracoMeshCompression, GeometrySourceSemantic};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::report::{GeometryReport, InspectReport};

#[derive(Parser, Debug)]
#[command(name = "draco-geometry", version, about = "Draco mesh to renderer geometry converter")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header, counts, attributes and metadata of a Draco file.
    Inspect {
        file: PathBuf,

        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Decode a Draco mesh into geometry sources and an index element (JSON).
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    file: PathBuf,

    /// glTF semantic to Draco unique id, e.g. `POSITION=0`. Repeatable.
    #[arg(short, long = "attribute", value_name = "NAME=ID", value_parser = parse_attribute)]
    attributes: Vec<(String, u32)>,

    /// JSON file with a KHR_draco_mesh_compression object or a whole glTF primitive.
    #[arg(short, long, value_name = "FILE")]
    extension: Option<PathBuf>,

    /// Write the JSON summary here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long)]
    pretty: bool,
}

fn parse_attribute(s: &str) -> Result<(String, u32), String> {
    let (name, id) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=ID, got `{}`", s))?;
    if name.is_empty() {
        return Err(format!("missing attribute name in `{}`", s));
    }
    let id = id
        .parse::<u32>()
        .map_err(|err| format!("invalid unique id `{}`: {}", id, err))?;
    Ok((name.to_string(), id))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect { file, json } => inspect(&file, json),
        Command::Convert(args) => convert(&args),
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    info!(path = %path.display(), bytes = data.len(), "read input");
    Ok(data)
}

fn inspect(path: &Path, json: bool) -> Result<()> {
    let data = read_input(path)?;
    let header = peek_header(&data).with_context(|| format!("{} is not a Draco file", path.display()))?;

    let report = match header.encoder_type {
        EncodedGeometryType::TriangularMesh => {
            let mesh = decode_mesh(&data).context("Failed to decode Draco mesh")?;
            let num_faces = mesh.num_faces();
            InspectReport::new(&header, &mesh.into_point_cloud(), Some(num_faces))
        }
        EncodedGeometryType::PointCloud => {
            let point_cloud = decode_point_cloud(&data).context("Failed to decode Draco point cloud")?;
            InspectReport::new(&header, &point_cloud, None)
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn convert(args: &ConvertArgs) -> Result<()> {
    let data = read_input(&args.file)?;

    let mut attributes = match &args.extension {
        Some(path) => read_extension(path)?.attributes,
        None => AttributeMap::new(),
    };
    attributes.extend(args.attributes.iter().cloned());

    let mesh = decode_mesh(&data).with_context(|| format!("Failed to decode {}", args.file.display()))?;
    if attributes.is_empty() {
        attributes = default_attribute_map(&mesh);
    }
    debug!(?attributes, "attribute map");

    let geometry = convert_mesh(&mesh, &attributes)
        .with_context(|| format!("Failed to convert {}", args.file.display()))?;
    let report = GeometryReport::from(&geometry);
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote geometry");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn read_extension(path: &Path) -> Result<DracoMeshCompression> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))?;
    if value.get("extensions").is_some() {
        return DracoMeshCompression::from_primitive(&value)?
            .ok_or_else(|| anyhow!("{} has no KHR_draco_mesh_compression extension", path.display()));
    }
    if value.get("bufferView").is_none() {
        bail!("{} is neither a glTF primitive nor a KHR_draco_mesh_compression object", path.display());
    }
    Ok(DracoMeshCompression::from_value(value)?)
}

/// Maps the first attribute of every type with a geometry semantic.
fn default_attribute_map(mesh: &Mesh) -> AttributeMap {
    [
        (GeometryAttributeType::Position, GeometrySourceSemantic::Vertex),
        (GeometryAttributeType::Normal, GeometrySourceSemantic::Normal),
        (GeometryAttributeType::TexCoord, GeometrySourceSemantic::Texcoord),
        (GeometryAttributeType::Color, GeometrySourceSemantic::Color),
        (GeometryAttributeType::Joints, GeometrySourceSemantic::BoneIndices),
        (GeometryAttributeType::Weights, GeometrySourceSemantic::BoneWeights),
    ]
    .into_iter()
    .filter_map(|(att_type, semantic)| {
        mesh.named_attribute(att_type)
            .map(|att| (semantic.gltf_semantic().to_string(), att.unique_id()))
    })
    .collect()
}
