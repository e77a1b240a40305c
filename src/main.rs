use anyhow::Context;
use clap::{Parser, Subcommand};
use lightforge::presets::{
    ReflectorMaterial, RenderQuality, CUSTOM_REFLECTOR_SURFACE, RESOLUTION_PRESETS,
    RIG_COLLECTION, THREE_POINT_RIG,
};
use lightforge::{Catalog, CatalogKind, CatalogStore, Config, FsHost};
use std::path::PathBuf;

/// Studio lighting asset catalogs
#[derive(Debug, Parser)]
#[command(name = "lightforge", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the asset root from the config
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Regenerate the five default gobo textures
    Synth,
    /// Scan asset directories and list their catalogs
    Scan {
        /// Only this collection
        #[arg(long, value_enum)]
        kind: Option<CatalogKind>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the texture file behind a gobo id
    Resolve { id: String },
    /// Report which asset directories exist and what they hold
    Info {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print reflector, render quality, resolution and light rig presets
    Presets {
        /// Only this quality level
        #[arg(long, value_enum)]
        quality: Option<RenderQuality>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(root) = &cli.root {
        config.asset_root = root.clone();
    }
    Ok(config)
}

fn print_catalog(catalog: &Catalog) {
    println!(
        "{} ({} entries, {:?}, built {})",
        catalog.kind(),
        catalog.len(),
        catalog.source(),
        catalog.built_at().format("%Y-%m-%d %H:%M:%S")
    );
    for entry in catalog.entries() {
        println!("  {:>3}  {:<24} {}", entry.sort_index, entry.id, entry.description);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let layout = config.layout();
    let mut host = FsHost::new(&config.thumbnail_cache_dir, config.thumbnail_size);

    match cli.command {
        Command::Synth => {
            let count = lightforge::synthesize_defaults(&mut host, &layout)?;
            println!("✅ Wrote {} default textures to {}", count, layout.root().display());
        }
        Command::Scan { kind, json } => {
            let mut store = CatalogStore::new();
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => CatalogKind::ALL.to_vec(),
            };
            for kind in &kinds {
                store.refresh(&mut host, &layout, *kind)?;
            }

            let catalogs: Vec<_> = kinds.iter().map(|kind| store.catalog(*kind)).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&catalogs)?);
            } else {
                for catalog in &catalogs {
                    print_catalog(catalog);
                }
            }
        }
        Command::Resolve { id } => match layout.resolve_gobo_texture(&id) {
            Some(path) => println!("{}", path.display()),
            None => anyhow::bail!(
                "no texture for gobo '{}' under {}",
                id,
                layout.gobo_textures_dir().display()
            ),
        },
        Command::Info { json } => {
            let report = lightforge::inventory(&host, &layout)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{report}");
            }
        }
        Command::Presets { quality } => {
            let qualities = match quality {
                Some(quality) => vec![quality],
                None => RenderQuality::ALL.to_vec(),
            };
            let reflectors: Vec<_> = ReflectorMaterial::ALL
                .iter()
                .map(|material| (material.material_name(), material.surface()))
                .collect();
            let render: Vec<_> = qualities
                .iter()
                .map(|quality| (quality, quality.settings()))
                .collect();

            let presets = serde_json::json!({
                "reflectors": reflectors,
                "custom_reflector": CUSTOM_REFLECTOR_SURFACE,
                "render_quality": render,
                "resolutions": RESOLUTION_PRESETS,
                "light_rig": {
                    "collection": RIG_COLLECTION,
                    "lights": THREE_POINT_RIG,
                },
            });
            println!("{}", serde_json::to_string_pretty(&presets)?);
        }
    }

    Ok(())
}
