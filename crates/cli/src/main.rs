use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::{Path, PathBuf};
use twin_core::orbit::compute_orbit;
use twin_core::{CoreConfig, CoreResult};
use twin_files::{display_name_from_stored, IncomingModel, ModelStore};

#[derive(Parser)]
#[command(name = "twin")]
#[command(about = "Digital twin model store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage stored 3D models
    Models {
        #[command(subcommand)]
        command: ModelCommands,
    },
    /// Print a synthetic satellite position
    Orbit {
        /// Orbit angle in radians
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        angle: f64,
        /// Altitude in metres (default: 400000)
        #[arg(long)]
        altitude: Option<f64>,
    },
}

#[derive(Subcommand)]
enum ModelCommands {
    /// List stored models
    List {
        /// Upload folder (default: UPLOAD_FOLDER, then the built-in folder)
        #[arg(long)]
        folder: Option<PathBuf>,
    },
    /// Store local model files
    Add {
        /// Files to store
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        folder: Option<PathBuf>,
    },
    /// Download model files and store them
    Fetch {
        /// URLs to download
        urls: Vec<String>,
        /// File with one URL per line
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        folder: Option<PathBuf>,
    },
    /// Print the display name for a stored name
    DisplayName {
        /// Stored name, e.g. arm__d41d8cd98f00b204e9800998ecf8427e.gltf
        stored_name: String,
    },
}

fn store_for(folder: Option<PathBuf>) -> CoreResult<ModelStore> {
    store_from_lookup(folder, |name| std::env::var(name).ok())
}

/// `--folder` wins over `UPLOAD_FOLDER`, which wins over the built-in folder.
fn store_from_lookup<F>(folder: Option<PathBuf>, lookup: F) -> CoreResult<ModelStore>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = CoreConfig::from_lookup(lookup)?;
    if let Some(folder) = folder {
        config = config.with_upload_folder(folder);
    }
    Ok(ModelStore::new(config.storage_config()))
}

/// Last path segment of a URL, used as the claimed filename of a download.
fn filename_from_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let last = parsed.path_segments()?.last()?;
    (!last.is_empty()).then(|| last.to_owned())
}

/// Non-empty trimmed lines of a URL list.
fn read_url_list(path: &Path) -> std::io::Result<Vec<String>> {
    Ok(std::fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

fn fetch_one(store: &ModelStore, url: &str) -> Result<String, Box<dyn std::error::Error>> {
    let filename =
        filename_from_url(url).ok_or_else(|| format!("URL does not contain a filename: {url}"))?;
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let stored = store.ingest(Some(IncomingModel::new(filename, response)))?;
    Ok(stored.stored_name().to_owned())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Models { command }) => match command {
            ModelCommands::List { folder } => {
                let entries = store_for(folder)?.list()?;
                if entries.is_empty() {
                    println!("No model files uploaded yet.");
                } else {
                    for entry in entries {
                        println!(
                            "{} (id: {}, {} bytes)",
                            entry.display_name, entry.stored_name, entry.size_bytes
                        );
                    }
                }
            }
            ModelCommands::Add { files, folder } => {
                let store = store_for(folder)?;
                for path in files {
                    let claimed = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let result = File::open(&path)
                        .map_err(twin_files::FilesError::from)
                        .and_then(|file| store.ingest(Some(IncomingModel::new(claimed, file))));
                    match result {
                        Ok(stored) => println!("{} -> {}", path.display(), stored.stored_name()),
                        Err(e) => eprintln!("Error storing {}: {}", path.display(), e),
                    }
                }
            }
            ModelCommands::Fetch { urls, file, folder } => {
                let mut all = match file {
                    Some(list) => read_url_list(&list)?,
                    None => Vec::new(),
                };
                all.extend(urls);
                if all.is_empty() {
                    println!("No URLs provided");
                    return Ok(());
                }

                let store = store_for(folder)?;
                for url in all {
                    match fetch_one(&store, &url) {
                        Ok(stored) => println!("{url} -> {stored}"),
                        Err(e) => eprintln!("Failed to download {url}: {e}"),
                    }
                }
            }
            ModelCommands::DisplayName { stored_name } => {
                println!("{}", display_name_from_stored(&stored_name));
            }
        },
        Some(Commands::Orbit { angle, altitude }) => {
            let pos = compute_orbit(angle, altitude);
            println!(
                "lon: {:.6}, lat: {:.6}, altitude: {}",
                pos.lon, pos.lat, pos.altitude
            );
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
