//! # Cardsmith CLI
//!
//! ```bash
//! # Start a template with the standard zones
//! cardsmith new --starter school.json
//!
//! # Render the back face to SVG
//! cardsmith render school.json --face back --out back.svg
//!
//! # Keep templates in the local store
//! cardsmith import school.json springfield
//! cardsmith list
//! ```

use cardsmith_app::{
    AppError, AppResult, FaceArg, OrientationArg, export_template, import_template, new_template,
    read_template, render_face, shortcut_table, write_template,
};
use cardsmith_core::FileStore;
use cardsmith_core::storage::TemplateStore;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cardsmith - ID card template designer
#[derive(Parser, Debug)]
#[command(name = "cardsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Template store directory (defaults to the user data directory)
    #[arg(long, global = true, value_name = "DIR")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new CR80 template file
    New {
        out: PathBuf,

        #[arg(long, value_enum, default_value_t = OrientationArg::Vertical)]
        orientation: OrientationArg,

        /// Populate both faces with the standard zones
        #[arg(long)]
        starter: bool,
    },
    /// Render one face of a template file to SVG
    Render {
        template: PathBuf,

        #[arg(long, value_enum, default_value_t = FaceArg::Front)]
        face: FaceArg,

        /// Output file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Hide bleed and safe-area guides
        #[arg(long)]
        no_guides: bool,
    },
    /// Copy a template file into the store
    Import { template: PathBuf, id: String },
    /// Write a stored template to a file
    Export { id: String, out: PathBuf },
    /// List stored templates
    List,
    /// Remove a stored template
    Delete { id: String },
    /// Print the keyboard shortcuts
    Shortcuts,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn open_store(dir: Option<PathBuf>) -> AppResult<FileStore> {
    Ok(match dir {
        Some(dir) => FileStore::new(dir)?,
        None => FileStore::default_location()?,
    })
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::New {
            out,
            orientation,
            starter,
        } => {
            let template = new_template(orientation.into(), starter);
            write_template(&out, &template)?;
            println!("Created {} ({} zones)", out.display(), template.zones.len());
        }
        Commands::Render {
            template,
            face,
            out,
            no_guides,
        } => {
            let svg = render_face(read_template(&template)?, face.into(), !no_guides)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, svg)?;
                    log::info!("Wrote {}", path.display());
                }
                None => print!("{}", svg),
            }
        }
        Commands::Import { template, id } => {
            let store = open_store(cli.store)?;
            pollster::block_on(import_template(&store, &template, &id))?;
        }
        Commands::Export { id, out } => {
            let store = open_store(cli.store)?;
            pollster::block_on(export_template(&store, &id, &out))?;
        }
        Commands::List => {
            let store = open_store(cli.store)?;
            for id in pollster::block_on(store.list())? {
                println!("{}", id);
            }
        }
        Commands::Delete { id } => {
            let store = open_store(cli.store)?;
            pollster::block_on(store.delete(&id))?;
            println!("Deleted '{}'", id);
        }
        Commands::Shortcuts => print!("{}", shortcut_table()),
    }
    Ok(())
}
