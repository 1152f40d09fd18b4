use std::{fs::File, io, path::PathBuf};

use anyhow::{anyhow, Context};
use clap::{Args as ClapArgs, Parser, Subcommand};
use gbasis::{
    atom::Atom,
    basis::BasisTable,
    config::LibraryConfig,
    library::{parse_file, BasisLibrary},
    periodic_table,
};
use log::LevelFilter;
use nalgebra::Vector3;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level regardless of `RUST_LOG`
    #[arg(long, short)]
    verbose: bool,
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct LibrarySource {
    /// Directory holding one library file per basis set
    #[arg(long)]
    library_dir: Option<PathBuf>,
    /// JSON file with the library directory and exclusion lists
    #[arg(long)]
    config: Option<PathBuf>,
}

impl LibrarySource {
    fn open(self) -> anyhow::Result<BasisLibrary> {
        match (self.library_dir, self.config) {
            (Some(directory), _) => Ok(BasisLibrary::new(directory)),
            (None, Some(path)) => {
                let file = File::open(&path)
                    .with_context(|| format!("could not open config '{}'", path.display()))?;
                let config = LibraryConfig::from_reader(file)
                    .with_context(|| format!("invalid config '{}'", path.display()))?;
                Ok(config.into())
            }
            (None, None) => Err(anyhow!("either --library-dir or --config is required")),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a single library file and print its table as JSON
    Parse {
        file: PathBuf,
    },
    /// Summarize the shells of every element of a basis set
    Show {
        name: String,
        #[command(flatten)]
        source: LibrarySource,
    },
    /// Print the normalized contracted gaussians of one element as JSON
    Contract {
        name: String,
        /// Element symbol, e.g. `C`
        #[arg(long, short)]
        element: String,
        /// Position of the atom in bohr
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
        origin: Option<Vec<f64>>,
        #[command(flatten)]
        source: LibrarySource,
    },
}

fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();

    if args.verbose {
        pretty_env_logger::formatted_builder()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        pretty_env_logger::init();
    }

    match args.command {
        Command::Parse { file } => {
            let table = parse_file(&file)?;
            serde_json::to_writer_pretty(io::stdout().lock(), &table)?;
            println!();
        }
        Command::Show { name, source } => {
            let table = source.open()?.load(&name)?;
            print_summary(&name, &table);
        }
        Command::Contract {
            name,
            element,
            origin,
            source,
        } => {
            let table = source.open()?.load(&name)?;

            let origin = match origin.as_deref() {
                Some(&[x, y, z]) => Vector3::new(x, y, z),
                _ => Vector3::zeros(),
            };
            let atom = Atom::from_symbol(&element, origin)
                .ok_or_else(|| anyhow!("unknown element symbol '{element}'"))?;

            let functions = table
                .basis_for(&atom)?
                .ok_or_else(|| anyhow!("basis set '{name}' has no entry for {element}"))?;

            log::debug!("{element} expands into {} functions", functions.len());
            serde_json::to_writer_pretty(io::stdout().lock(), &functions)?;
            println!();
        }
    }

    Ok(())
}

fn print_summary(name: &str, table: &BasisTable) {
    println!("{name}: {} elements", table.len());

    for (atomic_number, shells) in table.iter() {
        let symbol = periodic_table::symbol(atomic_number).unwrap_or("?");
        let shell_types = shells
            .iter()
            .map(|shell| format!("{}({})", shell.shell_type, shell.primitives.len()))
            .collect::<Vec<_>>()
            .join(" ");

        println!("{atomic_number:>4} {symbol:<3} {shell_types}");
    }
}
