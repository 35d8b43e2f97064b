use std::path::PathBuf;
use std::process;

use bankimport::{ImportConfig, ImportError, ImportSet, OsFileStore, archive, parse_file, routing};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cli_import",
    version,
    about = "Раскладывает сырые выгрузки CAMT.053 и готовит выписки к импорту.",
    long_about = None,
)]
struct Args {
    /// Файл конфигурации (TOML, плоские ключи-строки)
    #[arg(long)]
    config: PathBuf,

    /// Номер леджера
    #[arg(long)]
    ledger: u32,

    /// Код банковского счёта главной книги
    #[arg(long)]
    account: String,

    /// Не раскладывать и не архивировать перед импортом
    #[arg(long)]
    skip_housekeeping: bool,

    /// Файлы выписок для импорта
    files: Vec<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), ImportError> {
    let args = Args::parse();

    let config = ImportConfig::load(&args.config)?;
    let store = OsFileStore;

    // сначала хозяйственные проходы, как и при каждом запуске импорта
    if !args.skip_housekeeping {
        routing::split_files_and_move(&store, &config)?;

        let working_dir = config.ledger_path(args.ledger)?;
        archive::archive_last_month(
            &store,
            working_dir,
            &config.bank_accounts,
            Local::now().date_naive(),
        )?;
    }

    let mut set = ImportSet::new();

    for file in &args.files {
        if !file.exists() {
            eprintln!("input file does not exist: {}", file.display());
            process::exit(1)
        }

        let statements = parse_file(file)?;

        let display_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        set.append(&statements, &args.account, &display_name, &config);
    }

    for stmt in &set.statements {
        println!("{stmt}");

        for row in set.rows_for(stmt.key) {
            println!("    {row}");
        }
    }

    Ok(())
}
