use clap::Parser;
use dashlist::api::{Activity, ConfigAction, DashApi, ListQuery};
use dashlist::commands::helpers::parse_fields;
use dashlist::error::{DashError, Result};
use dashlist::filter::FilterCriterion;
use dashlist::model::EntityKind;
use dashlist::sort::SortKey;
use dashlist::store::fs::FileStore;
use dashlist::view::ViewSpec;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
use args::{Cli, Commands};
use cli::print::{print_config, print_facets, print_full_records, print_messages, print_page};

const LOG_ENV: &str = "DASHLIST_LOG";
const DATA_ENV: &str = "DASHLIST_DATA";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut api = init_api(&cli)?;

    match cli.command {
        Commands::List {
            kind,
            search,
            filters,
            active,
            inactive,
            sort,
            page,
            page_size,
            json,
        } => {
            let activity = match (active, inactive) {
                (true, _) => Some(Activity::Active),
                (_, true) => Some(Activity::Inactive),
                _ => None,
            };
            let query = ListQuery {
                search,
                filters: filters
                    .iter()
                    .map(|f| f.parse::<FilterCriterion>())
                    .collect::<std::result::Result<Vec<_>, _>>()?,
                activity,
                sort: sort.as_deref().map(str::parse::<SortKey>).transpose()?,
                page,
                page_size,
            };
            handle_list(&api, kind, query, json)
        }
        Commands::View { kind, ids } => {
            let result = api.view(kind, &ids)?;
            print_full_records(&result.records);
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Create { kind, fields } => {
            let result = api.create(kind, parse_fields(&fields)?)?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Update { kind, id, patch } => {
            let result = api.update(kind, &id, parse_fields(&patch)?)?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Delete { kind, ids } => {
            let result = api.delete(kind, &ids)?;
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Upload { file } => {
            let result = api.upload(&file)?;
            for location in &result.locations {
                println!("{}", location);
            }
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Facets { kind, field } => {
            let result = api.facets(kind, &field)?;
            print_facets(&result.facets);
            print_messages(&result.messages);
            Ok(())
        }
        Commands::Config { key, value } => {
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(k), None) => ConfigAction::ShowKey(k),
                (Some(k), Some(v)) => ConfigAction::Set(k, v),
            };
            let result = api.config(action)?;
            if let Some(config) = &result.config {
                print_config(config);
            }
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn handle_list(
    api: &DashApi<FileStore>,
    kind: EntityKind,
    query: ListQuery,
    json: bool,
) -> Result<()> {
    let result = api.list(kind, query)?;
    let Some(page) = &result.page else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    print_page(page, &ViewSpec::for_kind(kind).columns);
    print_messages(&result.messages);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_api(cli: &Cli) -> Result<DashApi<FileStore>> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => match std::env::var_os(DATA_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => ProjectDirs::from("com", "dashlist", "dashlist")
                .ok_or_else(|| DashError::Store("Could not determine data dir".into()))?
                .data_dir()
                .to_path_buf(),
        },
    };
    tracing::debug!(data_dir = %data_dir.display(), "using data dir");
    Ok(DashApi::new(FileStore::new(data_dir.clone()), data_dir))
}
