use anyhow::Context;
use clap::Parser;
use finbook::application::confirm::confirm_clear;
use finbook::application::init::init;
use finbook::application::{
    write_export, AssumeYes, Confirm, ConfigService, ImportOutcome, LedgerService,
    NonInteractive, StdinConfirm, SubmitOutcome,
};
use finbook::cli::{
    format_categories, format_count, format_totals, format_transaction_list, Cli, Commands,
    FilterArgs,
};
use finbook::domain::{FilterState, ImportMode, Kind, KindFilter};
use finbook::error::FinbookError;
use finbook::infrastructure::{Config, FileStore, FileSystemRepository, LedgerRepository};
use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = match std::env::var("FINBOOK_LOG") {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid FINBOOK_LOG filter '{}'", directives))?,
        Err(_) => EnvFilter::new(if verbose { "finbook=debug" } else { "error" }),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))
}

/// Discovered ledger with its config and loaded transactions
struct Session {
    config: Config,
    service: LedgerService<FileStore>,
}

fn open_session() -> Result<Session, FinbookError> {
    let repo = FileSystemRepository::discover()?;
    let config = repo.load_config()?;
    let service = LedgerService::load(repo.store());
    Ok(Session {
        config,
        service,
    })
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else if std::io::stdin().is_terminal() {
        Box::new(StdinConfirm)
    } else {
        Box::new(NonInteractive)
    }
}

fn parse_kind(value: &str) -> Result<Kind, FinbookError> {
    Kind::from_str(&value.trim().to_lowercase()).map_err(FinbookError::Validation)
}

fn build_filter(args: &FilterArgs, session: &Session) -> Result<FilterState, FinbookError> {
    let mut filter = FilterState::default();
    if let Some(month) = &args.month {
        filter.set_month(month)?;
    }
    filter.kind = KindFilter::from_str(&args.kind).map_err(FinbookError::Validation)?;
    filter.category = args.category.as_str().into();

    let requested = filter.category.clone();
    filter.reconcile(session.service.categories());
    if filter.category != requested {
        eprintln!(
            "Note: no transactions in category '{}', showing all categories",
            requested
        );
    }
    Ok(filter)
}

fn run(cli: Cli) -> Result<(), FinbookError> {
    match cli.command {
        Some(Commands::Init { path, currency }) => {
            let config = init(&path, &currency)?;
            println!(
                "Initialized finbook ledger in {} (currency {})",
                path.display(),
                config.currency
            );
            Ok(())
        }
        Some(Commands::Add {
            description,
            amount,
            kind,
            category,
            date,
        }) => {
            let mut session = open_session()?;
            let kind = parse_kind(&kind)?;

            // Fill the form; the date stays at today unless given
            let form = session.service.form_mut();
            form.description = description;
            form.amount = amount;
            form.kind = kind;
            form.category = category;
            if let Some(date) = date {
                form.date = date;
            }

            // Validate and append
            if let SubmitOutcome::Added(tx) = session.service.submit()? {
                println!("Added transaction {}", tx.id);
            }
            Ok(())
        }
        Some(Commands::Edit {
            id,
            description,
            amount,
            kind,
            category,
            date,
        }) => {
            if description.is_none()
                && amount.is_none()
                && kind.is_none()
                && category.is_none()
                && date.is_none()
            {
                return Err(FinbookError::Validation(
                    "Nothing to change: pass --desc, --amount, --type, --category or --date"
                        .to_string(),
                ));
            }

            let mut session = open_session()?;
            let kind = kind.as_deref().map(parse_kind).transpose()?;

            // Load the record into the form, then override the given fields
            session.service.begin_edit(&id)?;
            let form = session.service.form_mut();
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(kind) = kind {
                form.kind = kind;
            }
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(date) = date {
                form.date = date;
            }

            if let SubmitOutcome::Updated(tx) = session.service.submit()? {
                println!("Saved transaction {}", tx.id);
            }
            Ok(())
        }
        Some(Commands::Remove { id }) => {
            let mut session = open_session()?;
            if session.service.remove(&id)? {
                println!("Removed transaction {}", id);
            } else {
                println!("No transaction with id {}; nothing removed", id);
            }
            Ok(())
        }
        Some(Commands::List { filters, limit }) => {
            let session = open_session()?;
            let filter = build_filter(&filters, &session)?;

            // Filtered rows, newest first
            let view = session.service.view(&filter);
            println!(
                "{}",
                format_transaction_list(&view, &session.config.currency, limit)
            );
            Ok(())
        }
        Some(Commands::Totals { filters }) => {
            let session = open_session()?;
            let filter = build_filter(&filters, &session)?;
            let view = session.service.view(&filter);
            println!("{}", format_totals(&view.totals, &session.config.currency));
            println!("{}", format_count(view.count()));
            Ok(())
        }
        Some(Commands::Categories) => {
            let session = open_session()?;
            print!("{}", format_categories(session.service.categories()));
            Ok(())
        }
        Some(Commands::Export { dir }) => {
            let session = open_session()?;
            // Default to the current directory
            let dir = match dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let document = session.service.export_document();
            let written = write_export(&document, &dir, &session.config.export_name)?;
            for path in written {
                println!("Exported {}", path.display());
            }
            Ok(())
        }
        Some(Commands::Import { file, mode, yes }) => {
            // Parse mode string to enum
            let requested = mode
                .as_deref()
                .map(ImportMode::from_str)
                .transpose()
                .map_err(FinbookError::Validation)?;
            let text = std::fs::read_to_string(&file)?;

            // Nothing changes until the mode is settled

            let mut session = open_session()?;
            let mut confirm = confirmer(yes);
            match session
                .service
                .import_text(&text, requested, confirm.as_mut())?
            {
                ImportOutcome::Imported { count, mode } => {
                    println!("Imported {} ({})", format_count(count), mode);
                    Ok(())
                }
                ImportOutcome::Declined if !confirm.can_prompt() => {
                    Err(FinbookError::ConfirmationRequired(
                        "import needs --mode merge, or --yes to confirm".to_string(),
                    ))
                }
                ImportOutcome::Declined => {
                    println!("Import cancelled");
                    Ok(())
                }
            }
        }
        Some(Commands::Clear { yes }) => {
            let mut session = open_session()?;
            let mut confirm = confirmer(yes);
            if confirm_clear(confirm.as_mut()) {
                session.service.clear()?;
                println!("Cleared all transactions");
                Ok(())
            } else if !confirm.can_prompt() {
                Err(FinbookError::ConfirmationRequired(
                    "clear deletes every transaction; pass --yes to confirm".to_string(),
                ))
            } else {
                println!("Clear cancelled");
                Ok(())
            }
        }
        Some(Commands::Config { key, value, list }) => {
            // Discover repository
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                // List all config
                let config = service.list()?;
                println!("currency = {}", config.currency);
                println!("export_name = {}", config.export_name);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    // Set config value
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                // No key provided, show usage
                println!("Usage: finbook config [--list | <key> [<value>]]");
                println!("Valid keys: currency, export_name, created");
                Ok(())
            }
        }
        None => {
            // No command, show help
            println!("finbook - Personal finance ledger");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
