//! tagfield - a terminal tag input with autocomplete.
//!
//! Prints the submitted tags on stdout. Exits with status 1 on error and
//! prints nothing if the user quits without submitting. With
//! `--write-config` it saves the effective settings and exits instead.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use tagfield::app::App;
use tagfield::cli::{self, Cli};
use tagfield::error::Result;
use tagfield::events::EventHandler;
use tagfield::logging;
use tagfield::tui;
use tagfield::ui::{SuggestionList, TagField, TagFieldParts, TextInput};

/// Placeholder shown in an empty input.
const PLACEHOLDER: &str = "e.g. rust, cli, parsing";

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let result = run(&cli);
    logging::shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "tagfield failed");
            eprintln!("Error: {}", e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("{}", action);
            }
            if let Some(dir) = logging::log_directory() {
                eprintln!("Logs: {}", dir.display());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = cli.load_config()?;
    cli.apply_overrides(&mut config.settings);
    config.validate()?;

    if cli.write_config {
        let path = cli.save_config(&config)?;
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    let settings = config.settings;

    // Read inputs before taking over the terminal so errors print normally.
    let vocabulary = cli.vocabulary_payload()?;
    let chips = cli.popular_chips(settings.popular_limit)?;

    let mut input = TextInput::with_value(cli.value.as_str());
    input.set_placeholder(PLACEHOLDER);

    let field = TagField::mount(
        TagFieldParts {
            input: Some(input),
            suggestions: Some(SuggestionList::new()),
            vocabulary: Some(vocabulary),
            chips,
        },
        &settings,
    );

    let events = EventHandler::with_tick_rate(settings.tick_rate());
    let app = tui::run(App::new(field, &settings), &events)?;

    match app.into_submitted() {
        Some(tags) => {
            println!("{}", cli::format_output(&tags, cli.json)?);
        }
        None => info!("Exited without submitting"),
    }
    Ok(())
}

