use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use larder_cli::{init_tracing, run_book, text_report, RecipeBook, RunOptions};
use larder_collection::RecipeCollection;
use larder_recipe::{IdentityAllocator, RecipeFactory, RecipePatch};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("larder")
        .version(larder_cli::VERSION)
        .about("Build recipe trees concurrently into a shared collection")
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .help("Default log filter when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("run")
                .about("Build every recipe in the book on its own thread and print the collection")
                .arg(
                    Arg::new("book")
                        .long("book")
                        .value_parser(value_parser!(PathBuf))
                        .help("Recipe book (TOML); defaults to the built-in book"),
                )
                .arg(
                    Arg::new("variants")
                        .long("variants")
                        .value_parser(value_parser!(usize))
                        .help("Also generate this many variants of the first recipe"),
                )
                .arg(
                    Arg::new("variant-name")
                        .long("variant-name")
                        .requires("variants")
                        .help("Name given to the variant base and its clones"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the collection snapshot as JSON"),
                ),
        )
        .subcommand(Command::new("sample-book").about("Print the built-in recipe book as TOML"))
}

fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let book = match args.get_one::<PathBuf>("book") {
        Some(path) => RecipeBook::load(path)
            .with_context(|| format!("loading recipe book {}", path.display()))?,
        None => RecipeBook::builtin(),
    };

    let mut options = RunOptions {
        variants: args.get_one::<usize>("variants").copied(),
        variant_overrides: RecipePatch::new(),
    };
    if let Some(name) = args.get_one::<String>("variant-name") {
        options.variant_overrides = options.variant_overrides.with_name(name);
    }

    let factory = Arc::new(RecipeFactory::new(Arc::new(IdentityAllocator::new())));
    let collection = Arc::new(RecipeCollection::new());

    let summary = run_book(&book, &factory, &collection, &options)?;
    tracing::info!(
        produced = summary.produced.len(),
        variants = summary.variants.len(),
        "all producers finished"
    );

    if args.get_flag("json") {
        let snapshot = collection.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", text_report(&collection.snapshot_and_render()));
    }
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map_or("info", String::as_str);
    init_tracing(level, matches.get_flag("log-json"));

    let result = match matches.subcommand() {
        Some(("sample-book", _)) => RecipeBook::builtin()
            .to_toml()
            .map(|text| print!("{text}"))
            .map_err(anyhow::Error::from),
        Some(("run", args)) => run(args),
        _ => {
            let _ = cli().print_help();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn run_args_parse() {
        let matches = cli()
            .try_get_matches_from(["larder", "run", "--variants", "3", "--variant-name", "Twin"])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "run");
        assert_eq!(args.get_one::<usize>("variants"), Some(&3));
        assert_eq!(args.get_one::<String>("variant-name").map(String::as_str), Some("Twin"));
    }

    #[test]
    fn variant_name_requires_variants() {
        assert!(cli()
            .try_get_matches_from(["larder", "run", "--variant-name", "Twin"])
            .is_err());
    }
}
