use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

use clap::{Arg, ArgAction, Command};
use rustyline::{DefaultEditor, Result as RustyResult};
use tokio::runtime::Runtime;
use tracing_subscriber::{EnvFilter, fmt};

use destatis::genesis::models::{FindResult, TableMetadata};
use destatis::genesis::{ChartOptions, ChartType, FileFormat, Language, MapOptions, Selection};
use destatis::{ChartSource, ColorHelper, ColorMode, DestatisClient, DestatisConfig, DestatisError};

const DEFAULT_LIMIT: u32 = 20;

static COLOR_HELPER: OnceLock<ColorHelper> = OnceLock::new();

fn styled(text: &str, style: fn(&ColorHelper, &str) -> colored::ColoredString) -> String {
    COLOR_HELPER
        .get()
        .map(|h| style(h, text).to_string())
        .unwrap_or_else(|| text.to_string())
}

fn heading(text: &str) -> String {
    styled(text, ColorHelper::heading)
}

fn code(text: &str) -> String {
    styled(text, ColorHelper::code)
}

fn success(text: &str) -> String {
    styled(text, ColorHelper::success)
}

fn error(text: &str) -> String {
    styled(text, ColorHelper::error)
}

fn warning(text: &str) -> String {
    styled(text, ColorHelper::warning)
}

fn muted(text: &str) -> String {
    styled(text, ColorHelper::muted)
}

fn emphasis(text: &str) -> String {
    styled(text, ColorHelper::emphasis)
}

/// REPL Commands
#[derive(Debug, Clone, PartialEq)]
enum ReplCommand {
    WhoAmI,
    Login,
    Find { term: String, limit: u32 },
    Tables { selector: String, limit: u32 },
    Statistics { selector: Option<String>, limit: u32 },
    Variables { selector: String, limit: u32 },
    Show { table: String },
    Download { table: String, format: FileFormat, selection: Selection },
    Chart { table: String, chart_type: ChartType, selection: Selection },
    Map { table: String, selection: Selection },
    SetDir { path: PathBuf },
    Info,
    Help,
    Quit,
}

/// Split off a trailing page length, e.g. `tables 12411* 50`
fn split_limit<'a>(args: &'a [&'a str]) -> Result<(&'a [&'a str], u32), String> {
    match args.split_last() {
        Some((last, rest)) if last.chars().all(|c| c.is_ascii_digit()) && !rest.is_empty() => {
            let limit = last
                .parse()
                .map_err(|_| format!("Invalid limit: {}", last))?;
            Ok((rest, limit))
        }
        _ => Ok((args, DEFAULT_LIMIT)),
    }
}

/// Take an explicit `--limit N` (or `-n N`) out of free text arguments
///
/// Search terms often contain years, so a bare trailing number stays part of the term.
fn take_limit_flag<'a>(args: &[&'a str]) -> Result<(Vec<&'a str>, u32), String> {
    let mut rest = Vec::with_capacity(args.len());
    let mut limit = DEFAULT_LIMIT;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if matches!(*arg, "--limit" | "-n") {
            let value = iter.next().ok_or("--limit needs a number")?;
            limit = value
                .parse()
                .map_err(|_| format!("Invalid limit: {}", value))?;
        } else {
            rest.push(*arg);
        }
    }
    Ok((rest, limit))
}

/// `2020` or `2015-2022`
fn parse_years(raw: &str) -> Result<Selection, String> {
    let parse = |year: &str| {
        year.trim()
            .parse::<i32>()
            .map_err(|_| format!("Invalid year range: {} (expected e.g. 2015-2022)", raw))
    };
    match raw.split_once('-') {
        Some((start, end)) => Ok(Selection::new().years(parse(start)?, parse(end)?)),
        None => {
            let year = parse(raw)?;
            Ok(Selection::new().years(year, year))
        }
    }
}

impl FromStr for ReplCommand {
    type Err = DestatisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReplCommand::parse(s).map_err(DestatisError::validation)
    }
}

impl ReplCommand {
    fn parse(s: &str) -> Result<Self, String> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let Some((head, args)) = parts.split_first() else {
            return Err("Empty command".to_string());
        };

        match head.to_lowercase().as_str() {
            "whoami" => Ok(ReplCommand::WhoAmI),
            "login" | "logincheck" => Ok(ReplCommand::Login),
            "find" | "search" | "f" => {
                let (terms, limit) = take_limit_flag(args)?;
                if terms.is_empty() {
                    return Err("Usage: find <term> [--limit N]".to_string());
                }
                Ok(ReplCommand::Find {
                    term: terms.join(" "),
                    limit,
                })
            }
            "tables" | "t" => match split_limit(args)? {
                ([selector], limit) => Ok(ReplCommand::Tables {
                    selector: selector.to_string(),
                    limit,
                }),
                _ => Err("Usage: tables <selector> [limit]".to_string()),
            },
            "statistics" | "stats" => match split_limit(args)? {
                ([], limit) => Ok(ReplCommand::Statistics {
                    selector: None,
                    limit,
                }),
                ([selector], limit) => Ok(ReplCommand::Statistics {
                    selector: Some(selector.to_string()),
                    limit,
                }),
                _ => Err("Usage: statistics [selector] [limit]".to_string()),
            },
            "variables" | "vars" => match split_limit(args)? {
                ([selector], limit) => Ok(ReplCommand::Variables {
                    selector: selector.to_string(),
                    limit,
                }),
                _ => Err("Usage: variables <selector> [limit]".to_string()),
            },
            "show" | "describe" | "d" => match args {
                [table] => Ok(ReplCommand::Show {
                    table: table.to_string(),
                }),
                _ => Err("Usage: show <table>".to_string()),
            },
            "download" | "dl" => {
                let usage = "Usage: download <table> [csv|ffcsv|xlsx] [years]";
                let (table, rest) = args.split_first().ok_or(usage)?;
                let mut format = FileFormat::default();
                let mut selection = Selection::new();
                for arg in rest {
                    if let Ok(parsed) = arg.parse::<FileFormat>() {
                        format = parsed;
                    } else {
                        selection = parse_years(arg)?;
                    }
                }
                Ok(ReplCommand::Download {
                    table: table.to_string(),
                    format,
                    selection,
                })
            }
            "chart" => {
                let usage = "Usage: chart <table> [line|bar|pie|scatter] [years]";
                let (table, rest) = args.split_first().ok_or(usage)?;
                let mut chart_type = ChartType::default();
                let mut selection = Selection::new();
                for arg in rest {
                    if let Ok(parsed) = arg.parse::<ChartType>() {
                        chart_type = parsed;
                    } else {
                        selection = parse_years(arg)?;
                    }
                }
                Ok(ReplCommand::Chart {
                    table: table.to_string(),
                    chart_type,
                    selection,
                })
            }
            "map" => match args {
                [table] => Ok(ReplCommand::Map {
                    table: table.to_string(),
                    selection: Selection::new(),
                }),
                [table, years] => Ok(ReplCommand::Map {
                    table: table.to_string(),
                    selection: parse_years(years)?,
                }),
                _ => Err("Usage: map <table> [years]".to_string()),
            },
            "setdir" | "cd" => match args {
                [path] => Ok(ReplCommand::SetDir {
                    path: PathBuf::from(path),
                }),
                _ => Err("Usage: setdir <path>".to_string()),
            },
            "info" | "status" => Ok(ReplCommand::Info),
            "help" | "h" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            _ => Err(format!("Unknown command: {}", head)),
        }
    }
}

/// REPL state and logic
struct DestatisRepl {
    client: DestatisClient,
    rt: Runtime,
}

impl DestatisRepl {
    fn new(client: DestatisClient) -> io::Result<Self> {
        let rt = Runtime::new()?;
        Ok(Self { client, rt })
    }

    fn run(&mut self) -> RustyResult<()> {
        println!("{}", heading("DESTATIS GENESIS Explorer"));
        println!("{}", muted("Type 'help' for available commands, 'quit' to exit"));
        if !self.client.config().is_authenticated() {
            println!(
                "{} No credentials configured; only 'whoami' will work. Set GENESIS_USERNAME and GENESIS_PASSWORD.",
                warning("Note:")
            );
        }
        println!();

        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline(&format!("{} ", success("genesis>"))) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }

                    rl.add_history_entry(trimmed)?;

                    match ReplCommand::from_str(trimmed) {
                        Ok(ReplCommand::Quit) => {
                            println!("Auf Wiedersehen!");
                            break;
                        }
                        Ok(command) => {
                            if let Err(e) = self.handle_command(command) {
                                println!("{} {}", error("Error:"), e);
                            }
                        }
                        Err(e) => println!("{} {}", error("Error:"), e),
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn handle_command(&mut self, command: ReplCommand) -> Result<(), DestatisError> {
        match command {
            ReplCommand::SetDir { path } => {
                let previous = self.client.download_dir().to_path_buf();
                self.client.set_download_dir(path.clone());
                if let Err(e) = self.rt.block_on(self.client.validate_download_dir()) {
                    self.client.set_download_dir(previous);
                    return Err(e);
                }
                println!(
                    "{} Download directory set to: {}",
                    success("Success!"),
                    code(&path.display().to_string())
                );
                Ok(())
            }
            ReplCommand::Help => {
                print_help(true);
                Ok(())
            }
            command => execute_command(&self.client, &self.rt, command),
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cli() -> Command {
    Command::new("destatis")
        .about("Interactive REPL and CLI for the GENESIS database of the German Federal Statistical Office")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("username")
                .long("username")
                .short('u')
                .value_name("USER")
                .help("GENESIS username (default: $GENESIS_USERNAME)"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .short('p')
                .value_name("PASSWORD")
                .help("GENESIS password (default: $GENESIS_PASSWORD)"),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .short('l')
                .value_name("LANG")
                .help("Language of the returned texts")
                .value_parser(["de", "en"]),
        )
        .arg(
            Arg::new("download-dir")
                .long("download-dir")
                .short('d')
                .value_name("DIR")
                .help("Directory downloads are saved to (default: ~/Downloads/destatis)"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .value_name("WHEN")
                .help("Control color output")
                .value_parser(["auto", "always", "never"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not show a spinner while waiting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("command")
                .help("Command to execute (if provided, runs in CLI mode instead of interactive REPL)")
                .value_name("COMMAND")
                .index(1),
        )
        .arg(
            Arg::new("args")
                .help("Arguments for the command")
                .value_name("ARGS")
                .num_args(0..)
                .index(2),
        )
        .after_help(
            "EXAMPLES:\n\
             Interactive REPL mode:\n\
             \x20 destatis\n\n\
             CLI mode:\n\
             \x20 destatis find Bevölkerung 2022 --limit 10\n\
             \x20 destatis tables 12411* 50\n\
             \x20 destatis show 12411-0001\n\
             \x20 destatis download 12411-0001 xlsx 2015-2022\n\
             \x20 destatis chart 12411-0001 bar 2020\n\n\
             ENVIRONMENT:\n\
             \x20 GENESIS_USERNAME, GENESIS_PASSWORD, GENESIS_LANGUAGE, GENESIS_BASE_URL,\n\
             \x20 GENESIS_USER_AGENT, GENESIS_DOWNLOAD_DIR, RUST_LOG",
        )
}

fn build_config(matches: &clap::ArgMatches) -> Result<DestatisConfig, DestatisError> {
    build_config_with(matches, |key| std::env::var(key).ok())
}

/// Command line arguments layered over the `GENESIS_*` variables from `lookup`
fn build_config_with<F>(matches: &clap::ArgMatches, lookup: F) -> Result<DestatisConfig, DestatisError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = DestatisConfig::from_lookup_with_credentials(
        lookup,
        matches.get_one::<String>("username").cloned(),
        matches.get_one::<String>("password").cloned(),
    )?;

    if let Some(language) = matches.get_one::<String>("language") {
        config = config.with_language(language.parse::<Language>().map_err(DestatisError::config)?);
    }

    if let Some(download_dir) = matches.get_one::<String>("download-dir") {
        config = config.with_download_dir(PathBuf::from(download_dir));
    }

    if let Some(color) = matches.get_one::<String>("color") {
        config = config.with_color_mode(color.parse::<ColorMode>().map_err(DestatisError::config)?);
    }

    if matches.get_flag("no-progress") {
        config = config.with_progress(false);
    }

    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let matches = cli().get_matches();
    let config = build_config(&matches)?;

    COLOR_HELPER
        .set(ColorHelper::new(config.color_mode))
        .map_err(|_| "Failed to set color helper")?;

    let client = DestatisClient::with_config(config)?;

    if let Some(command) = matches.get_one::<String>("command") {
        run_cli_mode(client, command, &matches)?;
    } else {
        let mut repl = DestatisRepl::new(client)?;
        repl.run()?;
    }

    Ok(())
}

/// Run a single command in CLI mode
fn run_cli_mode(
    client: DestatisClient,
    command: &str,
    matches: &clap::ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;

    let mut parts = vec![command];
    parts.extend(
        matches
            .get_many::<String>("args")
            .unwrap_or_default()
            .map(String::as_str),
    );

    let command = match ReplCommand::from_str(&parts.join(" ")) {
        Ok(ReplCommand::SetDir { .. }) => {
            eprintln!(
                "{} setdir is only available in the interactive REPL; use --download-dir",
                error("Error:")
            );
            std::process::exit(2);
        }
        Ok(ReplCommand::Quit) => return Ok(()),
        Ok(ReplCommand::Help) => {
            print_help(false);
            return Ok(());
        }
        Ok(command) => command,
        Err(e) => {
            eprintln!("{} {}", error("Error:"), e);
            eprintln!("Use --help to see available commands and examples");
            std::process::exit(2);
        }
    };

    if let Err(e) = execute_command(&client, &rt, command) {
        eprintln!("{} {}", error("Error:"), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Execute a command (shared between REPL and CLI modes)
fn execute_command(
    client: &DestatisClient,
    rt: &Runtime,
    command: ReplCommand,
) -> Result<(), DestatisError> {
    match command {
        ReplCommand::WhoAmI => {
            let who = rt.block_on(client.who_am_i())?;
            println!("{}: {}", emphasis("User agent"), who.user_agent);
            println!("{}: {}", emphasis("IP address"), who.user_ip);
        }

        ReplCommand::Login => {
            let check = rt.block_on(client.login_check())?;
            if check.is_successful() {
                println!("{} {} ({})", success("Logged in:"), check.username, muted(&check.status));
            } else {
                println!("{} {}", error("Login failed:"), check.status);
            }
        }

        ReplCommand::Find { term, limit } => {
            let result = rt.block_on(client.search(&term, destatis::genesis::Category::All, limit))?;
            print_find_result(&result);
        }

        ReplCommand::Tables { selector, limit } => {
            let tables = rt.block_on(client.list_tables(&selector, limit))?;
            println!("\n{} {} tables\n", success("Found"), tables.len());
            for table in &tables {
                println!("{:12} {} {}", code(&table.code), table.content, muted(&table.time));
            }
        }

        ReplCommand::Statistics { selector, limit } => {
            let statistics = rt.block_on(client.list_statistics(selector.as_deref(), limit))?;
            println!("\n{} {} statistics\n", success("Found"), statistics.len());
            for statistic in &statistics {
                println!(
                    "{:8} {} {}",
                    code(&statistic.code),
                    statistic.content,
                    muted(&format!("({} cubes)", statistic.cubes))
                );
            }
        }

        ReplCommand::Variables { selector, limit } => {
            let variables = rt.block_on(client.list_variables(&selector, limit))?;
            println!("\n{} {} variables\n", success("Found"), variables.len());
            for variable in &variables {
                println!(
                    "{:8} {} {}",
                    code(&variable.code),
                    variable.content,
                    muted(&format!("[{}, {} values]", variable.variable_type, variable.values))
                );
            }
        }

        ReplCommand::Show { table } => {
            let metadata = rt.block_on(client.table_info(&table))?;
            print_table_metadata(&metadata);
        }

        ReplCommand::Download { table, format, selection } => {
            let path = rt.block_on(client.download_table(&table, &selection, format))?;
            print_saved(&path);
        }

        ReplCommand::Chart { table, chart_type, selection } => {
            let chart = ChartOptions::new(chart_type);
            let path = rt.block_on(client.download_chart(&table, ChartSource::Table, &selection, &chart))?;
            print_saved(&path);
        }

        ReplCommand::Map { table, selection } => {
            let path = rt.block_on(client.download_map(
                &table,
                ChartSource::Table,
                &selection,
                &MapOptions::default(),
            ))?;
            print_saved(&path);
        }

        ReplCommand::Info => {
            let config = client.config();
            let genesis = &config.genesis_config;
            println!("\n{}", heading("Client Information"));
            println!("Endpoint: {}", code(&genesis.base_path));
            println!("Language: {}", genesis.language);
            println!(
                "Account: {}",
                genesis
                    .credentials
                    .as_ref()
                    .map(|c| c.username().to_string())
                    .unwrap_or_else(|| warning("none").to_string())
            );
            println!("Download directory: {}", code(&client.download_dir().display().to_string()));
        }

        ReplCommand::SetDir { .. } => {
            println!("{} setdir is only available in interactive REPL mode", error("Error:"));
        }

        ReplCommand::Help => print_help(false),

        ReplCommand::Quit => {}
    }

    Ok(())
}

fn print_saved(path: &std::path::Path) {
    println!("{} Saved to: {}", success("Success!"), code(&path.display().to_string()));
}

fn print_find_result(result: &FindResult) {
    if result.is_empty() {
        println!("{} Nothing found", warning("Note:"));
        return;
    }
    println!("\n{} {} objects\n", success("Found"), result.total());

    if !result.tables.is_empty() {
        println!("{}", heading("Tables"));
        for table in &result.tables {
            println!("  {:12} {} {}", code(&table.code), table.content, muted(&table.time));
        }
    }
    if !result.statistics.is_empty() {
        println!("{}", heading("Statistics"));
        for statistic in &result.statistics {
            println!("  {:12} {}", code(&statistic.code), statistic.content);
        }
    }
    if !result.cubes.is_empty() {
        println!("{}", heading("Cubes"));
        for cube in &result.cubes {
            println!("  {:12} {} {}", code(&cube.code), cube.content, muted(&cube.time));
        }
    }
    if !result.time_series.is_empty() {
        println!("{}", heading("Time series"));
        for series in &result.time_series {
            println!("  {:12} {}", code(&series.code), series.content);
        }
    }
    if !result.variables.is_empty() {
        println!("{}", heading("Variables"));
        for variable in &result.variables {
            println!("  {:12} {}", code(&variable.code), variable.content);
        }
    }
    println!();
}

fn print_table_metadata(table: &TableMetadata) {
    println!("\n{}", heading("Table"));
    println!("{}: {}", emphasis("Code"), code(&table.code));
    println!("{}: {}", emphasis("Content"), table.content);
    if let Some(updated) = table.updated {
        println!("{}: {}", emphasis("Updated"), updated.format("%d.%m.%Y %H:%M"));
    }
    if let Some(time) = &table.time {
        println!("{}: {}", emphasis("Time"), muted(&time.to_string()));
    }
    for (key, value) in &table.extra {
        if !value.is_null() {
            println!("{}: {}", emphasis(key), muted(&value.to_string()));
        }
    }
    println!(
        "\n{} Use 'download {}' to save the table as CSV",
        emphasis("Tip:"),
        table.code
    );
    println!();
}

fn print_help(repl: bool) {
    println!("\n{}", heading("Available Commands"));
    println!();

    let mut commands = vec![
        ("whoami", "Show how the web service sees this client", "whoami"),
        ("login", "Check the configured credentials", "login"),
        ("find <term> [--limit N]", "Full-text search; numbers stay part of the term", "find Bevölkerung 2022 -n 10"),
        ("tables <selector> [limit]", "List tables by code", "tables 12411*"),
        ("statistics [selector] [limit]", "List statistics", "statistics 124*"),
        ("variables <selector> [limit]", "List variables", "variables GES*"),
        ("show <table>", "Show table metadata", "show 12411-0001"),
        ("download <table> [format] [years]", "Save a table (csv, ffcsv, xlsx)", "download 12411-0001 xlsx 2015-2022"),
        ("chart <table> [type] [years]", "Save a chart as PNG (line, bar, pie, scatter)", "chart 12411-0001 bar"),
        ("map <table> [years]", "Save a map as PNG", "map 12411-0010 2022"),
        ("info", "Show session information", "info"),
    ];
    if repl {
        commands.push(("setdir <path>", "Set the download directory", "setdir ./downloads"));
        commands.push(("quit", "Exit the REPL", "quit"));
    }

    for (command, description, example) in commands {
        println!("{:36} {}", success(command), description);
        println!("{:36} {}: {}", "", muted("Example"), code(example));
    }
    println!();
    if !repl {
        println!("Run without arguments to start the interactive REPL: {}", code("destatis"));
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_commands() {
        assert_eq!(
            "tables 12411* 50".parse::<ReplCommand>().unwrap(),
            ReplCommand::Tables { selector: "12411*".to_string(), limit: 50 }
        );
        assert_eq!(
            "statistics".parse::<ReplCommand>().unwrap(),
            ReplCommand::Statistics { selector: None, limit: DEFAULT_LIMIT }
        );
        assert_eq!(
            "find Bevölkerung nach Geschlecht --limit 5".parse::<ReplCommand>().unwrap(),
            ReplCommand::Find { term: "Bevölkerung nach Geschlecht".to_string(), limit: 5 }
        );
        assert!("tables".parse::<ReplCommand>().is_err());
    }

    #[test]
    fn years_in_search_terms_are_kept() {
        assert_eq!(
            "find Bevölkerung 2023".parse::<ReplCommand>().unwrap(),
            ReplCommand::Find { term: "Bevölkerung 2023".to_string(), limit: DEFAULT_LIMIT }
        );
        assert_eq!(
            "find -n 7 Zensus 2022".parse::<ReplCommand>().unwrap(),
            ReplCommand::Find { term: "Zensus 2022".to_string(), limit: 7 }
        );
        assert!("find Zensus --limit".parse::<ReplCommand>().is_err());
        assert!("find --limit 5".parse::<ReplCommand>().is_err());
    }

    #[test]
    fn parse_errors_are_validation_errors() {
        let err = "frobnicate".parse::<ReplCommand>().unwrap_err();
        assert!(matches!(err, DestatisError::Validation { .. }));
        assert!(err.to_string().contains("Unknown command: frobnicate"));
    }

    #[test]
    fn command_line_password_combines_with_environment_username() {
        let matches = cli()
            .try_get_matches_from(["destatis", "--password", "0123456789", "whoami"])
            .unwrap();
        let config = build_config_with(&matches, |key| {
            (key == "GENESIS_USERNAME").then(|| "ABCDEFGHIJ".to_string())
        })
        .unwrap();

        let credentials = config.genesis_config.credentials.as_ref().unwrap();
        assert_eq!(credentials.username(), "ABCDEFGHIJ");

        let matches = cli()
            .try_get_matches_from(["destatis", "--username", "ABCDEFGHIJ"])
            .unwrap();
        let err = build_config_with(&matches, |_| None).unwrap_err();
        assert!(matches!(err, DestatisError::Config { .. }));
    }

    #[test]
    fn numeric_search_term_is_not_a_limit() {
        assert_eq!(
            "find 12411".parse::<ReplCommand>().unwrap(),
            ReplCommand::Find { term: "12411".to_string(), limit: DEFAULT_LIMIT }
        );
    }

    #[test]
    fn parses_downloads() {
        assert_eq!(
            "download 12411-0001 xlsx 2015-2022".parse::<ReplCommand>().unwrap(),
            ReplCommand::Download {
                table: "12411-0001".to_string(),
                format: FileFormat::Xlsx,
                selection: Selection::new().years(2015, 2022),
            }
        );
        assert_eq!(
            "chart 12411-0001 pie 2020".parse::<ReplCommand>().unwrap(),
            ReplCommand::Chart {
                table: "12411-0001".to_string(),
                chart_type: ChartType::PieChart,
                selection: Selection::new().years(2020, 2020),
            }
        );
        assert!("download 12411-0001 someday".parse::<ReplCommand>().is_err());
        assert!("download".parse::<ReplCommand>().is_err());
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!("q".parse::<ReplCommand>().unwrap(), ReplCommand::Quit);
        assert_eq!("whoami".parse::<ReplCommand>().unwrap(), ReplCommand::WhoAmI);
        assert_eq!(
            "setdir /tmp/data".parse::<ReplCommand>().unwrap(),
            ReplCommand::SetDir { path: PathBuf::from("/tmp/data") }
        );
        assert!("frobnicate".parse::<ReplCommand>().is_err());
        assert!("   ".parse::<ReplCommand>().is_err());
    }
}
