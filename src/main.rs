use clap::{Arg, Command};
use log::LevelFilter;
use phishhawk::api::{self, ApiState};
use phishhawk::{AnalysisResult, Config, EmailAnalyzer, UploadedFile};
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("phishhawk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic phishing analysis for raw emails and uploaded documents")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/phishhawk.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-email")
                .long("test-email")
                .value_name("FILE")
                .help("Analyze an email file (.pdf files are text-extracted first) and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the --test-email result as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with per-rule details")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("/etc/phishhawk.yaml");

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    // Initialize logger; --verbose wins over the configured level
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        config.logging.level_filter().unwrap_or(LevelFilter::Info)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if config_path_missing(config_path) {
        log::warn!("Configuration file '{config_path}' not found, using default configuration");
    }

    let analyzer = EmailAnalyzer::new();
    log::info!("Active rules: {}", analyzer.rule_names().join(", "));

    if let Some(email_file) = matches.get_one::<String>("test-email") {
        test_email_file(&analyzer, email_file, matches.get_flag("json"));
        return;
    }

    log::info!("Starting phishhawk v{}...", env!("CARGO_PKG_VERSION"));

    let state = ApiState::new(analyzer);
    if let Err(e) = api::run_api_server(&config.api, state).await {
        log::error!("API server error: {e}");
        process::exit(1);
    }
}

fn config_path_missing(path: &str) -> bool {
    !std::path::Path::new(path).exists()
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if config_path_missing(path) {
        Ok(Config::default())
    } else {
        Config::from_file(path)
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}

fn test_email_file(analyzer: &EmailAnalyzer, email_file: &str, as_json: bool) {
    let upload = match UploadedFile::from_path(email_file) {
        Ok(upload) => upload,
        Err(e) => {
            eprintln!("❌ Error reading email file: {}", e);
            process::exit(1);
        }
    };

    let result = analyzer.analyze_email(Some(&upload));

    if as_json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("❌ Error serializing result: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    print_report(email_file, &result);
}

fn print_report(email_file: &str, result: &AnalysisResult) {
    println!("🧪 Analyzing email file: {}", email_file);
    println!();
    println!("📧 Email Details:");
    println!("   Claimed Sender: {}", result.from_header);
    println!("   Email Origin:   {}", result.return_path_header);
    println!();

    if result.is_clean() {
        println!("✅ Verdict: Looks Safe");
        println!("   {}", result.analysis_summary);
    } else {
        println!("🚨 Verdict: SUSPICIOUS");
        for issue in result.analysis_summary.split(phishhawk::rules::ISSUE_SEPARATOR) {
            println!("     - {}", issue);
        }
    }
    println!();

    if result.found_urls.is_empty() {
        println!("🔗 Links Found in Email: None");
    } else {
        println!("🔗 Links Found in Email ({}):", result.found_urls.len());
        for url in &result.found_urls {
            println!("     • {}", url);
        }
    }
}
