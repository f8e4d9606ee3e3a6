use clap::{value_parser, Arg, ArgAction, Command};
use docsmith_core::harness::{run_walkthrough, WalkthroughConfig};
use docsmith_model::DocumentType;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Command::new("docsmith")
        .version(docsmith_core::VERSION)
        .about("Docsmith staged document pipeline")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("walkthrough")
                .about("Run the full pipeline over scripted collaborators")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .default_value("Energy Report")
                        .help("Project name"),
                )
                .arg(
                    Arg::new("topic")
                        .long("topic")
                        .default_value("Renewable energy")
                        .help("Main topic seeding generation"),
                )
                .arg(
                    Arg::new("sections")
                        .long("sections")
                        .default_value("3")
                        .value_parser(value_parser!(usize))
                        .help("Outline length (1-20)"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("docx")
                        .help("Document type: docx or pptx"),
                )
                .arg(
                    Arg::new("manual")
                        .long("manual")
                        .action(ArgAction::SetTrue)
                        .help("Use the manual outline strategy"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the report as JSON"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("walkthrough", args)) => {
            let format = args.get_one::<String>("format").unwrap();
            let document_type = match DocumentType::from_str(format) {
                Ok(dt) => dt,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            };

            let config = WalkthroughConfig {
                name: args.get_one::<String>("name").unwrap().clone(),
                topic: args.get_one::<String>("topic").unwrap().clone(),
                document_type,
                section_count: *args.get_one::<usize>("sections").unwrap(),
                manual_outline: args.get_flag("manual"),
            };

            match run_walkthrough(config).await {
                Ok(report) => {
                    if args.get_flag("json") {
                        match serde_json::to_string_pretty(&report) {
                            Ok(json) => println!("{json}"),
                            Err(e) => {
                                eprintln!("failed to serialize report: {e}");
                                std::process::exit(1);
                            }
                        }
                    } else {
                        println!("{}", report.generate_text());
                    }
                }
                Err(e) => {
                    eprintln!("walkthrough failed: {e:#}");
                    std::process::exit(1);
                }
            }
        }
        _ => {}
    }
}
