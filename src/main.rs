//! expense-settlement CLI
//!
//! Compute balances and settlement transfers for a group from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Settle a group described in a JSON file
//! expense-settlement settle --input group.json
//!
//! # Output as JSON
//! expense-settlement settle --input group.json --format json
//!
//! # Settle a group kept in a store file
//! expense-settlement settle --store groups.json --group 3f1c8f5e-2b7a-4c55-9d0e-8a6b1f2c3d4e
//!
//! # Show balances only
//! expense-settlement balances --input group.json
//!
//! # Generate a random group for testing
//! expense-settlement generate --members 5 --expenses 20
//! ```
//!
//! Set `RUST_LOG=debug` to see what the engine skips and emits.

use expense_settlement::config::SettlementConfig;
use expense_settlement::core::expense::ExpenseLog;
use expense_settlement::core::participant::ParticipantName;
use expense_settlement::settlement::calculator::SettlementCalculator;
use expense_settlement::simulation::random_group::{generate_random_group, RandomGroupConfig};
use expense_settlement::store::{GroupStore, JsonFileStore};
use std::fs;
use std::process;
use uuid::Uuid;

fn print_usage() {
    eprintln!(
        r#"expense-settlement — shared expense balances and settlement

USAGE:
    expense-settlement <COMMAND> [OPTIONS]

COMMANDS:
    settle      Compute balances and the transfers that settle them
    balances    Compute balances only
    generate    Generate a random group (for testing)
    help        Show this message

OPTIONS (settle, balances):
    --input <FILE>      Path to a JSON group file
    --store <FILE>      Path to a JSON group store (use with --group)
    --group <ID>        Id of the group inside the store
    --format <FORMAT>   Output format: text (default) or json
    --config <FILE>     JSON settlement config
    --symbol <SYMBOL>   Currency symbol printed before amounts

OPTIONS (generate):
    --members <N>       Number of members (default: 5)
    --expenses <N>      Number of expenses (default: 20)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    expense-settlement settle --input group.json
    expense-settlement settle --input group.json --symbol '₹' --format json
    expense-settlement balances --store groups.json --group <ID>
    expense-settlement generate --members 8 --expenses 40 --output group.json"#
    );
}

/// JSON schema for an input group.
#[derive(serde::Deserialize)]
struct GroupInput {
    #[serde(default)]
    name: String,
    members: Vec<ParticipantName>,
    #[serde(default)]
    expenses: ExpenseLog,
}

/// JSON output schema for balances.
#[derive(serde::Serialize)]
struct BalanceOutput {
    participant: String,
    paid: String,
    balance: String,
    status: String,
}

/// JSON output schema for a settlement.
#[derive(serde::Serialize)]
struct SettlementOutput {
    group: String,
    total: String,
    fair_share: String,
    unattributed: String,
    balances: Vec<BalanceOutput>,
    settlements: Vec<InstructionOutput>,
}

#[derive(serde::Serialize)]
struct InstructionOutput {
    from: String,
    to: String,
    amount: String,
    line: String,
}

struct Options {
    input: Option<String>,
    store: Option<String>,
    group: Option<String>,
    format: String,
    config: SettlementConfig,
}

fn take_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires {}", flag, what);
        process::exit(1);
    })
}

fn parse_options(args: &[String]) -> Options {
    let mut input = None;
    let mut store = None;
    let mut group = None;
    let mut format = "text".to_string();
    let mut config_path = None;
    let mut symbol = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input = Some(take_value(args, i, "--input", "a file path"));
            }
            "--store" => {
                i += 1;
                store = Some(take_value(args, i, "--store", "a file path"));
            }
            "--group" => {
                i += 1;
                group = Some(take_value(args, i, "--group", "a group id"));
            }
            "--format" => {
                i += 1;
                format = take_value(args, i, "--format", "'text' or 'json'");
            }
            "--config" => {
                i += 1;
                config_path = Some(take_value(args, i, "--config", "a file path"));
            }
            "--symbol" => {
                i += 1;
                symbol = Some(take_value(args, i, "--symbol", "a currency symbol"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => SettlementConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => SettlementConfig::default(),
    };
    if let Some(symbol) = symbol {
        config = config.with_currency_symbol(symbol);
    }
    if format != "text" && format != "json" {
        eprintln!("--format requires 'text' or 'json', got '{}'", format);
        process::exit(1);
    }

    Options {
        input,
        store,
        group,
        format,
        config,
    }
}

/// Resolve the group to work on: (name, members, expenses).
fn load_group(opts: &Options) -> (String, Vec<ParticipantName>, ExpenseLog) {
    if let Some(path) = &opts.input {
        let content = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        });
        let group: GroupInput = serde_json::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Error parsing JSON: {}", e);
            eprintln!("Expected format:");
            eprintln!(
                r#"{{
  "name": "Trip",
  "members": ["A", "B"],
  "expenses": [
    {{ "id": "1", "paidBy": "A", "amount": "100", "description": "Hotel" }}
  ]
}}"#
            );
            process::exit(1);
        });
        return (group.name, group.members, group.expenses);
    }

    let (Some(store_path), Some(group_id)) = (&opts.store, &opts.group) else {
        eprintln!("Error: --input <FILE> or --store <FILE> --group <ID> is required");
        process::exit(1);
    };
    let id: Uuid = group_id.parse().unwrap_or_else(|e| {
        eprintln!("Invalid group id '{}': {}", group_id, e);
        process::exit(1);
    });
    let group = JsonFileStore::new(store_path)
        .find_group(id)
        .unwrap_or_else(|e| {
            eprintln!("Error loading group: {}", e);
            process::exit(1);
        });
    (
        group.name().to_string(),
        group.members().to_vec(),
        group.expenses().clone(),
    )
}

fn to_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

fn cmd_settle(args: &[String], with_transfers: bool) {
    let opts = parse_options(args);
    let (name, members, expenses) = load_group(&opts);
    let calculator = SettlementCalculator::new(opts.config.clone());
    let summary = calculator.summarize(&members, expenses.expenses());

    if opts.format == "json" {
        let config = calculator.config();
        let tolerance = config.tolerance;
        let balances = summary
            .balances()
            .entries()
            .iter()
            .map(|e| BalanceOutput {
                participant: e.participant.to_string(),
                paid: config.format_amount(e.paid),
                balance: config.format_amount(e.balance),
                status: if e.balance > tolerance {
                    "CREDITOR".to_string()
                } else if e.balance < -tolerance {
                    "DEBTOR".to_string()
                } else {
                    "SETTLED".to_string()
                },
            })
            .collect();
        let settlements = if with_transfers {
            summary
                .instructions()
                .iter()
                .map(|ins| InstructionOutput {
                    from: ins.debtor().to_string(),
                    to: ins.creditor().to_string(),
                    amount: config.format_amount(ins.amount()),
                    line: ins.describe(config),
                })
                .collect()
        } else {
            Vec::new()
        };

        let output = SettlementOutput {
            group: name,
            total: config.format_amount(summary.balances().total()),
            fair_share: config.format_amount(summary.balances().fair_share()),
            unattributed: config.format_amount(summary.balances().ignored_total()),
            balances,
            settlements,
        };
        println!("{}", to_json(&output));
    } else if with_transfers {
        if !name.is_empty() {
            println!("Group: {}\n", name);
        }
        println!("{}", summary);
    } else {
        let config = calculator.config();
        let sheet = summary.balances();
        println!("Total:      {}", config.format_amount(sheet.total()));
        println!("Fair share: {}", config.format_amount(sheet.fair_share()));
        for e in sheet.entries() {
            println!(
                "  {:<15} paid {:>12} ({:>5.1}%)  balance {:>12}",
                e.participant.as_str(),
                config.format_amount(e.paid),
                sheet.paid_percent(&e.participant),
                config.format_amount(e.balance)
            );
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = RandomGroupConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--members" => {
                i += 1;
                config.member_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--members requires a number");
                        process::exit(1);
                    });
            }
            "--expenses" => {
                i += 1;
                config.expense_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--expenses requires a number");
                        process::exit(1);
                    });
            }
            "--output" => {
                i += 1;
                output_path = Some(take_value(args, i, "--output", "a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let group = generate_random_group(&config).unwrap_or_else(|e| {
        eprintln!("Error generating group: {}", e);
        process::exit(1);
    });
    let json = to_json(&group);

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} members → {}",
            group.expenses().len(),
            group.members().len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "settle" => cmd_settle(rest, true),
        "balances" => cmd_settle(rest, false),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
