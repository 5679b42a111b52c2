// Copyright (c) 2026 Billfold.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

pub fn build_cli() -> Command {
    Command::new("billfold")
        .about("Monthly income/expense ledger with credit-card installment tracking")
        .version(crate_version!())
        .arg(
            Arg::new("file")
                .long("file")
                .value_name("PATH")
                .global(true)
                .help("Data file to use instead of the platform default"),
        )
        .subcommand(Command::new("init").about("Create the data file and print its location"))
        .subcommand(tx_cmd())
        .subcommand(card_cmd())
        .subcommand(purchase_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Scan the data file for inconsistencies"))
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .value_name("MONTH")
        .help("Month key YYYY-MM, defaults to the current month")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Income and expenses of a month bucket")
        .subcommand(
            Command::new("add")
                .about("Add an income or expense to a month")
                .arg(Arg::new("title").required(true).value_name("TITLE"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .short('a')
                        .required(true)
                        .value_name("AMOUNT")
                        .help("Positive amount, 1234.56 or 1.234,56"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .short('k')
                        .value_parser(["income", "expense"])
                        .default_value("expense"),
                )
                .arg(month_arg()),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List a month's transactions")
                .arg(month_arg())
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .short('k')
                        .value_parser(["income", "expense"]),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change a transaction's title or amount")
                .arg(Arg::new("id").required(true).value_name("ID"))
                .arg(Arg::new("title").long("title").value_name("TITLE"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .short('a')
                        .value_name("AMOUNT"),
                )
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a transaction from its month")
                .arg(Arg::new("id").required(true).value_name("ID"))
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("paid")
                .about("Toggle an expense between paid and pending")
                .arg(Arg::new("id").required(true).value_name("ID"))
                .arg(month_arg()),
        )
        .subcommand(
            Command::new("replicate")
                .about("Clone a month's transactions into another month, with fresh ids")
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_name("MONTH")
                        .help("Source month, defaults to the current month"),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_name("MONTH")
                        .help("Destination month, defaults to the month after the source"),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Empty a month bucket")
                .arg(month_arg()),
        )
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Credit cards")
        .subcommand(
            Command::new("add")
                .about("Register a card")
                .arg(Arg::new("name").required(true).value_name("NAME"))
                .arg(
                    Arg::new("bank")
                        .long("bank")
                        .required(true)
                        .value_name("BANK"),
                )
                .arg(
                    Arg::new("color")
                        .long("color")
                        .value_name("HEX")
                        .help("Defaults to the bank's brand color"),
                ),
        )
        .subcommand(json_flags(Command::new("list").about("List cards")))
        .subcommand(
            Command::new("edit")
                .about("Change a card's name, bank or color")
                .arg(Arg::new("id").required(true).value_name("ID"))
                .arg(Arg::new("name").long("name").value_name("NAME"))
                .arg(Arg::new("bank").long("bank").value_name("BANK"))
                .arg(Arg::new("color").long("color").value_name("HEX")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a card and every purchase on it")
                .arg(Arg::new("id").required(true).value_name("ID")),
        )
}

fn purchase_cmd() -> Command {
    Command::new("purchase")
        .about("Card purchases paid in installments")
        .subcommand(
            Command::new("add")
                .about("Record an installment purchase")
                .arg(Arg::new("title").required(true).value_name("TITLE"))
                .arg(
                    Arg::new("card")
                        .long("card")
                        .required(true)
                        .value_name("CARD")
                        .help("Card id or name"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .short('a')
                        .required(true)
                        .value_name("AMOUNT")
                        .help("Value of one installment"),
                )
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .short('n')
                        .required(true)
                        .value_parser(value_parser!(u32).range(1..))
                        .value_name("N"),
                )
                .arg(
                    Arg::new("current")
                        .long("current")
                        .value_parser(value_parser!(u32).range(1..))
                        .default_value("1")
                        .value_name("K")
                        .help("Installment already due in the start month, for mid-cycle purchases"),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .value_name("MONTH")
                        .help("Anchor month, defaults to the current month"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List purchases billing in a month")
                .arg(month_arg())
                .arg(
                    Arg::new("all")
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Include purchases not active in the month"),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Overwrite fields of a purchase")
                .arg(Arg::new("id").required(true).value_name("ID"))
                .arg(Arg::new("title").long("title").value_name("TITLE"))
                .arg(Arg::new("card").long("card").value_name("CARD"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .short('a')
                        .value_name("AMOUNT"),
                )
                .arg(
                    Arg::new("installments")
                        .long("installments")
                        .short('n')
                        .value_parser(value_parser!(u32).range(1..))
                        .value_name("N"),
                )
                .arg(
                    Arg::new("current")
                        .long("current")
                        .value_parser(value_parser!(u32).range(1..))
                        .value_name("K"),
                )
                .arg(Arg::new("start").long("start").value_name("MONTH")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a purchase")
                .arg(Arg::new("id").required(true).value_name("ID")),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Monthly summaries and the card trend")
        .subcommand(json_flags(
            Command::new("month")
                .about("Income, expenses and balances for a month")
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("cards")
                .about("Per-card installment totals for a month")
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("trend")
                .about("Per-card totals over the trailing months")
                .arg(month_arg())
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(u32).range(1..=120))
                        .default_value("6")
                        .value_name("N"),
                ),
        ))
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Write data out as CSV or JSON")
        .subcommand(
            Command::new("transactions")
                .about("Export transactions, optionally one month only")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .short('m')
                        .value_name("MONTH")
                        .help("Only this month; every month when absent"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .value_name("FMT")
                        .help("csv or json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_name("PATH"),
                ),
        )
        .subcommand(
            Command::new("purchases")
                .about("Export purchases with their status in a month")
                .arg(month_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .value_name("FMT")
                        .help("csv or json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_name("PATH"),
                ),
        )
}
