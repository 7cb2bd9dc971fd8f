// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(
            arg!(--jsonl "Print as JSON lines")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
}

fn kind_arg() -> Arg {
    arg!(--kind <KIND> "income|expense")
        .required(true)
        .value_parser(["income", "expense"])
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .help("income|expense")
        .value_parser(["income", "expense"])
}

fn today_arg() -> Arg {
    arg!(--today <DATE> "Evaluate as of this date (YYYY-MM-DD) instead of the local date")
}

pub fn build_cli() -> Command {
    command!()
        .name("fintrack")
        .about("Track income, expenses, budgets and investment projections")
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(type_arg().required(true))
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--label <LABEL>).required(true))
                        .arg(arg!(--date <DATE> "YYYY-MM-DD, defaults to today"))
                        .arg(arg!(--bucket <BUCKET> "needs|wants|savings (expenses only)"))
                        .arg(arg!(--receipt <REF> "Opaque receipt reference")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(arg!(--month <MONTH> "YYYY-MM"))
                        .arg(type_arg())
                        .arg(arg!(--category <CATEGORY>))
                        .arg(arg!(--limit <N>).value_parser(value_parser!(usize))),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        arg!(--id <ID>)
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Income and expense categories")
                .subcommand(
                    Command::new("add")
                        .arg(kind_arg())
                        .arg(arg!(--name <NAME>).required(true)),
                )
                .subcommand(json_flags(Command::new("list").arg(kind_arg())))
                .subcommand(
                    Command::new("rm")
                        .arg(kind_arg())
                        .arg(arg!(--name <NAME>).required(true)),
                ),
        )
        .subcommand(
            Command::new("invest")
                .about("Investment projections and diversification")
                .subcommand(
                    Command::new("add")
                        .arg(arg!(--label <LABEL>).required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .help("e.g. sip, stocks, fd, crypto")
                                .default_value("sip"),
                        )
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(
                            arg!(--months <MONTHS>)
                                .default_value("12")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(arg!(--"return-rate" <PCT> "Annual return, percent").default_value("12"))
                        .arg(arg!(--inflation <PCT> "Annual inflation, percent").default_value("6")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm").arg(
                        arg!(--id <ID>)
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(Command::new("analyze"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Needs/wants/savings goals and category budgets")
                .subcommand(json_flags(Command::new("goals")))
                .subcommand(
                    Command::new("set-goals")
                        .arg(arg!(--needs <PCT>).required(true))
                        .arg(arg!(--wants <PCT>).required(true))
                        .arg(arg!(--savings <PCT>).required(true)),
                )
                .subcommand(json_flags(Command::new("analyze").arg(today_arg())))
                .subcommand(
                    Command::new("set")
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true)),
                )
                .subcommand(json_flags(Command::new("report").arg(today_arg()))),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and cash flow")
                .subcommand(json_flags(
                    Command::new("summary").arg(arg!(--month <MONTH> "YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("cashflow").arg(
                        arg!(--months <N>)
                            .default_value("12")
                            .value_parser(value_parser!(usize)),
                    ),
                )),
        )
        .subcommand(
            Command::new("fx")
                .about("Display currency and static conversion rates")
                .subcommand(Command::new("currency"))
                .subcommand(
                    Command::new("set-currency")
                        .arg(arg!(<CURRENCY>).required(true))
                        .arg(
                            arg!(--"keep-amounts" "Relabel only; do not convert stored amounts")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("convert")
                        .arg(arg!(--amount <AMOUNT>).required(true))
                        .arg(arg!(--from <CCY>).required(true))
                        .arg(arg!(--to <CCY>).required(true)),
                )
                .subcommand(Command::new("rates")),
        )
        .subcommand(
            Command::new("export")
                .about("Export records")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            arg!(--format <FMT> "csv|json")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(arg!(--out <PATH>).required(true)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn parses_investment_defaults() {
        let m = build_cli().get_matches_from([
            "fintrack", "invest", "add", "--label", "Index fund", "--amount", "1000",
        ]);
        let (_, inv) = m.subcommand().unwrap();
        let (_, add) = inv.subcommand().unwrap();
        assert_eq!(add.get_one::<String>("type").unwrap(), "sip");
        assert_eq!(*add.get_one::<u32>("months").unwrap(), 12);
        assert_eq!(add.get_one::<String>("return-rate").unwrap(), "12");
        assert_eq!(add.get_one::<String>("inflation").unwrap(), "6");
    }

    #[test]
    fn rejects_unknown_transaction_type() {
        let res = build_cli().try_get_matches_from([
            "fintrack", "tx", "add", "--type", "transfer", "--category", "x", "--amount", "1",
            "--label", "y",
        ]);
        assert!(res.is_err());
    }
}
