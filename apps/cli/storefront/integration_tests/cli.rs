use storefront::commands::Command;

use clap::Parser;

#[derive(Debug, Parser)]
struct TestCli {
    #[command(subcommand)]
    command: Command,
}

fn parse(args: &[&str]) -> Result<Command, clap::Error> {
    TestCli::try_parse_from(std::iter::once("storefront").chain(args.iter().copied()))
        .map(|cli| cli.command)
}

/// **VALUE**: Every storefront operation is reachable from the command line.
#[test]
fn given_each_subcommand_when_parsed_then_accepted() {
    for args in [
        vec!["session"],
        vec!["login"],
        vec!["login", "Google"],
        vec!["logout"],
        vec!["catalog"],
        vec!["popular", "-n", "5"],
        vec!["purchases"],
        vec!["page"],
        vec!["page", "Popular"],
        vec!["checkout", "prod_mug=2", "prod_hat"],
    ] {
        assert!(parse(&args).is_ok(), "failed to parse {args:?}");
    }
}

#[test]
fn given_unknown_page_when_parsed_then_rejected() {
    let err = parse(&["page", "Checkout"]).expect_err("unknown page");

    assert!(err.to_string().contains("Unknown page"));
}

#[test]
fn given_unknown_provider_when_parsed_then_rejected() {
    assert!(parse(&["login", "MySpace"]).is_err());
}

#[test]
fn given_zero_quantity_when_parsed_then_rejected() {
    assert!(parse(&["checkout", "prod_mug=0"]).is_err());
}

#[test]
fn given_quantity_above_limit_when_parsed_then_rejected() {
    assert!(parse(&["checkout", "prod_mug=1000"]).is_err());
    assert!(parse(&["checkout", "prod_mug=999"]).is_ok());
}
