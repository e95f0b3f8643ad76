use clap::Parser;

use storefront_card::{QuantityChange, SkipReason, UpdateOutcome};

use super::{Cli, Commands};
use crate::report::describe_outcome;

#[test]
fn parses_plus_with_times() {
    let cli = Cli::try_parse_from([
        "storefront",
        "--variant-id",
        "42",
        "--inventory",
        "5",
        "plus",
        "--times",
        "3",
    ])
    .unwrap();
    assert_eq!(cli.variant_id, "42");
    assert_eq!(cli.inventory, "5");
    assert!(matches!(cli.command, Commands::Plus { times: 3 }));
}

#[test]
fn minus_defaults_to_one_press() {
    let cli = Cli::try_parse_from(["storefront", "--variant-id", "42", "minus"]).unwrap();
    assert_eq!(cli.inventory, "0");
    assert!(matches!(cli.command, Commands::Minus { times: 1 }));
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["storefront", "--variant-id", "42"]).is_err());
}

#[test]
fn describes_outcomes() {
    assert_eq!(
        describe_outcome(1, QuantityChange::Increment, UpdateOutcome::Committed { quantity: 2 }),
        "#1 plus: committed, quantity now 2"
    );
    assert_eq!(
        describe_outcome(
            2,
            QuantityChange::Decrement,
            UpdateOutcome::Skipped(SkipReason::AtBound)
        ),
        "#2 minus: skipped (AtBound)"
    );
    assert_eq!(
        describe_outcome(3, QuantityChange::Decrement, UpdateOutcome::Failed),
        "#3 minus: failed"
    );
}
