use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;

use splitledger_core::{LedgerId, PersonId};
use splitledger_ledger::{Ledger, LedgerBook};
use splitledger_observability::{LogConfig, LogFormat};
use splitledger_reconcile::{ReconcileConfig, Reconciliation, reconcile};

mod format;

/// Net balances and minimal settlement transfers for an exported ledger book.
#[derive(Debug, Parser)]
#[command(name = "splitledger", version)]
struct Args {
    /// Ledger book export (a JSON array of ledgers).
    file: PathBuf,

    /// Ledger to reconcile; defaults to the first one in the book.
    #[arg(long)]
    ledger: Option<String>,

    /// Conservation tolerance in base-currency units.
    #[arg(long, env = "SPLITLEDGER_TOLERANCE")]
    tolerance: Option<f64>,

    /// Print the reconciliation as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Human-readable logs on stderr instead of JSON lines.
    #[arg(long)]
    pretty_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    splitledger_observability::tracing::init(&LogConfig {
        format: if args.pretty_logs {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        },
        ..LogConfig::default()
    });

    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let book = LedgerBook::from_json(&raw)
        .with_context(|| format!("failed to load ledger book {}", args.file.display()))?;

    let ledger = select_ledger(&book, args.ledger.as_deref())?;

    let mut config = ReconcileConfig::default();
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }

    let rec = reconcile(ledger, &config)?;
    if rec.correction.significant {
        tracing::warn!(
            residual = rec.correction.residual,
            "ledger does not balance; check for zero-weight expenses or unknown people"
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        print!("{}", render(ledger, &rec));
    }
    Ok(())
}

/// The requested ledger, or the book's first one. An unknown id lists the
/// ids the book does contain.
fn select_ledger<'a>(book: &'a LedgerBook, requested: Option<&str>) -> anyhow::Result<&'a Ledger> {
    let Some(id) = requested else {
        return match book.first() {
            Some(ledger) => Ok(ledger),
            None => bail!("ledger book is empty"),
        };
    };
    book.get(&LedgerId::from(id)).with_context(|| {
        let known: Vec<&str> = book.ledgers().iter().map(|l| l.id.as_str()).collect();
        format!("available ledgers: {}", known.join(", "))
    })
}

fn display_name<'a>(ledger: &'a Ledger, id: &PersonId) -> &'a str {
    ledger.person_name(id).unwrap_or("?")
}

fn render(ledger: &Ledger, rec: &Reconciliation) -> String {
    let code = ledger.base_currency.as_str();
    let name = |id: &PersonId| display_name(ledger, id);
    let mut out = format!("{} (base {code})\n\nNet balances:\n", ledger.name);

    for (id, balance) in rec.balances.iter() {
        out.push_str(&format!(
            "  {:<20} {}\n",
            name(id),
            format::signed_money(balance, code, ledger.decimals)
        ));
    }

    out.push_str("\nTransfers:\n");
    if rec.is_settled() {
        out.push_str("  All settled\n");
    }
    for t in &rec.transfers {
        out.push_str(&format!(
            "  {} owes {}: {}\n",
            name(&t.debtor),
            name(&t.creditor),
            format::money(t.amount, code, ledger.decimals)
        ));
    }

    if rec.correction.significant {
        out.push_str(&format!(
            "\nwarning: balances were off by {}; the difference was assigned to {}\n",
            format::money(rec.correction.residual, code, ledger.decimals),
            rec.correction.applied_to.as_ref().map_or("nobody", name),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitledger_core::CurrencyCode;
    use splitledger_ledger::{Expense, Person};

    #[test]
    fn renders_balances_and_transfers() {
        let ledger = Ledger::with_id("l1", "Dinner", CurrencyCode::from("USD"), 2)
            .with_person(Person::with_id("p1", "Ana"))
            .and_then(|l| l.with_person(Person::with_id("p2", "Bo")))
            .unwrap()
            .with_expense(Expense::equal(
                "e1",
                30.0,
                CurrencyCode::from("USD"),
                "p1",
                [PersonId::from("p1"), PersonId::from("p2")],
            ));
        let rec = reconcile(&ledger, &ReconcileConfig::default()).unwrap();
        let text = render(&ledger, &rec);

        assert!(text.starts_with("Dinner (base USD)"));
        assert!(text.contains("+$15.00 USD"));
        assert!(text.contains("Bo owes Ana: $15.00 USD"));
        assert!(!text.contains("warning"));
    }

    #[test]
    fn renders_settled_ledger() {
        let ledger = Ledger::with_id("l1", "Empty", CurrencyCode::from("EUR"), 0);
        let rec = reconcile(&ledger, &ReconcileConfig::default()).unwrap();
        assert!(render(&ledger, &rec).contains("All settled"));
    }

    #[test]
    fn selects_first_or_named_ledger() {
        let mut book = LedgerBook::new(Ledger::with_id("home", "Home", CurrencyCode::from("EUR"), 2));
        book.push(Ledger::with_id("trip", "Trip", CurrencyCode::from("COP"), 0));

        assert_eq!(select_ledger(&book, None).unwrap().id.as_str(), "home");
        assert_eq!(select_ledger(&book, Some("trip")).unwrap().name, "Trip");

        let err = select_ledger(&book, Some("nope")).unwrap_err();
        assert_eq!(err.to_string(), "available ledgers: home, trip");
        assert!(format!("{err:#}").contains("nope"));
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from(["splitledger", "book.json", "--ledger", "trip", "--json"]).unwrap();
        assert_eq!(args.ledger.as_deref(), Some("trip"));
        assert!(args.json);
        assert!(!args.pretty_logs);
    }
}
