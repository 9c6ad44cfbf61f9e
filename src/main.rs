use lipochem::{ChainCombination, ChainSymbols, Result, Slot, are_permuted_equivalent};
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, IntoDiagnostic};
use rustyline::DefaultEditor;
use std::{fmt::Write, sync::LazyLock};
use tracing_subscriber::EnvFilter;

static SYMBOLS: LazyLock<ChainSymbols> = LazyLock::new(ChainSymbols::default);

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut rl = DefaultEditor::new().into_diagnostic()?;
    while let Ok(line) = rl.readline("Chains: ") {
        rl.add_history_entry(&line).into_diagnostic()?;
        // NOTE: Two keys separated by `==` are checked for permuted equivalence instead
        let info = match line.split_once("==") {
            Some((a, b)) => equivalence_info(a.trim(), b.trim()),
            None => combination_info(line.trim()),
        };
        match info {
            Ok(info) => print!("{info}"),
            Err(diagnostic) => render_error(diagnostic),
        }
    }
    Ok(())
}

fn combination_info(key: &str) -> Result<String> {
    let mut buf = String::new();
    let combination = ChainCombination::decode(key, &SYMBOLS)?;

    let unresolved = combination.unresolved_key(&SYMBOLS)?;
    let resolved = combination.resolved_key(&SYMBOLS)?;
    let full = combination.key(&SYMBOLS)?;

    writeln!(buf, "Unresolved Key: {unresolved}").unwrap();
    writeln!(buf, "Resolved Key: {}", resolved.as_deref().unwrap_or("-")).unwrap();
    writeln!(buf, "Full Key: {full}").unwrap();

    for (position, slot) in combination.slots().iter().enumerate() {
        let position = position + 1;
        match slot {
            Slot::Chain(chain) => writeln!(
                buf,
                "Chain {position}: {:?}, {} carbons, {} double bond(s), {} hydroxyl(s), omega {}, oxidation {:?}, label {:?}",
                chain.class(),
                chain.carbons(),
                chain.double_bonds(),
                chain.hydroxylation(),
                chain.omega().map_or_else(|| "-".to_owned(), |omega| format!("n-{omega}")),
                chain.oxidation(),
                chain.label(),
            )
            .unwrap(),
            Slot::Vacant => writeln!(buf, "Chain {position}: vacant").unwrap(),
        }
    }

    writeln!(buf).unwrap();

    Ok(buf)
}

fn equivalence_info(a: &str, b: &str) -> Result<String> {
    let equivalent = are_permuted_equivalent(a, b, &SYMBOLS)?;
    Ok(format!("Permuted Equivalent: {equivalent}\n\n"))
}

fn render_error(diagnostic: impl Into<Box<dyn Diagnostic + 'static>>) {
    let mut buf = String::new();
    GraphicalReportHandler::new_themed(GraphicalTheme::unicode())
        .render_report(&mut buf, diagnostic.into().as_ref())
        .unwrap();
    println!("{buf}");
}
