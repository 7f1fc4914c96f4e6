//! List buy rules command.

use anyhow::Result;
use bourse_strategies::{StrategyRegistry, DEFAULT_RULE};

pub fn run() -> Result<()> {
    let registry = StrategyRegistry::new();

    println!("Available Buy Rules");
    println!("═══════════════════════════════════════════════════════════");
    println!();

    for info in registry.list() {
        let marker = if info.key == DEFAULT_RULE { " (default)" } else { "" };
        println!("  {}{} ", info.name, marker);
        println!("  ───────────────────────────────────────────────────────");
        println!("  key: {}", info.key);
        println!("  {}", info.description);
        println!();
    }

    println!("Use --rule <key> with 'simulate' or set strategy.rule in the config.");

    Ok(())
}
