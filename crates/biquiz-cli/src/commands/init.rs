//! The `biquiz init` command.

use anyhow::Result;

use biquiz_core::builtin::BUSINESS_INTELLIGENCE_TOML;

pub fn execute() -> Result<()> {
    // Create biquiz.toml
    if std::path::Path::new("biquiz.toml").exists() {
        println!("biquiz.toml already exists, skipping.");
    } else {
        std::fs::write("biquiz.toml", SAMPLE_CONFIG)?;
        println!("Created biquiz.toml");
    }

    // Create the starter question bank
    std::fs::create_dir_all("question-banks")?;
    let bank_path = std::path::Path::new("question-banks/business-intelligence.toml");
    if bank_path.exists() {
        println!("question-banks/business-intelligence.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, BUSINESS_INTELLIGENCE_TOML)?;
        println!("Created question-banks/business-intelligence.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit question-banks/business-intelligence.toml or add your own banks");
    println!("  2. Run: biquiz validate --bank question-banks");
    println!("  3. Run: biquiz take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# biquiz configuration

default_bank = "question-banks/business-intelligence.toml"

[policy]
incorrect_prefix = "Incorrecto."

[[policy.tiers]]
min_percent = 100
label = "mastery"
message = "🎉 ¡Excelente! Dominas completamente los conceptos clave."

[[policy.tiers]]
min_percent = 80
label = "strong"
message = "👍 ¡Muy bien! Comprendes la mayoría de los conceptos de BI."

[[policy.tiers]]
min_percent = 60
label = "partial"
message = "📚 Buen avance. Revisa algunos temas y vuelve a intentarlo."

[[policy.tiers]]
min_percent = 0
label = "retry"
message = "📖 Sigue practicando. Repasa el módulo y realiza el quiz nuevamente."
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_matches_default_policy() {
        let config = biquiz_core::config::parse_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.policy, biquiz_core::ResultPolicy::default());
        assert!(config.default_bank.is_some());
    }
}
