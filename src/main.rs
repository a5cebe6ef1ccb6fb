use anyhow::Context;
use clap::Parser;
use compose_gen::utils::error::{ComposeError, ErrorSeverity};
use compose_gen::utils::{logger, validation::Validate};
use compose_gen::{
    CliConfig, ComposePipeline, DotenvLoader, EtlEngine, LocalStorage, ProfileConfig,
    TransformRules,
};
use std::io::Write;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證設定
    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }

    let rules = match load_rules(config.profile.as_deref()) {
        Ok(rules) => rules,
        Err(e) => fail("Failed to load rules profile", &e),
    };

    let dry_run = config.dry_run;
    let output_file = config.output_file.clone();

    let pipeline = ComposePipeline::new(LocalStorage::current_dir(), config, DotenvLoader)
        .with_rules(rules);
    let engine = EtlEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - {} will not be written", output_file);
        match engine.preview().await {
            Ok(yaml) => std::io::stdout()
                .write_all(yaml.as_bytes())
                .context("failed to write merged compose file to stdout")?,
            Err(e) => fail("Compose generation failed", &e),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(output_path) => {
            println!("Successfully generated {}.", output_path);
        }
        Err(e) => fail("Compose generation failed", &e),
    }

    Ok(())
}

fn load_rules(profile: Option<&str>) -> compose_gen::Result<TransformRules> {
    let Some(path) = profile else {
        return Ok(TransformRules::default());
    };

    tracing::info!("📁 Loading rules profile from: {}", path);
    let profile = ProfileConfig::from_file(path)?;
    profile.validate()?;
    Ok(profile.to_rules())
}

/// 記錄錯誤並依嚴重程度決定退出碼
fn fail(context: &str, e: &ComposeError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
