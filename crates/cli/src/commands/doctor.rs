//! `emissary doctor` — Diagnose configuration and content problems.

use emissary_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Emissary Doctor — Diagnostics");
    println!("=============================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  [warn] No config file at {} — run `emissary onboard`", config_path.display());
        issues += 1;
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  [ok]   Config loads and validates");
            config
        }
        Err(e) => {
            println!("  [fail] Config invalid: {e}");
            println!();
            println!("  1 fatal issue found.");
            return Ok(());
        }
    };

    match config.require_api_keys() {
        Ok(()) => println!("  [ok]   Both API keys present"),
        Err(e) => {
            println!("  [fail] {e}");
            issues += 1;
        }
    }

    match emissary_content::load_store(&config.background_path, &config.personal_info_path) {
        Ok(store) => {
            println!(
                "  [ok]   Content loads ({} chars background, {} chars personal info)",
                store.background().len(),
                store.personal_info().len()
            );
        }
        Err(e) => {
            println!("  [fail] Content: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed. Run `emissary chat` to start.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
