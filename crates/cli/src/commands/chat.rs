//! `emissary chat` — Interactive or single-message chat mode.

use std::sync::Arc;

use emissary_config::AppConfig;
use emissary_core::Persona;
use emissary_pipeline::Pipeline;
use emissary_providers::{GeminiAssessment, OpenAiGeneration};
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>, debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API keys early — give a clear error
    if let Err(e) = config.require_api_keys() {
        eprintln!();
        eprintln!("  ERROR: {e}");
        eprintln!();
        eprintln!("  Set these environment variables:");
        eprintln!("    OPENAI_API_KEY   (or EMISSARY_OPENAI_API_KEY)");
        eprintln!("    GEMINI_API_KEY   (or EMISSARY_GEMINI_API_KEY)");
        eprintln!();
        eprintln!("  Or add them to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("Missing API keys. See above for setup instructions.".into());
    }

    let mut pipeline = build_pipeline(&config)?;

    if let Some(msg) = message {
        // Single message mode
        let result = pipeline.process_query(&msg).await;
        println!("{}", result.final_response);
        if debug {
            eprintln!("\n--- diagnostics ---\n{}", result.diagnostics);
        }
        return Ok(());
    }

    // Interactive mode
    println!("Emissary — speaking for {}", config.persona.name);
    println!("Commands: /reset, /stats, /debug, /quit\n");

    let mut show_diagnostics = debug;
    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        eprint!("> ");
        let Some(line) = lines.next_line().await? else {
            break; // EOF (Ctrl+D)
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        match line.as_str() {
            "/quit" | "/exit" | "exit" | "quit" => break,
            "/reset" => {
                pipeline.reset();
                println!("Conversation cleared.");
                continue;
            }
            "/stats" => {
                let stats = pipeline.stats();
                println!(
                    "Interactions: {}  Exchanges: {}  Call-to-action threshold: {}",
                    stats.total_interactions, stats.exchange_count, stats.threshold
                );
                continue;
            }
            "/debug" => {
                show_diagnostics = !show_diagnostics;
                println!(
                    "Diagnostics {}",
                    if show_diagnostics { "on" } else { "off" }
                );
                continue;
            }
            _ => {}
        }

        let result = pipeline.process_query(&line).await;
        println!("\n{}\n", result.final_response);
        if show_diagnostics {
            eprintln!("--- diagnostics ---\n{}\n", result.diagnostics);
        }
    }

    Ok(())
}

fn build_pipeline(config: &AppConfig) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let content = emissary_content::load_store(&config.background_path, &config.personal_info_path)
        .map_err(|e| format!("Failed to load content: {e}"))?;

    let generation_key = config
        .generation_api_key
        .clone()
        .ok_or("generation API key missing")?;
    let assessment_key = config
        .assessment_api_key
        .clone()
        .ok_or("assessment API key missing")?;

    let generation = Arc::new(OpenAiGeneration::new(
        &config.generation_base_url,
        generation_key,
        &config.generation_model,
        config.temperature,
        config.max_tokens,
    )?);

    let assessment = Arc::new(GeminiAssessment::new(
        assessment_key,
        &config.assessment_model,
    )?);

    let persona = Persona {
        name: config.persona.name.clone(),
        title: config.persona.title.clone(),
        organization: config.persona.organization.clone(),
        connection_url: config.persona.connection_url.clone(),
    };

    Ok(Pipeline::new(content, persona, generation, assessment)
        .with_threshold(config.call_to_action_threshold))
}
