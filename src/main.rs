//! chatterbox-cli entry point.

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;

use chatterbox_cli::cli::Args;
use chatterbox_cli::engine::{Dispatcher, SynthesisRequest};
use chatterbox_cli::provider::{ProviderKind, create_provider};

fn main() -> ExitCode {
    let args = Args::parse();
    let lang = args.lang.clone();

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        if lang != "en" {
            eprintln!();
            eprintln!("Note: the multilingual model has known compatibility issues on some systems.");
            eprintln!("Try the standard English model instead by omitting -l or passing -l en.");
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(args: Args) -> Result<()> {
    // All validation happens before any provider work.
    let text = args.resolve_text()?;

    if let Some(prompt) = &args.audio_prompt
        && !prompt.exists()
    {
        bail!("Audio prompt file not found: {}", prompt.display());
    }

    println!("Text: {}", preview(&text));
    println!("Language: {}", args.lang);
    println!("Output: {}", args.outputfile.display());
    if let Some(prompt) = &args.audio_prompt {
        println!("Audio prompt: {}", prompt.display());
    }

    let kind = ProviderKind::for_language(&args.lang);
    let provider = create_provider(kind, &args.host);
    let dispatcher = Dispatcher::new(provider, kind);

    let request = SynthesisRequest {
        text,
        language: args.lang.clone(),
        audio_prompt: args.audio_prompt.clone(),
        output: args.outputfile.clone(),
    };

    let report = dispatcher
        .synthesize(&request, args.device)
        .context("Failed to synthesize speech")?;

    println!(
        "Saved {} samples ({:.2}s at {} Hz) to {}",
        report.samples,
        report.duration_seconds,
        report.sample_rate,
        report.output.display()
    );
    println!("Speech generation completed successfully!");

    Ok(())
}

/// First 100 characters of the text, with an ellipsis when truncated.
fn preview(text: &str) -> String {
    let truncated: String = text.chars().take(100).collect();
    if truncated.len() < text.len() {
        format!("{truncated}...")
    } else {
        truncated
    }
}
