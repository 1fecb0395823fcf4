//! Command handlers: the composition root wiring config, engines and I/O.

use crate::audio::inspect::inspect;
use crate::cli::EnhanceArgs;
use crate::config::Config;
use crate::enhance::build_enhancer;
use crate::error::Result;
use crate::report::{format_inspection, format_metrics};
use std::io::IsTerminal;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

/// Path value that stands for stdin/stdout.
pub const STDIO_PATH: &str = "-";

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_PATH
}

/// Read a whole input file, or stdin for "-".
pub async fn read_input(path: &Path) -> Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buffer = Vec::new();
        tokio::io::stdin().read_to_end(&mut buffer).await?;
        Ok(buffer)
    } else {
        Ok(tokio::fs::read(path).await?)
    }
}

/// Write output bytes to a file, or stdout when no path (or "-") is given.
pub async fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) if !is_stdio(path) => tokio::fs::write(path, bytes).await?,
        _ => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(bytes).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

/// Run the enhance command: read → enhance → write → report.
pub async fn run_enhance_command(mut config: Config, args: EnhanceArgs, quiet: bool) -> Result<()> {
    args.apply_to(&mut config);

    let input = read_input(&args.input).await?;
    let enhancer = build_enhancer(&config);
    info!(
        engine = enhancer.name(),
        input = %args.input.display(),
        bytes = input.len(),
        "enhancing"
    );

    let enhanced = enhancer.enhance(&input).await?;
    write_output(args.output.as_deref(), &enhanced.wav).await?;

    let wav_on_stdout = args.output.as_deref().is_none_or(is_stdio);
    if args.json {
        let json = serde_json::to_string_pretty(&enhanced.metrics)?;
        if wav_on_stdout {
            eprintln!("{json}");
        } else {
            println!("{json}");
        }
    } else if !quiet {
        let color = std::io::stderr().is_terminal();
        eprintln!("{}", format_metrics(&enhanced.metrics, enhancer.name(), color));
    }

    Ok(())
}

/// Run the inspect command.
pub async fn run_inspect_command(input: &Path, json: bool) -> Result<()> {
    let bytes = read_input(input).await?;
    let report = inspect(&bytes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let color = std::io::stdout().is_terminal();
        println!("{}", format_inspection(&report, color));
    }
    Ok(())
}
