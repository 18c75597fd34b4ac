//! Inspect command implementation
//!
//! Reads WAV files, validates their headers and prints the decoded fields, either for a
//! single file or for every `.wav`/`.wave` file under a directory.

use anyhow::{Context, Result};
use colored::Colorize;
use riffwave::{inspect_file, ParseOptions, SourceFile, WavDescriptor, WAV_EXTENSIONS};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use walkdir::WalkDir;

use super::json_output::{
    error_codes, BatchInspectItem, BatchInspectOutput, InspectOutput, InspectResult, JsonError,
};

/// Run the inspect command
///
/// # Arguments
/// * `input_path` - Path to a single WAV file
/// * `input_dir` - Directory to scan recursively (batch mode)
/// * `options` - Parser options
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 when every file parses, 1 otherwise
pub fn run(
    input_path: Option<&str>,
    input_dir: Option<&str>,
    options: &ParseOptions,
    json_output: bool,
) -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    match (input_path, input_dir) {
        (Some(input), None) => {
            let outcome = runtime.block_on(inspect_one(Path::new(input), options));
            if json_output {
                print_json_single(outcome)
            } else {
                Ok(print_human_single(input, &outcome))
            }
        }
        (None, Some(dir)) => {
            let files = collect_wav_files(Path::new(dir))?;
            let items = runtime.block_on(inspect_all(&files, options));
            let output = BatchInspectOutput::new(items);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_human_batch(dir, &output);
            }
            Ok(exit_code(output.success))
        }
        (Some(_), Some(_)) => anyhow::bail!("--input and --input-dir are mutually exclusive"),
        (None, None) => anyhow::bail!("one of --input or --input-dir is required"),
    }
}

/// Reads and parses one file.
pub async fn inspect_one(path: &Path, options: &ParseOptions) -> Result<InspectResult, JsonError> {
    inspect_file(path, options, |source, outcome| match outcome {
        Ok(descriptor) => Ok(build_result(source, &descriptor)),
        Err(err) => Err(JsonError::from_load_error(&err).with_file(path.display().to_string())),
    })
    .await
}

/// Inspects each file in order. Files are read one after another.
pub async fn inspect_all(files: &[PathBuf], options: &ParseOptions) -> Vec<BatchInspectItem> {
    let mut items = Vec::with_capacity(files.len());
    for path in files {
        let outcome = inspect_one(path, options).await;
        debug!(path = %path.display(), ok = outcome.is_ok(), "inspected file");
        items.push(BatchInspectItem::from_outcome(path.display().to_string(), outcome));
    }
    items
}

/// Collects WAV files under `dir`, sorted by path.
pub fn collect_wav_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!(
            "[{}] Not a directory: {}",
            error_codes::DIR_WALK,
            dir.display()
        );
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("[{}] Failed to walk {}", error_codes::DIR_WALK, dir.display()))?;
        let is_wav = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| WAV_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
        if is_wav {
            files.push(entry.into_path());
        }
    }
    debug!(dir = %dir.display(), count = files.len(), "collected wav files");
    Ok(files)
}

fn build_result(source: &SourceFile, descriptor: &WavDescriptor<'_>) -> InspectResult {
    InspectResult {
        input: source.path.display().to_string(),
        size: source.size,
        input_hash: blake3::hash(&source.bytes).to_hex().to_string(),
        data_hash: blake3::hash(descriptor.data).to_hex().to_string(),
        data_len: descriptor.data.len(),
        header: descriptor.header.clone(),
        milliseconds: descriptor.milliseconds,
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_json_single(outcome: Result<InspectResult, JsonError>) -> Result<ExitCode> {
    let output = match outcome {
        Ok(result) => InspectOutput::success(result),
        Err(error) => InspectOutput::failure(vec![error]),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(exit_code(output.success))
}

fn print_human_single(input: &str, outcome: &Result<InspectResult, JsonError>) -> ExitCode {
    println!("{} {}", "Inspecting:".cyan().bold(), input);

    match outcome {
        Ok(result) => {
            print_result(result);
            println!("\n{}", "Valid WAV file".green().bold());
            ExitCode::SUCCESS
        }
        Err(error) => {
            print_error(error);
            ExitCode::from(1)
        }
    }
}

fn print_result(result: &InspectResult) {
    let h = &result.header;

    println!("{} {}", "Hash:".dimmed(), &result.input_hash[..16]);
    println!("\n{}", "RIFF header".cyan().bold());
    println!("  {:<18} {}", "chunk_id:".dimmed(), h.chunk_id);
    println!("  {:<18} {}", "chunk_size:".dimmed(), h.chunk_size);
    println!("  {:<18} {}", "format:".dimmed(), h.format);

    println!("\n{}", "fmt chunk".cyan().bold());
    println!("  {:<18} {}", "subchunk1_size:".dimmed(), h.subchunk1_size);
    println!("  {:<18} {}", "audio_format:".dimmed(), h.audio_format);
    println!("  {:<18} {}", "channels:".dimmed(), h.number_of_channels);
    println!("  {:<18} {} Hz", "sample_rate:".dimmed(), h.sample_rate);
    println!("  {:<18} {} B/s", "byte_rate:".dimmed(), h.byte_rate);
    println!("  {:<18} {}", "block_align:".dimmed(), h.block_align);
    println!("  {:<18} {}", "bits_per_sample:".dimmed(), h.bits_per_sample);
    if h.subchunk1_size > 16 {
        println!("  {:<18} {}", "extra_param_size:".dimmed(), h.extra_param_size);
    }
    if let Some(params) = &h.extra_params {
        let hex: String = params.as_bytes().iter().map(|b| format!("{:02x}", b)).collect();
        println!("  {:<18} {}", "extra_params:".dimmed(), hex);
    }

    println!("\n{}", "data chunk".cyan().bold());
    println!("  {:<18} {}", "start:".dimmed(), h.subchunk2_start_pos);
    println!("  {:<18} {}", "subchunk2_size:".dimmed(), h.subchunk2_size);
    println!("  {:<18} {}", "sliced bytes:".dimmed(), result.data_len);
    println!("  {:<18} {}", "data hash:".dimmed(), &result.data_hash[..16]);
    println!("  {:<18} {:.3} ms", "duration:".dimmed(), result.milliseconds);
}

fn print_error(error: &JsonError) {
    eprintln!("{} [{}] {}", "error:".red().bold(), error.code, error.message);
    if let Some(partial) = &error.partial {
        eprintln!(
            "  {} chunk_id={} format={} fmt={} channels={} rate={} bits={}",
            "decoded so far:".dimmed(),
            partial.chunk_id,
            partial.format,
            partial.subchunk1_id,
            partial.number_of_channels,
            partial.sample_rate,
            partial.bits_per_sample
        );
    }
}

fn print_human_batch(dir: &str, output: &BatchInspectOutput) {
    println!("{} {}", "Inspecting directory:".cyan().bold(), dir);

    for item in &output.items {
        match (&item.result, &item.error) {
            (Some(result), _) => {
                let h = &result.header;
                println!(
                    "  {} {}  {}ch {} Hz {}-bit {:.1} ms",
                    "✓".green(),
                    item.input,
                    h.number_of_channels,
                    h.sample_rate,
                    h.bits_per_sample,
                    result.milliseconds
                );
            }
            (None, Some(error)) => {
                println!(
                    "  {} {}  [{}] {}",
                    "✗".red(),
                    item.input,
                    error.code,
                    error.message
                );
            }
            (None, None) => {}
        }
    }

    let summary = format!(
        "{} files, {} valid, {} invalid",
        output.total, output.passed, output.failed
    );
    if output.success {
        println!("\n{}", summary.green().bold());
    } else {
        println!("\n{}", summary.red().bold());
    }
}
