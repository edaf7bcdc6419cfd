//! glsl-cross - GLSL dialect translator
//!
//! Command-line entry point: translates shader files, or the built-in
//! sample program when no files are given.

use anyhow::{bail, Context};
use clap::Parser;
use gc_core::config::LogLevel;
use gc_core::{logging, Config, CrossError};
use gc_shader::{DialectTarget, ShaderStage, TranslateOptions, Translator};
use std::path::{Path, PathBuf};

const SAMPLE_VERTEX: &str = "#version 120\nattribute vec3 pos;\nvarying vec3 col;\nvarying vec2 uv;\nuniform vec4 mvp;\nvoid main() {\n   gl_Position = vec4(pos, 1) * mvp;\n   col = vec4(1.0f, 0.0f, 0.0f, 1.0f);\n   uv = vec2(0, 0);\n}\n";

const SAMPLE_FRAGMENT: &str = "#version 120\nvarying vec4 col;\nvarying vec2 uv;\nuniform sampler2D diffuseTexture;\nvoid main() {\n   gl_FragColor = texture2D(diffuseTexture.st, uv) * color;\n}\n";

/// Translate GLSL shaders between the legacy and core-profile dialects
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Shader files to translate (stage inferred from .vert/.frag style extensions)
    files: Vec<PathBuf>,

    /// Shader stage of every input: vertex or fragment
    #[arg(short, long)]
    stage: Option<ShaderStage>,

    /// Output dialect: legacy or core
    #[arg(short, long)]
    target: Option<DialectTarget>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout (single input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not emit the version pragma and dialect define
    #[arg(long)]
    no_header: bool,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load()?,
    };

    logging::init(args.log_level.unwrap_or(config.debug.log_level));

    let mut options = TranslateOptions::from(&config.translate);
    if let Some(target) = args.target {
        options.target = target;
    }
    if args.no_header {
        options.emit_header = false;
    }
    let translator = Translator::new(options);

    if args.files.is_empty() {
        return run_sample(&translator);
    }

    if args.output.is_some() && args.files.len() != 1 {
        bail!("--output needs exactly one input file");
    }

    let mut failed = 0;
    for path in &args.files {
        if let Err(err) = translate_file(&translator, path, args.stage, args.output.as_deref()) {
            tracing::error!("{}: {:#}", path.display(), err);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} shaders failed to translate", failed, args.files.len());
    }
    Ok(())
}

fn translate_file(
    translator: &Translator,
    path: &Path,
    stage: Option<ShaderStage>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let stage = match stage.or_else(|| ShaderStage::from_path(path)) {
        Some(stage) => stage,
        None => return Err(CrossError::UnknownStage(path.display().to_string()).into()),
    };

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let translated = translator.translate(&source, stage)?;
    tracing::info!("Translated {} as {} shader", path.display(), stage);

    match output {
        Some(out) => std::fs::write(out, translated)
            .with_context(|| format!("failed to write {}", out.display()))?,
        None => print!("{}", translated),
    }
    Ok(())
}

fn run_sample(translator: &Translator) -> anyhow::Result<()> {
    tracing::info!("No input files, translating the sample program");
    let program = translator.translate_program(SAMPLE_VERTEX, SAMPLE_FRAGMENT)?;
    println!("{}", program.vertex);
    println!("{}", program.fragment);
    Ok(())
}
