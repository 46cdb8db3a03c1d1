//! CLI: load config files → (keys | get | tree | schema | convert)
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;

use conf_osi::codegen::Codegen;
use conf_osi::detect::{self, Candidate};
use conf_osi::{ConfigDocument, DynamicValue, FormatTag, Inference, Settings};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// inspect JSON/YAML/INI config files: list keys, look up dotted paths, or infer a struct schema
#[derive(Parser, Debug)]
#[command(name = "conf-osi", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    global: GlobalSettings,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// list every dotted key path, sorted
    Keys(KeysOut),
    /// look up one dotted path, optionally as a specific type
    Get(GetOut),
    /// print the indented structure of each document
    Tree(TreeOut),
    /// infer struct definitions (Rust source, or JSON with --json)
    Schema(SchemaOut),
    /// re-emit one document in another format
    Convert(ConvertOut),
}

#[derive(Args, Debug, Clone)]
struct GlobalSettings {
    /// parse every input as this format instead of detecting it
    #[arg(long, global = true)]
    format: Option<FormatArg>,

    /// turn INI string values that look like bools/numbers into typed values
    #[arg(long, global = true, default_value_t = false)]
    coerce: bool,

    /// recursion bound for key listing and schema inference
    #[arg(long, global = true, default_value_t = 128)]
    max_depth: usize,

    /// more logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// no logging at all
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,

    /// plain output
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct KeysOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct GetOut {
    /// dotted path, e.g. database.host
    path: String,

    #[command(flatten)]
    input_settings: InputSettings,

    /// required type of the value
    #[arg(long = "as", value_enum, default_value_t = Accessor::Any)]
    accessor: Accessor,
}

#[derive(clap::Parser, Debug)]
struct TreeOut {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// top-level struct name
    #[arg(long, default_value = "Config")]
    root_type: String,

    /// emit the registry as JSON instead of Rust source
    #[arg(long, default_value_t = false)]
    json: bool,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct ConvertOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// target format
    #[arg(long, value_enum)]
    to: FormatArg,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FormatArg { Json, Yaml, Ini, Toml }

impl From<FormatArg> for FormatTag {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => FormatTag::Json,
            FormatArg::Yaml => FormatTag::Yaml,
            FormatArg::Ini => FormatTag::Ini,
            FormatArg::Toml => FormatTag::Toml,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Accessor { Any, String, Int, Float, Bool, Array, Object, StringArray }

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl GlobalSettings {
    fn settings(&self, root_name: Option<&str>) -> Settings {
        let mut s = Settings {
            max_depth: self.max_depth,
            coerce_scalars: self.coerce,
            format_override: self.format.map(FormatTag::from),
            ..Settings::default()
        };
        if let Some(name) = root_name {
            s.root_name = name.to_string();
        }
        s
    }
}

impl InputSettings {
    /// Resolve, then parse every input in parallel. Order follows the inputs.
    fn load(&self, settings: &Settings) -> Result<Vec<ConfigDocument>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let candidates = source_paths.iter().cloned().map(Candidate::from_path);
        for (path, tag) in detect::classify(candidates) {
            if tag.is_none() && settings.format_override.is_none() {
                tracing::info!(path = %path.display(), "unknown extension, sniffing content");
            }
        }
        source_paths
            .par_iter()
            .map(|path| {
                ConfigDocument::load_with(path, settings)
                    .with_context(|| format!("failed to load {}", path.display()))
            })
            .collect()
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_logging(&self) {
        if self.global.no_color {
            colored::control::set_override(false);
        }
        if self.global.quiet {
            return;
        }
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| {
                match self.global.verbose {
                    0 => tracing_subscriber::EnvFilter::new("warn"),
                    1 => tracing_subscriber::EnvFilter::new("info"),
                    2 => tracing_subscriber::EnvFilter::new("debug"),
                    _ => tracing_subscriber::EnvFilter::new("trace"),
                }
            });
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Keys(target) => {
                let settings = self.global.settings(None);
                let docs = target.input_settings.load(&settings)?;
                let many = docs.len() > 1;
                for doc in &docs {
                    if many { print_header(doc); }
                    for key in conf_osi::keys::enumerate_with_depth(doc.root(), settings.max_depth) {
                        println!("{}", key.cyan());
                    }
                }
            }
            Command::Get(target) => {
                let settings = self.global.settings(None);
                let docs = target.input_settings.load(&settings)?;
                let many = docs.len() > 1;
                for doc in &docs {
                    let rendered = lookup(doc.root(), &target.path, target.accessor)
                        .with_context(|| format!("in {}", origin_label(doc)))?;
                    if many {
                        println!("{}: {rendered}", origin_label(doc).bold());
                    } else {
                        println!("{rendered}");
                    }
                }
            }
            Command::Tree(target) => {
                let settings = self.global.settings(None);
                let docs = target.input_settings.load(&settings)?;
                for doc in &docs {
                    print_header(doc);
                    print!("{}", conf_osi::render::tree(doc.root()));
                }
            }
            Command::Schema(target) => {
                let settings = self.global.settings(Some(&target.root_type));
                let docs = target.input_settings.load(&settings)?;

                // fold sequentially: the registry is first-wins across documents
                let mut inf = Inference::new().with_max_depth(settings.max_depth);
                for doc in &docs {
                    inf.observe(doc.root(), &settings.root_name)
                        .with_context(|| format!("schema inference failed for {}", origin_label(doc)))?;
                }
                let registry = inf.into_registry();

                let src = if target.json {
                    serde_json::to_string_pretty(&registry)?
                } else {
                    let mut cg = Codegen::new();
                    cg.emit(&registry);
                    cg.into_string()
                };
                write_output(target.out.as_deref(), &src)?;
            }
            Command::Convert(target) => {
                let settings = self.global.settings(None);
                let docs = target.input_settings.load(&settings)?;
                let [doc] = docs.as_slice() else {
                    bail!("convert takes exactly one input, got {}", docs.len());
                };
                let text = doc.emit(target.to.into())
                    .with_context(|| format!("failed to convert {}", origin_label(doc)))?;
                write_output(target.out.as_deref(), &text)?;
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn lookup(root: &DynamicValue, path: &str, accessor: Accessor) -> conf_osi::Result<String> {
    Ok(match accessor {
        Accessor::Any => match root.get(path) {
            Some(v) => v.to_string(),
            None => return Err(conf_osi::Error::KeyNotFound { path: path.to_string() }),
        },
        Accessor::String => root.get_string(path)?.to_string(),
        Accessor::Int => root.get_int(path)?.to_string(),
        Accessor::Float => root.get_float(path)?.to_string(),
        Accessor::Bool => root.get_bool(path)?.to_string(),
        Accessor::Array => DynamicValue::Array(root.get_array(path)?.to_vec()).to_string(),
        Accessor::Object => DynamicValue::Object(root.get_object(path)?.clone()).to_string(),
        Accessor::StringArray => root.get_string_array(path)?.join("\n"),
    })
}

fn origin_label(doc: &ConfigDocument) -> String {
    doc.origin()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string())
}

fn print_header(doc: &ConfigDocument) {
    println!("{} {}", format!("==> {}", origin_label(doc)).bold(), format!("({})", doc.format()).dimmed());
}

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
    } else {
        println!("{src}");
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
