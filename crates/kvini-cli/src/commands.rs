use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use colored::Colorize;
use kvini_diff::{Discrepancy, IniDiff};
use kvini_store::{Ini, IniOptions, DEFAULT_SECTION};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let ctx = Ctx {
        format: cli.format,
        trim_quotes: cli.trim_quotes,
    };
    match cli.command {
        Command::Get(args) => cmd_get(&ctx, args),
        Command::Set(args) => cmd_set(&ctx, args),
        Command::Unset(args) => cmd_unset(&ctx, args),
        Command::Sections(args) => cmd_sections(&ctx, args),
        Command::Fmt(args) => cmd_fmt(&ctx, args),
        Command::Diff(args) => cmd_diff(&ctx, args),
    }
}

struct Ctx {
    format: OutputFormat,
    trim_quotes: bool,
}

impl Ctx {
    fn load(&self, path: &Path) -> anyhow::Result<Ini> {
        let mut ini = Ini::with_options(IniOptions::file().with_trim_quotes(self.trim_quotes));
        ini.parse_file(path)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(ini)
    }

    fn diff(&self, a: &Path, b: &Path) -> anyhow::Result<IniDiff> {
        let a = self.load(a)?;
        let b = self.load(b)?;
        Ok(kvini_diff::diff(&a, &b))
    }
}

fn section_label(section: &str) -> String {
    if section == DEFAULT_SECTION {
        "(default)".to_string()
    } else {
        format!("[{section}]")
    }
}

fn cmd_get(ctx: &Ctx, args: GetArgs) -> anyhow::Result<ExitCode> {
    let ini = ctx.load(&args.file)?;
    let (section, key) = (args.section.as_str(), args.key.as_str());

    let value = match args.value_type {
        ValueType::String => ini.section_get(section, key).map(serde_json::Value::from),
        ValueType::Int => ini.section_get_int(section, key).map(serde_json::Value::from),
        ValueType::Float => ini.section_get_float(section, key).map(serde_json::Value::from),
        ValueType::Bool => ini.section_get_bool(section, key).map(serde_json::Value::from),
    };
    let Some(value) = value else {
        bail!(
            "no {:?} value for `{}` in {}",
            args.value_type,
            key,
            section_label(section)
        );
    };

    match ctx.format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "section": section, "key": key, "value": value });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => match value {
            serde_json::Value::String(s) => println!("{s}"),
            other => println!("{other}"),
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_set(ctx: &Ctx, args: SetArgs) -> anyhow::Result<ExitCode> {
    let mut ini = ctx.load(&args.file)?;
    ini.section_set(&args.section, &args.key, &args.value);
    ini.write_file(&args.file)
        .with_context(|| format!("failed to write {}", args.file.display()))?;

    if ctx.format == OutputFormat::Text {
        println!(
            "{} Set {} {} = {}",
            "✓".green().bold(),
            section_label(&args.section).cyan(),
            args.key.bold(),
            args.value
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_unset(ctx: &Ctx, args: UnsetArgs) -> anyhow::Result<ExitCode> {
    let mut ini = ctx.load(&args.file)?;
    if !ini.delete(&args.section, &args.key) {
        bail!("`{}` not found in {}", args.key, section_label(&args.section));
    }
    ini.write_file(&args.file)
        .with_context(|| format!("failed to write {}", args.file.display()))?;

    if ctx.format == OutputFormat::Text {
        println!(
            "{} Removed {} {}",
            "✓".green().bold(),
            section_label(&args.section).cyan(),
            args.key.bold()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_sections(ctx: &Ctx, args: FileArgs) -> anyhow::Result<ExitCode> {
    let ini = ctx.load(&args.file)?;
    match ctx.format {
        OutputFormat::Json => {
            let names: Vec<&str> = ini.section_names().collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        OutputFormat::Text => {
            for name in ini.section_names() {
                let count = ini.section(name).map_or(0, |kv| kv.len());
                println!("{} ({} keys)", section_label(name).cyan(), count);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_fmt(ctx: &Ctx, args: FileArgs) -> anyhow::Result<ExitCode> {
    let ini = ctx.load(&args.file)?;
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(ini.sections())?),
        OutputFormat::Text => print!("{ini}"),
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_diff(ctx: &Ctx, args: DiffArgs) -> anyhow::Result<ExitCode> {
    let diff = ctx.diff(&args.a, &args.b)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text if diff.is_empty() => println!("{} No differences.", "✓".green()),
        OutputFormat::Text => {
            for line in render_diff(&diff) {
                println!("{line}");
            }
        }
    }

    Ok(if diff.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// One line per discrepancy, sorted by kind, section, and key.
fn render_diff(diff: &IniDiff) -> Vec<String> {
    let mut records: Vec<&Discrepancy> = diff.iter().collect();
    records.sort_by(|x, y| {
        (x.kind(), x.section(), x.key()).cmp(&(y.kind(), y.section(), y.key()))
    });
    records.into_iter().map(render_discrepancy).collect()
}

fn render_discrepancy(d: &Discrepancy) -> String {
    match d {
        Discrepancy::SectionOnlyInA { section } => {
            format!("{} {}", "-".red(), section_label(section).red())
        }
        Discrepancy::SectionOnlyInB { section } => {
            format!("{} {}", "+".green(), section_label(section).green())
        }
        Discrepancy::KeyOnlyInA {
            section,
            key,
            value,
        } => format!("{} {} {} = {}", "-".red(), section_label(section).cyan(), key.bold(), value.red()),
        Discrepancy::KeyOnlyInB {
            section,
            key,
            value,
        } => format!("{} {} {} = {}", "+".green(), section_label(section).cyan(), key.bold(), value.green()),
        Discrepancy::ValuesDiffer {
            section,
            key,
            a_value,
            b_value,
        } => format!(
            "{} {} {}: {} -> {}",
            "~".yellow(),
            section_label(section).cyan(),
            key.bold(),
            a_value.red(),
            b_value.green()
        ),
    }
}
