//! Command implementations

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::Settings;
use crate::app::{AppContainer, CutRequest, RenameInteractor, SplitRequest};
use crate::cli::args::{CutArgs, RenameArgs, SegmentArgs, SplitArgs};
use crate::cli::{Cli, Commands};
use crate::domain::errors::ExecError;
use crate::domain::model::CommandPlan;
use crate::error::FfkitError;

/// Run the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rename(args) => rename(args),
        Commands::Cut(args) => {
            let container = build_container(cli.settings, cli.ffmpeg, cli.ffprobe)?;
            cut(&container, args)
        }
        Commands::Split(args) => {
            let container = build_container(cli.settings, cli.ffmpeg, cli.ffprobe)?;
            split(&container, args)
        }
    }
}

/// Load settings and apply tool overrides from flags or environment
fn build_container(
    settings_path: Option<PathBuf>,
    ffmpeg: Option<String>,
    ffprobe: Option<String>,
) -> Result<AppContainer> {
    let mut settings = Settings::load(settings_path.as_deref())?;
    if let Some(ffmpeg) = ffmpeg {
        settings.tools.ffmpeg = ffmpeg;
    }
    if let Some(ffprobe) = ffprobe {
        settings.tools.ffprobe = ffprobe;
    }
    Ok(AppContainer::new(settings))
}

/// Execute the cut command
pub fn cut(container: &AppContainer, args: CutArgs) -> Result<()> {
    let source = require_source(&args.segments)?;

    let mut profile = container.encoder_profile();
    if let Some(encoder) = args.encoder {
        profile.codec = encoder;
    }
    if !args.encoder_args.is_empty() {
        profile.extra_args = args.encoder_args;
    }
    if let Some(extension) = args.container {
        profile.container = extension;
    }

    let request = CutRequest {
        source,
        config: args.segments.config.clone(),
        dest_dir: args.segments.output.clone(),
        source_bitrate: args.source_bitrate,
    };

    info!("Starting cut operation");
    let plan = container
        .cut_interactor(profile, args.segments.overwrite)
        .plan(&request)
        .with_context(|| format!("cannot plan cut of {}", request.source.display()))?;

    present_and_dispatch(container, &CommandPlan::from(plan), &args.segments)
}

/// Execute the split command
pub fn split(container: &AppContainer, args: SplitArgs) -> Result<()> {
    let source = require_source(&args.segments)?;

    let request = SplitRequest {
        source,
        config: args.segments.config.clone(),
        dest_dir: args.segments.output.clone(),
    };

    info!("Starting split operation");
    let plan = container
        .split_interactor(args.segments.overwrite)
        .plan(&request)
        .with_context(|| format!("cannot plan split of {}", request.source.display()))?;

    present_and_dispatch(container, &CommandPlan::from(plan), &args.segments)
}

/// Execute the rename command
pub fn rename(args: RenameArgs) -> Result<()> {
    let plan = RenameInteractor::plan(&args.files)?;

    println!("Going to rename according:");
    for (old, new) in &plan {
        println!("{} -> {}", old.display(), new.display());
    }

    if args.dry_run {
        return Ok(());
    }

    if !args.yes {
        println!("----- Are you sure? -----");
        print!("Input [Y] to confirm > ");
        std::io::stdout().flush().context("failed to flush stdout")?;
        RenameInteractor::confirm(&mut std::io::stdin().lock())?;
    }

    RenameInteractor::apply(&plan)?;
    println!("Done");
    Ok(())
}

fn require_source(args: &SegmentArgs) -> Result<PathBuf> {
    let source = args
        .source
        .clone()
        .context("Required argument <SOURCE> is not given")?;
    if !source.exists() {
        warn!(source = %source.display(), "source file does not exist");
    }
    Ok(source)
}

/// Print the plan, then run it unless this is a dry run
fn present_and_dispatch(container: &AppContainer, plan: &CommandPlan, args: &SegmentArgs) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(plan).context("failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        println!("Going to execute the following commands:");
        for command in plan.commands() {
            println!("{}", command);
        }
    }

    if args.dry_run {
        info!("Dry run, nothing executed");
        return Ok(());
    }

    let report = container.dispatcher().dispatch(plan)?;
    info!(completed = report.completed, "Dispatch completed successfully");
    Ok(())
}

/// Process exit code for a failed run
///
/// Passes through the exit code of a failed external command, otherwise 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .chain()
        .find_map(|cause| {
            if let Some(err) = cause.downcast_ref::<FfkitError>() {
                Some(err.exit_code())
            } else if let Some(ExecError::NonZeroExit {
                code: Some(code), ..
            }) = cause.downcast_ref::<ExecError>()
            {
                Some(*code)
            } else {
                None
            }
        })
        .unwrap_or(1);

    u8::try_from(code).ok().filter(|code| *code != 0).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::PlanError;

    #[test]
    fn test_exit_code_from_context_wrapped_error() {
        let err = anyhow::Error::from(FfkitError::from(ExecError::NonZeroExit {
            program: "ffmpeg".to_string(),
            code: Some(2),
            output: PathBuf::from("x.mp4"),
        }))
        .context("while cutting");
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_exit_code_plain_errors() {
        let err = anyhow::Error::from(FfkitError::from(PlanError::EmptySegmentList));
        assert_eq!(exit_code(&err), 1);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }

    #[test]
    fn test_exit_code_out_of_range() {
        let err = anyhow::Error::from(FfkitError::from(ExecError::NonZeroExit {
            program: "ffmpeg".to_string(),
            code: Some(256),
            output: PathBuf::from("x.mp4"),
        }));
        assert_eq!(exit_code(&err), 1);
    }
}
