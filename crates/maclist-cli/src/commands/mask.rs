use anyhow::{Context, Result};
use maclist_config::{Config, Overrides};
use maclist_core::{MaskOutcome, MaskReport, Masker};

use crate::cli::MaskArgs;

pub fn handle(args: MaskArgs, config: Config) -> Result<()> {
    let report = run(args, config)?;

    match report.outcome {
        MaskOutcome::Masked { entries } => println!(
            "✓ Masked {} entries: {}",
            entries,
            report.output.display()
        ),
        MaskOutcome::Absent => println!(
            "✓ No \"data\" field, copied as is: {}",
            report.output.display()
        ),
        MaskOutcome::Skipped { found } => println!(
            "✓ \"data\" is {}, left untouched: {}",
            found,
            report.output.display()
        ),
    }

    Ok(())
}

fn run(args: MaskArgs, config: Config) -> Result<MaskReport> {
    let config = config.with_overrides(Overrides {
        input_path: args.input,
        output_path: args.output,
        placeholder: args.placeholder,
        on_unexpected_shape: args.on_unexpected_shape,
    });

    let masker = Masker::new(config.mask_options());
    masker
        .mask_file(&config.input_path, &config.output_path)
        .with_context(|| format!("Failed to mask {}", config.input_path.display()))
}
