//! Marks command - show the threshold table for a document height.

use clap::Args;

use scrolldepth::tracker::{percentage_marks, PIXEL_DEPTH_BUCKET};

use crate::error::CliError;

/// Arguments for the marks command.
#[derive(Debug, Args)]
pub struct MarksArgs {
    /// Document height in layout pixels
    pub document_height: u64,

    /// Viewport height in layout pixels (to show scroll-top trigger points)
    #[arg(long, default_value_t = 0)]
    pub viewport_height: u64,
}

/// Run the marks command.
pub fn run(args: MarksArgs) -> Result<(), CliError> {
    println!("Percentage marks for a {}px document:", args.document_height);
    for (mark, threshold) in percentage_marks(args.document_height) {
        if args.viewport_height > 0 {
            let trigger = threshold.saturating_sub(args.viewport_height);
            println!(
                "  {:>4}  fires at distance {:>7}px  (scroll top {:>7}px with a {}px viewport)",
                mark.label(),
                threshold,
                trigger,
                args.viewport_height
            );
        } else {
            println!("  {:>4}  fires at distance {:>7}px", mark.label(), threshold);
        }
    }
    println!();
    println!("Pixel-depth labels are bucketed to {}px.", PIXEL_DEPTH_BUCKET);
    Ok(())
}
