//! `sysdash clear-history`.

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::Context;

pub async fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.client.clear_history().await?;
    if !global.quiet {
        eprintln!("Network history cleared");
    }
    Ok(())
}
