//! `sysdash power-plan <plan>`.

use std::sync::Arc;

use sysdash_core::{ActionDispatcher, NetworkStateStore, PowerPlan};

use crate::cli::{GlobalOpts, PowerPlanArg, PowerPlanArgs};
use crate::error::CliError;

use super::Context;

fn to_plan(arg: PowerPlanArg) -> PowerPlan {
    match arg {
        PowerPlanArg::HighPerformance => PowerPlan::HighPerformance,
        PowerPlanArg::Balanced => PowerPlan::Balanced,
        PowerPlanArg::PowerSaver => PowerPlan::PowerSaver,
    }
}

pub async fn handle(
    ctx: &Context,
    args: &PowerPlanArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let plan = to_plan(args.plan);
    let dispatcher = ActionDispatcher::new(Arc::clone(&ctx.client), NetworkStateStore::new());
    let ack = dispatcher.set_power_plan(plan).await?;

    if !global.quiet {
        let message = ack
            .message
            .unwrap_or_else(|| format!("Power plan set to {plan}"));
        eprintln!("{message}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_args_map_to_wire_labels() {
        assert_eq!(to_plan(PowerPlanArg::HighPerformance).to_string(), "High Performance");
        assert_eq!(to_plan(PowerPlanArg::PowerSaver).to_string(), "Power Saver");
    }
}
