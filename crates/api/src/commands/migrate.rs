//! Migrate command - Database migration management.

use crate::cli::args::MigrateArgs;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running migration command: {:?}", args.action);
    user_service_lib::run_migrations(args.action.into()).await
}
