use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(docket_practice_migration::Migrator).await;
}
