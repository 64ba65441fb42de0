use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = timesheet_import_jira::args::parse();
    timesheet_import_jira::cli::main(args).await
}
