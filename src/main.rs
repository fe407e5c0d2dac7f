mod cli;
mod config;
mod fsops;
mod logging;
mod prune;
mod runner;

fn main() -> anyhow::Result<()> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app)
}
