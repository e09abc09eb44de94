use std::time::Instant;

use quire::error::Result;

mod config;
mod flags;
mod logging;

pub fn main() {
    let flags = flags::Quill::from_env_or_exit();
    logging::init_logging(flags.quiet);

    if let Err(e) = run(&flags) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(flags: &flags::Quill) -> Result<()> {
    let start = Instant::now();
    let site = config::discover(flags)?;
    let report = site.build()?;

    log::info!("generated {} posts in {}", report.posts, site.output_dir().join("blog").display());
    log::debug!(
        "wrote {} pages and copied {} files in {}ms",
        report.pages,
        report.copied,
        start.elapsed().as_millis()
    );

    Ok(())
}
