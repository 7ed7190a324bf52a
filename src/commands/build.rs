//! Build the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Blog;

/// Generate every page into the output directory
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(blog)?;
    let report = generator.generate()?;

    tracing::info!(
        "Generated {} posts and copied {} assets into {:?}",
        report.posts,
        report.assets,
        blog.output_dir
    );

    let duration = start.elapsed();
    tracing::info!("Completed in {:.2}s", duration.as_secs_f64());

    Ok(())
}
