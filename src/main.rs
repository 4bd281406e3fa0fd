use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use villa_press::page::{HttpTransport, LeadForm, NoopTracker, SubmitOutcome};
use villa_press::{config, output, pipeline, render};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "villa-press")]
#[command(about = "Static site generator for single-property rental sites")]
#[command(long_about = "\
Static site generator for single-property rental sites

One property.toml describes the property: the carousel slides, the rent
periods, the lead form's fields, the copy. A directory of original
photographs becomes three web-optimized AVIF variants per image, and the
output is a plain static site: landing page, privacy page, 404.

Expected layout (all paths overridable):

  property.toml              # Site configuration
  image-config.json          # Per-image crop offsets and qualities
  assets/originals/          # Original photographs (jpg, jpeg, png)
  optimized/                 # Pipeline output (AVIF variants)
  dist/                      # Generated site

Slide ids in property.toml double as URL fragment anchors and as image base
names: a slide with id \"pool\" deep-links as #pool and renders
pool-{small,medium,large}.avif.

Run 'villa-press gen-config' to print a documented property.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Property configuration file
    #[arg(long, default_value = "property.toml", global = true)]
    property: PathBuf,

    /// Image settings document for the pipeline
    #[arg(long, default_value = "image-config.json", global = true)]
    image_config: PathBuf,

    /// Directory of original photographs
    #[arg(long, default_value = "assets/originals", global = true)]
    originals: PathBuf,

    /// Directory for optimized image variants
    #[arg(long, default_value = "optimized", global = true)]
    optimized: PathBuf,

    /// Output directory for the generated site
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert original photographs into web-optimized AVIF variants
    Optimize,
    /// Produce the static site from property.toml and the optimized images
    Generate,
    /// Run the full pipeline: optimize → generate
    Build,
    /// Validate configuration without writing output
    Check,
    /// Print a stock property.toml with all options documented
    GenConfig,
    /// Submit a test inquiry through the configured mail-relay endpoint
    Inquire(InquireArgs),
}

#[derive(Args)]
struct InquireArgs {
    /// Site origin the relative endpoint hangs off, e.g. https://example.com
    #[arg(long)]
    base_url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    message: String,

    /// Rent period id from property.toml
    #[arg(long)]
    period: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Optimize => {
            let report = pipeline::optimize(&cli.image_config, &cli.originals, &cli.optimized)?;
            output::print_optimize_report(&report);
        }
        Command::Generate => {
            let config = config::load_config(&cli.property)?;
            let summary = render::generate(&config, &cli.optimized, &cli.output)?;
            output::print_generate_summary(&summary);
        }
        Command::Build => {
            println!("==> Stage 1: Optimizing {}", cli.originals.display());
            let report = pipeline::optimize(&cli.image_config, &cli.originals, &cli.optimized)?;
            output::print_optimize_report(&report);

            println!("==> Stage 2: Generating site → {}", cli.output.display());
            let config = config::load_config(&cli.property)?;
            let summary = render::generate(&config, &cli.optimized, &cli.output)?;
            output::print_generate_summary(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let config = config::load_config(&cli.property)?;
            println!(
                "Property config OK: {} slides, {} rent periods",
                config.slides.len(),
                config.rent_periods.len()
            );
            if cli.image_config.exists() {
                let settings = pipeline::load_settings(&cli.image_config)?;
                println!(
                    "Image settings OK: blur {}, speed {}",
                    settings.defaults.blur.sigma,
                    settings.defaults.speed.value()
                );
            } else {
                println!(
                    "Image settings not found at {} (optimize will fail without it)",
                    cli.image_config.display()
                );
            }
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Inquire(args) => {
            let config = config::load_config(&cli.property)?;
            let mut form = LeadForm::with_fields(
                args.name,
                args.email,
                args.phone,
                args.message,
                args.period,
            );
            let transport = HttpTransport::new(args.base_url);
            match form.submit(&config, &transport, &NoopTracker) {
                SubmitOutcome::Sent => println!("Inquiry delivered"),
                SubmitOutcome::Failed(reason) => {
                    eprintln!("Inquiry failed: {reason}");
                    std::process::exit(1);
                }
                SubmitOutcome::Rejected(errors) => {
                    for error in errors {
                        eprintln!("{}: {}", error.field, error.message);
                    }
                    std::process::exit(1);
                }
                SubmitOutcome::AlreadyInFlight => unreachable!("fresh form"),
            }
        }
    }

    Ok(())
}
