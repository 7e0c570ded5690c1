// macprobe/src/cli/adobe.rs
use clap::Args;
use colored::Colorize;
use macprobe_common::config::Config;
use macprobe_common::error::{MacProbeError, Result};
use macprobe_core::{AdobeApplication, AdobeResolver, ProductCatalog};
use serde_json::json;

#[derive(Args, Debug)]
pub struct Adobe {
    /// Product slug, optionally with an embedded year (e.g. photoshop-2022)
    #[arg(required_unless_present = "list")]
    pub slug: Option<String>,

    /// Restrict the lookup to one release year
    #[arg(short, long)]
    pub year: Option<String>,

    /// Print the resolved descriptor as JSON
    #[arg(long)]
    pub json: bool,

    /// Print only the uninstall invocation for the resolved application
    #[arg(long)]
    pub uninstall_command: bool,

    /// List the curated product slugs and exit
    #[arg(long)]
    pub list: bool,
}

impl Adobe {
    pub fn run(&self, config: &Config) -> Result<()> {
        let catalog = ProductCatalog::load()?;

        if self.list {
            for slug in catalog.slugs() {
                println!("{slug}");
            }
            return Ok(());
        }

        // clap enforces the slug unless --list was given
        let Some(slug) = self.slug.as_deref() else {
            return Err(MacProbeError::Generic("a product slug is required".to_string()));
        };
        let resolver = AdobeResolver::new(config.clone(), catalog);
        let Some(app) = resolver.resolve_by_slug(slug, self.year.as_deref()) else {
            eprintln!(
                "{} no installed application matches '{}'{}",
                "Not found:".yellow().bold(),
                slug,
                self.year
                    .as_deref()
                    .map(|y| format!(" ({y})"))
                    .unwrap_or_default()
            );
            return Err(MacProbeError::NotFound(slug.to_string()));
        };

        if self.uninstall_command {
            println!("{}", app.uninstall_command()?);
            return Ok(());
        }

        if self.json {
            print_json(&app);
        } else {
            print_human(&app);
        }
        Ok(())
    }
}

fn print_json(app: &AdobeApplication) {
    let value = json!({
        "path": app.pathname(),
        "productName": app.product_name(),
        "slug": app.slug(),
        "year": app.year(),
        "isCC": app.is_cc(),
        "sap": app.sap(),
        "baseVersion": app.base_version().map(|v| v.raw()),
        "bundleShortVersion": app.bundle_short_version().map(|v| v.raw()),
        "preferencePaths": app.preference_paths(),
    });
    println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
}

fn print_human(app: &AdobeApplication) {
    let unknown = || "unknown".dimmed().to_string();
    println!("{} {}", "Path:".bold(), app.pathname().display());
    println!(
        "{} {}",
        "Product:".bold(),
        app.product_name().map_or_else(unknown, str::to_string)
    );
    println!(
        "{} {}",
        "Slug:".bold(),
        app.slug().map_or_else(unknown, str::to_string)
    );
    println!(
        "{} {}",
        "Year:".bold(),
        app.year().map_or_else(unknown, str::to_string)
    );
    println!(
        "{} {}",
        "CC branded:".bold(),
        app.is_cc().map_or_else(unknown, |cc| cc.to_string())
    );
    println!(
        "{} {}",
        "SAP code:".bold(),
        app.sap().map_or_else(unknown, str::to_string)
    );
    println!(
        "{} {}",
        "Base version:".bold(),
        app.base_version().map_or_else(unknown, |v| v.raw().to_string())
    );
    let prefs = app.preference_paths();
    if !prefs.is_empty() {
        println!("{}", "Preference paths:".bold());
        for path in prefs {
            println!("  {path}");
        }
    }
    match app.uninstall_command() {
        Ok(command) => println!("{} {}", "Uninstall:".bold(), command),
        Err(e) => println!("{} {}", "Uninstall:".bold(), e.to_string().dimmed()),
    }
}
