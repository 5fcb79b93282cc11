use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use svg_icon::{Attributes, Config, MissingIconPolicy, SvgIcon};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "svg-icon")]
#[command(about = "Render SVG icons from configured icon packs as inline markup")]
struct Cli {
    /// Icon pack configuration file
    #[arg(short, long, global = true, default_value = "svg_icon.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the markup for one icon
    Render {
        /// Icon pack name
        pack: String,

        /// Icon name (filename without extension)
        name: String,

        /// Attribute override, e.g. `-a class=icon`
        #[arg(short, long = "attr", value_parser = parse_pair)]
        attributes: Vec<(String, String)>,

        /// Style override, e.g. `-s fill=red`
        #[arg(short, long = "style", value_parser = parse_pair)]
        styles: Vec<(String, String)>,

        /// Prefix the output with an XML declaration
        #[arg(long)]
        xml_header: bool,

        /// Fail on a missing icon instead of printing the fallback glyph
        #[arg(long)]
        strict: bool,
    },

    /// List the icons available in a pack
    List {
        /// Icon pack name
        pack: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = load_config(&cli.config)?;

    match cli.command {
        Commands::Render {
            pack,
            name,
            attributes,
            styles,
            xml_header,
            strict,
        } => {
            if strict {
                config.missing_icon = MissingIconPolicy::Error;
            }
            let icons = SvgIcon::new(config)?;
            let attributes: Attributes = attributes.into_iter().collect();
            let styles: Attributes = styles.into_iter().collect();

            let markup = icons.render(&pack, &name, &attributes, &styles, xml_header)?;

            println!("{markup}");
        }
        Commands::List { pack } => {
            let icons = SvgIcon::new(config)?;
            let names = icons.resolver().available_icons(&pack)?;

            if names.is_empty() {
                anyhow::bail!("No SVG files found for pack {pack}");
            }

            for name in &names {
                println!("{name}");
            }
            tracing::info!("{} icons in {}", names.len(), pack);
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;

    if key.is_empty() {
        return Err(format!("missing key in `{s}`"));
    }

    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("viewBox=0 0 24 24"),
            Ok(("viewBox".to_string(), "0 0 24 24".to_string()))
        );
        assert_eq!(parse_pair("data-x=a=b").unwrap().1, "a=b");
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "svg-icon", "render", "mdi", "home", "-a", "class=icon", "-s", "fill=red", "--strict",
        ])
        .unwrap();

        match cli.command {
            Commands::Render {
                pack,
                name,
                attributes,
                styles,
                strict,
                xml_header,
            } => {
                assert_eq!((pack.as_str(), name.as_str()), ("mdi", "home"));
                assert_eq!(attributes, vec![("class".to_string(), "icon".to_string())]);
                assert_eq!(styles, vec![("fill".to_string(), "red".to_string())]);
                assert!(strict);
                assert!(!xml_header);
            }
            Commands::List { .. } => panic!("expected render"),
        }
        assert_eq!(cli.config, PathBuf::from("svg_icon.toml"));
    }
}
