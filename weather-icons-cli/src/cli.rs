use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use std::{fs, path::PathBuf};
use weather_icons_core::{
    Config, ConditionCode, ConditionPayload, IconRequest, IconResolver, ResolvedIcon, TimeOfDay,
    Variation,
    astro::parse_astro_time,
    preload::{HttpFetcher, Preloader},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-icons", version, about = "Weather condition icon resolver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the icon for a condition code.
    Resolve {
        /// Condition code, e.g. 1000 for "Sunny". Unreadable values resolve as clear.
        #[arg(allow_hyphen_values = true)]
        code: String,

        /// Use the night variant.
        #[arg(long)]
        night: bool,

        /// Icon style: "fill" or "line". Defaults to the configured variation.
        #[arg(long)]
        variation: Option<Variation>,

        /// Disable animated assets.
        #[arg(long)]
        no_animation: bool,

        /// Never use the GIF loops.
        #[arg(long)]
        no_gif: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Resolve icons from a backend weather JSON file.
    ResolvePayload {
        file: PathBuf,

        /// Resolve every hourly forecast entry instead of the current conditions.
        #[arg(long)]
        forecast: bool,

        #[arg(long)]
        json: bool,
    },

    /// Check whether a condition has an animated icon.
    Supports { code: u32 },

    /// List every condition code with an icon mapping.
    List,

    /// Decide day or night from sunrise/sunset times.
    Daylight {
        /// Sunrise, "HH:MM" or "hh:mm AM".
        sunrise: String,

        /// Sunset, "HH:MM" or "hh:mm PM".
        sunset: String,

        /// Time to check; if absent, means "now" in local time.
        #[arg(long)]
        at: Option<String>,
    },

    /// Fetch icon assets once to warm caches.
    Preload {
        /// Condition codes; all known codes when empty.
        codes: Vec<u32>,

        #[arg(long)]
        variation: Option<Variation>,

        /// Also fetch each entry's fallback asset.
        #[arg(long)]
        fallback: bool,

        /// Origin serving the assets; overrides the configured one.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Store default preferences.
    Configure {
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        variation: Option<Variation>,

        /// Preload timeout per asset, in seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let resolver = IconResolver::builtin();

        match self.command {
            Command::Resolve { code, night, variation, no_animation, no_gif, json } => {
                let raw_code = code.trim().parse::<f64>().ok();
                let mut request = config.apply(IconRequest::new(
                    ConditionCode::normalize(raw_code),
                    TimeOfDay::from(!night),
                ));

                if let Some(variation) = variation {
                    request = request.variation(variation);
                }
                if no_animation {
                    request = request.enable_animation(false);
                }
                if no_gif {
                    request = request.prefer_gif(false);
                }

                print_icons(&[resolver.resolve(&request)], json)?;
            }
            Command::ResolvePayload { file, forecast, json } => {
                let contents = fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read payload file: {}", file.display()))?;

                let payloads = if forecast {
                    ConditionPayload::forecast_hours(&contents)?
                } else {
                    vec![ConditionPayload::from_json(&contents)?]
                };

                let icons: Vec<ResolvedIcon> = payloads
                    .iter()
                    .map(|p| resolver.resolve(&config.apply(p.to_request())))
                    .collect();

                print_icons(&icons, json)?;
            }
            Command::Supports { code } => {
                let code = ConditionCode::new(code);
                let supported = resolver.supports_animation(code);
                println!("{code}: {}", if supported { "animated" } else { "static" });
            }
            Command::List => {
                for code in resolver.list_known_codes() {
                    println!("{code}\t{}", resolver.describe(code, TimeOfDay::Day));
                }
            }
            Command::Daylight { sunrise, sunset, at } => {
                let now = match at {
                    Some(at) => parse_astro_time(&at)
                        .ok_or_else(|| anyhow!("Invalid time '{at}'. Expected HH:MM or hh:mm AM/PM."))?,
                    None => Local::now().time(),
                };

                println!("{}", TimeOfDay::from_astro(now, &sunrise, &sunset));
            }
            Command::Preload { codes, variation, fallback, base_url } => {
                let base_url = match base_url {
                    Some(url) => url,
                    None => config.asset_base_url()?.to_string(),
                };

                let codes: Vec<ConditionCode> = if codes.is_empty() {
                    resolver.list_known_codes()
                } else {
                    codes.into_iter().map(ConditionCode::new).collect()
                };

                let fetcher = HttpFetcher::new(base_url, config.fetch_timeout())?;
                let preloader = Preloader::new(fetcher);
                let variation = variation.unwrap_or(config.default_variation);

                let report = preloader.preload(&codes, variation, fallback).await;

                println!("Preloaded {}/{} assets", report.loaded.len(), report.attempted);
                for (path, error) in &report.failed {
                    println!("  failed: {path} ({error})");
                }
            }
            Command::Configure { base_url, variation, timeout } => {
                let mut config = config;
                let interactive = base_url.is_none() && variation.is_none() && timeout.is_none();

                if interactive {
                    let mut prompt = Text::new("Asset base URL:");
                    if let Some(current) = config.asset_base_url.as_deref() {
                        prompt = prompt.with_default(current);
                    }
                    let url = prompt.prompt().context("Failed to read asset base URL")?;
                    config.asset_base_url = Some(url.trim().to_string()).filter(|u| !u.is_empty());

                    config.default_variation = Select::new("Icon style:", Variation::all().to_vec())
                        .prompt()
                        .context("Failed to read icon style")?;
                } else {
                    if let Some(url) = base_url {
                        config.asset_base_url = Some(url);
                    }
                    if let Some(variation) = variation {
                        config.default_variation = variation;
                    }
                    if timeout.is_some() {
                        config.fetch_timeout_secs = timeout;
                    }
                }

                config.save()?;
                println!("Saved configuration to {}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn print_icons(icons: &[ResolvedIcon], json: bool) -> anyhow::Result<()> {
    if json {
        let out = match icons {
            [single] => serde_json::to_string_pretty(single),
            _ => serde_json::to_string_pretty(icons),
        }
        .context("Failed to serialize resolved icons")?;
        println!("{out}");
        return Ok(());
    }

    for icon in icons {
        let mut flags = Vec::new();
        if icon.is_gif {
            flags.push("gif");
        }
        if icon.is_default {
            flags.push("default");
        }

        if flags.is_empty() {
            println!("{}\t{}", icon.path, icon.description);
        } else {
            println!("{}\t{}\t[{}]", icon.path, icon.description, flags.join(", "));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve_flags() {
        let cli = Cli::try_parse_from([
            "weather-icons", "resolve", "1195", "--night", "--variation", "line", "--no-gif",
        ])
        .unwrap();

        match cli.command {
            Command::Resolve { code, night, variation, no_animation, no_gif, json } => {
                assert_eq!(code, "1195");
                assert!(night);
                assert_eq!(variation, Some(Variation::Line));
                assert!(!no_animation);
                assert!(no_gif);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_variation() {
        let err = Cli::try_parse_from(["weather-icons", "resolve", "1000", "--variation", "outline"]);
        assert!(err.is_err());
    }

    #[test]
    fn preload_codes_are_optional() {
        let cli = Cli::try_parse_from(["weather-icons", "preload", "--base-url", "http://x"]).unwrap();
        match cli.command {
            Command::Preload { codes, base_url, .. } => {
                assert!(codes.is_empty());
                assert_eq!(base_url.as_deref(), Some("http://x"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
