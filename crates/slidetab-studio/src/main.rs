mod raster;
mod session;
mod studio;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, anyhow};

use slidetab_engine::logging::{LoggingConfig, init_logging};
use slidetab_ui::prelude::{Theme, ThemeMode};

use crate::session::Session;
use crate::studio::Studio;

const DEMO_SESSION: &str = include_str!("../sessions/demo.toml");

const HELP: &str = "\
slidetab-studio: run a segmented-control session and snapshot it to PNG

USAGE:
  slidetab-studio [OPTIONS] [SESSION.toml]

Without SESSION the bundled demo session runs.

OPTIONS:
  -o, --out DIR        snapshot directory [default: snapshots]
      --theme MODE     light | dark | auto [default: auto]
  -v, --verbose        debug logging for the slidetab crates
  -h, --help           print this help
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ThemeChoice {
    Light,
    Dark,
    #[default]
    Auto,
}

impl FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown theme '{other}', expected light, dark or auto")),
        }
    }
}

impl ThemeChoice {
    fn resolve(self) -> Theme {
        let mode = match self {
            Self::Light => ThemeMode::Light,
            Self::Dark => ThemeMode::Dark,
            Self::Auto => match dark_light::detect() {
                Ok(dark_light::Mode::Dark) => ThemeMode::Dark,
                Ok(_) => ThemeMode::Light,
                Err(err) => {
                    log::debug!("system theme detection failed: {err}; using light");
                    ThemeMode::Light
                }
            },
        };
        Theme::for_mode(mode)
    }
}

#[derive(Debug)]
struct Args {
    help: bool,
    verbose: bool,
    out: PathBuf,
    theme: ThemeChoice,
    session: Option<PathBuf>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut args = pico_args::Arguments::from_env();
        let parsed = Self {
            help: args.contains(["-h", "--help"]),
            verbose: args.contains(["-v", "--verbose"]),
            out: args
                .opt_value_from_str(["-o", "--out"])?
                .unwrap_or_else(|| PathBuf::from("snapshots")),
            theme: args.opt_value_from_str("--theme")?.unwrap_or_default(),
            session: args.opt_free_from_str()?,
        };
        let rest = args.finish();
        if !rest.is_empty() {
            return Err(anyhow!("unexpected arguments: {rest:?}"));
        }
        Ok(parsed)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse()?;
    if args.help {
        print!("{HELP}");
        return Ok(());
    }
    init_logging(if args.verbose { LoggingConfig::verbose() } else { LoggingConfig::default() });

    let session = match args.session.as_deref() {
        Some(path) => Session::load(path)?,
        None => Session::parse(DEMO_SESSION).context("bundled demo session")?,
    };
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;

    let theme = args.theme.resolve();
    log::info!("theme: {:?}", theme.mode);

    let font = load_font();
    let mut studio = Studio::new(&session, &theme, font.as_deref())?;
    studio.run(&session.script, &args.out)?;

    println!(
        "{} frame(s), {} value change(s): {:?}",
        studio.frames(),
        studio.changes().len(),
        studio.changes()
    );
    Ok(())
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\segoeui.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_choice_parses_case_insensitively() {
        assert_eq!("Dark".parse::<ThemeChoice>(), Ok(ThemeChoice::Dark));
        assert_eq!("auto".parse::<ThemeChoice>(), Ok(ThemeChoice::Auto));
        assert!("sepia".parse::<ThemeChoice>().is_err());
    }

    #[test]
    fn explicit_choices_skip_detection() {
        assert_eq!(ThemeChoice::Dark.resolve(), Theme::dark());
        assert_eq!(ThemeChoice::Light.resolve(), Theme::light());
    }
}
