use crate::analysis::Report;
use crate::config::{Config, Format, Series};
use anyhow::{Context, Result};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};

const CONFIG_FILE: &str = "config.toml";

/// Drives the analysis of every series file in a data directory.
pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join(CONFIG_FILE)).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    pub fn run_analysis(&self) -> Result<()> {
        let series_files = self.series_files().context("failed to collect series files")?;
        if series_files.is_empty() {
            log::warn!("no series files match {:?}", self.cfg.input.pattern);
        }

        for series_file in series_files {
            let series = Series::from_file(&series_file)
                .with_context(|| format!("failed to load {series_file:?}"))?;

            let report = Report::new(&series)
                .with_context(|| format!("failed to analyze {series_file:?}"))?;

            let results_file = results_file(&series_file, self.cfg.output.format);
            report
                .save(&results_file, self.cfg.output.format)
                .context("failed to save results")?;
            log::info!("saved {results_file:?}");
        }

        Ok(())
    }

    pub fn clean_results(&self) -> Result<()> {
        let series_files = self.series_files().context("failed to collect series files")?;
        for series_file in series_files {
            for format in [Format::Json, Format::Msgpack] {
                let results_file = results_file(&series_file, format);
                if !results_file.is_file() {
                    continue;
                }
                fs::remove_file(&results_file)
                    .with_context(|| format!("failed to remove {results_file:?}"))?;
                log::info!("removed {results_file:?}");
            }
        }

        Ok(())
    }

    fn series_files(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.data_dir.join(&self.cfg.input.pattern);
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let config_file = self.data_dir.join(CONFIG_FILE);
        let mut files: Vec<_> = glob(pattern)
            .context("failed to glob series files")?
            .filter_map(Result::ok)
            .filter(|p| p.is_file() && !is_results_file(p) && *p != config_file)
            .collect();
        files.sort();
        Ok(files)
    }
}

fn results_file(series_file: &Path, format: Format) -> PathBuf {
    let ext = format.extension();
    series_file.with_extension(format!("results.{ext}"))
}

fn is_results_file(file: &Path) -> bool {
    file.file_stem()
        .and_then(|stem| Path::new(stem).extension())
        .is_some_and(|ext| ext == "results")
}
