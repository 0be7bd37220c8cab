use crate::model::PetSeed;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0 = seed from the clock at startup.
    pub seed: u64,
    pub tick_ms: u64,
    /// How long a bubble stays on screen.
    pub bubble_ms: u64,
    pub fps_cap: u32,
    pub enable_color: bool,
    pub start_quiet: bool,
    pub log_filter: String,
    pub initial: PetSeed,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            tick_ms: 1000,
            bubble_ms: 6000,
            fps_cap: 30,
            enable_color: true,
            start_quiet: false,
            log_filter: "info".to_string(),
            initial: PetSeed::default(),
        }
    }
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.tick_ms = self.tick_ms.clamp(100, 10_000);
        self.bubble_ms = self.bubble_ms.clamp(1_000, 60_000);
        self.fps_cap = self.fps_cap.clamp(10, 240);
        if self.log_filter.trim().is_empty() {
            self.log_filter = "info".to_string();
        }
        self
    }

    /// Effective settings for this run: `--seed N` and `--quiet` layered over
    /// the file values. `self` is left as loaded so it can be saved unchanged.
    pub fn with_args<I, S>(&self, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = self.clone();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_ref() {
                "--quiet" | "-q" => out.start_quiet = true,
                "--seed" => {
                    let v = it.next().context("--seed needs a value")?;
                    out.seed = v
                        .as_ref()
                        .parse::<u64>()
                        .with_context(|| format!("bad --seed value {:?}", v.as_ref()))?;
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

pub struct Paths {
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "desk-cat", "DeskCat")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_path: dir.join("desk-cat.log"),
    })
}

/// Missing or broken files fall back to defaults.
pub fn load_settings(path: &Path) -> Settings {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Settings::default(),
    };
    match serde_json::from_str::<Settings>(&s) {
        Ok(v) => v.sanitized(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings");
            Settings::default()
        }
    }
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename-over-existing fails on Windows
    if cfg!(windows) && to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to).with_context(|| format!("renaming into {}", to.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("desk-cat-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("settings.json")
    }

    #[test]
    fn missing_file_gives_defaults() {
        let p = scratch("missing");
        let _ = fs::remove_file(&p);
        assert_eq!(load_settings(&p), Settings::default());
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let p = scratch("roundtrip");
        let mut s = Settings::default();
        s.seed = 99;
        s.initial.hunger = Some(80.0);
        save_settings_atomic(&p, &s).unwrap();
        let back = load_settings(&p);
        assert_eq!(back.seed, 99);
        assert_eq!(back.initial.hunger, Some(80.0));
        assert!(!p.with_extension("json.tmp").exists());
    }

    #[test]
    fn partial_file_is_sanitized() {
        let p = scratch("partial");
        fs::write(&p, r#"{"tick_ms": 5, "fps_cap": 1000, "initial": {"mood": -20}}"#).unwrap();
        let s = load_settings(&p);
        assert_eq!(s.tick_ms, 100);
        assert_eq!(s.fps_cap, 240);
        assert_eq!(s.bubble_ms, 6000);
        assert_eq!(s.initial.mood, Some(-20.0));
        assert_eq!(s.initial.energy, None);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let p = scratch("garbage");
        fs::write(&p, "not json").unwrap();
        assert_eq!(load_settings(&p), Settings::default());
    }

    #[test]
    fn args_override_file() {
        let file = Settings::default();
        let s = file.with_args(["--seed", "1234", "--quiet"]).unwrap();
        assert_eq!(s.seed, 1234);
        assert!(s.start_quiet);
        assert_eq!(file, Settings::default());
        assert!(file.with_args(["--seed", "abc"]).is_err());
        assert!(file.with_args(["--seed"]).is_err());
    }

    #[test]
    fn flags_do_not_leak_into_the_saved_file() {
        let p = scratch("flags");
        let _ = fs::remove_file(&p);

        let file = load_settings(&p);
        let effective = file.with_args(["--quiet", "--seed", "7"]).unwrap();
        assert!(effective.start_quiet);
        save_settings_atomic(&p, &file).unwrap();

        let next_run = load_settings(&p);
        assert_eq!(next_run, Settings::default());
        assert!(!next_run.start_quiet);
        assert_eq!(next_run.seed, 0);
    }
}
