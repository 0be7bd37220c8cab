use crate::input::{collect_input_nonblocking, map_event, Command};
use crate::render::{draw_bubble, draw_cat, ui_overlay, Terminal};
use anyhow::Context;
use desk_cat::config::{load_settings, project_paths, save_settings_atomic, Paths, Settings};
use desk_cat::logging::init_file_logging;
use desk_cat::{lines, Bubble, Emotion, PetAction, PetEngine};
use std::cmp::{max, min};
use std::time::{Duration, Instant};

/// Bubble currently on screen and when it goes away.
struct Shown {
    bubble: Bubble,
    until: Instant,
}

pub(crate) struct App {
    /// As read from disk; this is what gets written back on exit.
    file_settings: Settings,
    settings: Settings,
    paths: Paths,
    engine: PetEngine,
    term: Terminal,
    shown: Option<Shown>,
    should_quit: bool,
}

impl App {
    fn init(args: Vec<String>) -> anyhow::Result<Self> {
        let paths = project_paths()?;
        let file_settings = load_settings(&paths.settings_path);
        let settings = file_settings.with_args(args.iter().skip(1))?;
        init_file_logging(&paths.log_path, &settings.log_filter)?;

        let mut engine = if settings.seed == 0 {
            PetEngine::new(settings.initial)
        } else {
            PetEngine::seeded(settings.initial, settings.seed)
        }
        .context("building pet engine")?;
        if settings.start_quiet {
            engine.apply(PetAction::WorkModeOn);
        }

        let term = Terminal::begin()?;
        let greeting = Bubble {
            text: lines::GREETING.to_string(),
            emotion: Emotion::Happy,
        };
        let until = Instant::now() + Duration::from_millis(settings.bubble_ms);

        Ok(Self {
            file_settings,
            settings,
            paths,
            engine,
            term,
            shown: Some(Shown {
                bubble: greeting,
                until,
            }),
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(1.0 / self.settings.fps_cap as f32);
        let sim_step = Duration::from_millis(self.settings.tick_ms);
        let dt_secs = sim_step.as_secs_f64();

        let mut last_frame = Instant::now();
        let mut sim_accum = Duration::ZERO;

        while !self.should_quit {
            self.term.resize_if_needed()?;

            for ev in collect_input_nonblocking(frame_dt)? {
                match map_event(&ev) {
                    Some(Command::Quit) => {
                        self.should_quit = true;
                        break;
                    }
                    Some(Command::Act(action)) => self.engine.apply(action),
                    Some(Command::ToggleWork) => {
                        let action = if self.engine.quiet_mode() {
                            PetAction::WorkModeOff
                        } else {
                            PetAction::WorkModeOn
                        };
                        self.engine.apply(action);
                    }
                    Some(Command::Speak) => {
                        let bubble = self.engine.speak();
                        self.show(bubble);
                    }
                    None => {}
                }
            }

            let now = Instant::now();
            sim_accum = sim_accum.saturating_add(now.saturating_duration_since(last_frame));
            last_frame = now;

            while sim_accum >= sim_step {
                let out = self.engine.tick(dt_secs)?;
                if let Some(bubble) = out.bubble {
                    self.show(bubble);
                }
                sim_accum = sim_accum.saturating_sub(sim_step);
            }

            if self.shown.as_ref().is_some_and(|s| Instant::now() >= s.until) {
                self.shown = None;
            }

            self.render_frame()?;
            spin_sleep(frame_dt, Instant::now());
        }

        self.term.end()?;
        save_settings_atomic(&self.paths.settings_path, &self.file_settings)?;
        tracing::info!("desk-cat exiting");
        Ok(())
    }

    fn show(&mut self, bubble: Bubble) {
        let until = Instant::now() + Duration::from_millis(self.settings.bubble_ms);
        self.shown = Some(Shown { bubble, until });
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        self.term.cur.clear();
        let state = self.engine.state();

        let cols = self.term.cols as i32;
        let rows = self.term.rows as i32;
        let panel_w = min(max(34, cols / 3), cols - 10);
        let cat_x = panel_w + (cols - panel_w) / 2;
        let cat_y = rows / 2;

        draw_cat(&mut self.term.cur, &state, cat_x, cat_y, self.settings.enable_color);
        ui_overlay(
            &mut self.term.cur,
            &state,
            self.engine.quiet_mode(),
            self.settings.enable_color,
        );
        if let Some(shown) = &self.shown {
            draw_bubble(&mut self.term.cur, &shown.bubble, cat_x, cat_y);
        }

        self.term.present()
    }
}

pub(crate) fn run(args: Vec<String>) -> anyhow::Result<()> {
    let mut app = App::init(args)?;
    let result = app.run();
    if result.is_err() {
        let _ = app.term.end();
    }
    result
}

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        if end - t > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
