use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use desk_cat::{emotion_from, Bubble, Emotion, PetState};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<()> {
        let (c, r) = terminal::size()?;
        if c != self.cols || r != self.rows {
            self.cols = c;
            self.rows = r;
            self.prev = CellBuffer::new(c, r);
            self.cur = CellBuffer::new(c, r);
            queue!(self.out, Clear(ClearType::All))?;
        }
        Ok(())
    }

    /// Write only the cells that changed since the last frame.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/// What the cat's face shows. Display only; never fed back into the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Face {
    Purring,
    Calm,
    Hungry,
    Sulking,
    Dozing,
}

pub(crate) fn face_for(st: &PetState) -> Face {
    match emotion_from(st) {
        Emotion::Happy | Emotion::Excited => Face::Purring,
        Emotion::Sad => Face::Hungry,
        Emotion::Grumpy | Emotion::Jealous => Face::Sulking,
        Emotion::Sleepy => Face::Dozing,
        Emotion::Neutral | Emotion::Shy => Face::Calm,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BubbleSide {
    Left,
    Right,
}

/// Put the bubble on whichever side of the cat has more room.
pub(crate) fn bubble_side(cat_x: i32, cols: u16) -> BubbleSide {
    if cat_x > cols as i32 / 2 {
        BubbleSide::Left
    } else {
        BubbleSide::Right
    }
}

fn emotion_color(e: Emotion) -> Color {
    match e {
        Emotion::Happy | Emotion::Excited => Color::Yellow,
        Emotion::Sad => Color::Cyan,
        Emotion::Grumpy | Emotion::Jealous => Color::Red,
        Emotion::Sleepy => Color::DarkGrey,
        Emotion::Neutral | Emotion::Shy => Color::White,
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(
            xx,
            y,
            Cell {
                ch,
                fg,
                bg: Color::Black,
            },
        );
    }
}

fn bar(value01: f64, width: usize) -> String {
    let v = value01.clamp(0.0, 1.0);
    let fill = (v * width as f64 + 0.5) as usize;
    let mut s = String::new();
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { ' ' });
    }
    s.push(']');
    s
}

pub(crate) fn ui_overlay(buf: &mut CellBuffer, st: &PetState, quiet: bool, color: bool) {
    let fg = Color::White;
    let emotion = emotion_from(st);
    let title = format!(
        "desk-cat  |  feeling {emotion}{}",
        if quiet { "  |  work mode" } else { "" }
    );
    draw_text(buf, 1, 0, &title, if color { emotion_color(emotion) } else { fg });

    // mood is signed; shift it onto 0..1 for the bar
    let rows = [
        ("Energy ", st.energy, st.energy / 100.0),
        ("Mood   ", st.mood, (st.mood + 100.0) / 200.0),
        ("Hunger ", st.hunger, st.hunger / 100.0),
        ("Boredom", st.boredom, st.boredom / 100.0),
        ("Attach ", st.attachment, st.attachment / 100.0),
        ("Trust  ", st.trust, st.trust / 100.0),
    ];
    for (i, (name, val, frac)) in rows.iter().enumerate() {
        let s = format!("{name}: {} {:>6.1}", bar(*frac, 14), val);
        draw_text(buf, 1, 2 + i as u16, &s, fg);
    }

    let help = "Keys: p pet | f feed | g play | w work mode | space talk | q quit";
    draw_text(buf, 1, buf.h.saturating_sub(1), help, fg);
}

pub(crate) fn draw_cat(buf: &mut CellBuffer, st: &PetState, cx: i32, cy: i32, color: bool) {
    let face = face_for(st);
    let fg = if color {
        emotion_color(emotion_from(st))
    } else {
        Color::White
    };

    let (eyes, mouth) = match face {
        Face::Purring => ("  ^   ^  ", "   \\w/   "),
        Face::Calm => ("  o   o  ", "    w    "),
        Face::Hungry => ("  o   o  ", "    o    "),
        Face::Sulking => ("  >   <  ", "   ---   "),
        Face::Dozing => ("  -   -  ", "    w  z "),
    };
    let eyes = format!("  |{eyes}|  ");
    let mouth = format!("  |{mouth}|  ");
    let grid: [&str; 6] = [
        "  /\\     /\\  ",
        " /  \\___/  \\ ",
        &eyes,
        &mouth,
        "   \\_______/  ",
        "    (_) (_)   ",
    ];

    let w = 15i32;
    let x0 = cx - w / 2;
    let y0 = cy - grid.len() as i32 / 2;
    for (yy, line) in grid.iter().enumerate() {
        let y = y0 + yy as i32;
        if y < 0 || y >= buf.h as i32 {
            continue;
        }
        for (xx, ch) in line.chars().enumerate() {
            let x = x0 + xx as i32;
            if x >= 0 && x < buf.w as i32 {
                buf.set(x as u16, y as u16, Cell { ch, fg, bg: Color::Black });
            }
        }
    }
}

pub(crate) fn draw_bubble(buf: &mut CellBuffer, bubble: &Bubble, cat_x: i32, cat_y: i32) {
    let text = format!(" {} ", bubble.text);
    let w = text.chars().count() as i32;
    let x = match bubble_side(cat_x, buf.w) {
        BubbleSide::Left => cat_x - 8 - w,
        BubbleSide::Right => cat_x + 8,
    };
    let x = x.clamp(0, (buf.w as i32 - w).max(0)) as u16;
    let y = (cat_y - 4).max(1) as u16;

    let edge: String = "─".repeat(w as usize);
    draw_text(buf, x, y.saturating_sub(1), &format!("╭{edge}╮"), Color::White);
    draw_text(buf, x, y, &format!("│{text}│"), Color::White);
    draw_text(buf, x, y + 1, &format!("╰{edge}╯"), Color::White);
}
