use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    print_text(&s)?;
    Ok(())
}

pub fn print_text(text: &str) -> io::Result<()> {
    writeln!(io::stdout().lock(), "{text}")
}

pub fn eprintln_line(msg: &str) -> io::Result<()> {
    writeln!(io::stderr().lock(), "{msg}")
}

/// Colored `label` followed by `msg`, on stderr.
pub fn status(color: Color, label: &str, msg: &str) -> io::Result<()> {
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    write_status(&mut err, color, label, msg)
}

fn write_status<W: WriteColor>(w: &mut W, color: Color, label: &str, msg: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(w, "{label}")?;
    w.reset()?;
    writeln!(w, " {msg}")
}

pub fn ok(msg: &str) -> io::Result<()> {
    status(Color::Green, "ok:", msg)
}

pub fn warn(msg: &str) -> io::Result<()> {
    status(Color::Yellow, "warning:", msg)
}

pub fn error(msg: &str) -> io::Result<()> {
    status(Color::Red, "error:", msg)
}
