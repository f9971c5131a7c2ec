//! Console output for the CLI.
//! Status lines get a coloured prefix when the stream is a terminal; the
//! primary result line (`print_user`) is always plain so scripts can parse it.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Ok,
}

fn emit(tone: Tone, msg: &str) {
    let (label, to_stderr) = match tone {
        Tone::Info => ("info:", false),
        Tone::Ok => ("ok:", false),
        Tone::Warn => ("warn:", true),
        Tone::Error => ("error:", true),
    };
    let stream = if to_stderr { atty::Stream::Stderr } else { atty::Stream::Stdout };
    let line = if atty::is(stream) {
        let styled = match tone {
            Tone::Info => label.cyan().bold().to_string(),
            Tone::Ok => label.green().bold().to_string(),
            Tone::Warn => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
        };
        format!("{styled} {msg}")
    } else {
        format!("{label} {msg}")
    };
    if to_stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Ok, msg);
}

/// Plain result line on stdout, no prefix.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
