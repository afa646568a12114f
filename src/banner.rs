//! The start-up banner printed by the `masstools` binary.
use std::io;

use chrono::Local;
use colored::Colorize;

pub const MASSTOOLS_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MASSTOOLS_URL: &str = "masstools.tidymass.org";

const LOGO: [&str; 8] = [
    "                       _______          _     ",
    "                      |__   __|        | |    ",
    "  _ __ ___   __ _ ___ ___| | ___   ___ | |___ ",
    r" | '_ ` _ \ / _` / __/ __| |/ _ \ / _ \| / __|",
    r" | | | | | | (_| \__ \__ \ | (_) | (_) | \__ \",
    r" |_| |_| |_|\__,_|___/___/_|\___/ \___/|_|___/",
    "                                              ",
    "                                              ",
];

/// Write the greeting, version line and ASCII logo to `stream`. The logo is
/// drawn in blue when `color` is set.
pub fn write_logo<W: io::Write>(stream: &mut W, color: bool) -> io::Result<()> {
    writeln!(stream, "Thank you for using masstools!")?;
    writeln!(
        stream,
        "Version {} ({})",
        MASSTOOLS_VERSION,
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(stream, "More information: {MASSTOOLS_URL}")?;
    for line in LOGO {
        if color {
            writeln!(stream, "{}", line.blue())?;
        } else {
            writeln!(stream, "{line}")?;
        }
    }
    Ok(())
}

/// Print the banner to STDOUT.
pub fn masstools_logo() -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_logo(&mut handle, true)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_logo() -> io::Result<()> {
        let mut buf: Vec<u8> = Vec::new();
        write_logo(&mut buf, false)?;
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3 + LOGO.len());
        assert_eq!(lines[0], "Thank you for using masstools!");
        assert!(lines[1].starts_with(&format!("Version {MASSTOOLS_VERSION} (")));
        assert!(lines[1].ends_with(')'));
        // "Version x.y.z (YYYY-mm-dd HH:MM:SS)"
        let stamp = &lines[1][lines[1].find('(').unwrap() + 1..lines[1].len() - 1];
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(lines[2], "More information: masstools.tidymass.org");
        assert_eq!(lines[5], LOGO[2]);
        Ok(())
    }

    #[test]
    fn test_write_logo_colored() -> io::Result<()> {
        colored::control::set_override(true);
        let mut buf: Vec<u8> = Vec::new();
        write_logo(&mut buf, true)?;
        colored::control::unset_override();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\u{1b}[34m"));
        Ok(())
    }
}
