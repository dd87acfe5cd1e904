//! Interactive raw event inspector
//!
//! Steps through a contest's raw events one line of input at a time. Works on
//! raw events only and never touches the decoder.

use anyhow::Result;
use pbp_decoder::RawEvent;
use std::io::{BufRead, Write};

/// Input that dumps the full current event
const DUMP: &str = " ";
/// Input that stops inspection
const QUIT: &str = "q";

/// Walk `events`, printing a one-line summary and waiting for input after each
///
/// Returns the number of events shown. Stops early on `q` or end of input.
pub fn inspect<R: BufRead, W: Write>(
    events: &[RawEvent],
    mut input: R,
    mut out: W,
) -> Result<usize> {
    let mut shown = 0;
    let mut line = String::new();

    for event in events {
        writeln!(
            out,
            "{} - {}",
            event.description().unwrap_or(""),
            event.category_code
        )?;
        out.flush()?;
        shown += 1;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        match line.trim_end_matches(['\r', '\n']) {
            DUMP => {
                writeln!(out, "{}", serde_json::to_string_pretty(event)?)?;
                writeln!(out)?;
            }
            QUIT => break,
            _ => {}
        }
    }

    log::debug!("Inspected {} of {} events", shown, events.len());
    Ok(shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn events() -> Vec<RawEvent> {
        vec![
            RawEvent::new(0, 12, 1, "12:00"),
            RawEvent::new(1, 1, 1, "11:40").with_home_description("Jump Shot"),
            RawEvent::new(2, 4, 1, "11:30").with_visitor_description("Rebound"),
        ]
    }

    #[test]
    fn test_step_through_all() {
        let mut out = Vec::new();
        let shown = inspect(&events(), Cursor::new("\n\n\n"), &mut out).unwrap();
        assert_eq!(shown, 3);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, " - 12\nJump Shot - 1\nRebound - 4\n");
    }

    #[test]
    fn test_space_dumps_event() {
        let mut out = Vec::new();
        inspect(&events(), Cursor::new("\n \n\n"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"category_code\": 1"));
        assert!(!text.contains("\"category_code\": 4"));
    }

    #[test]
    fn test_quit_and_eof() {
        let mut out = Vec::new();
        assert_eq!(inspect(&events(), Cursor::new("q\n"), &mut out).unwrap(), 1);

        let mut out = Vec::new();
        assert_eq!(inspect(&events(), Cursor::new(""), &mut out).unwrap(), 1);
    }
}
